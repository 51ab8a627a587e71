//! # LiteX Runtime Shell
//!
//! Serial command shell for a LiteX soft-core board, with a demo command
//! that drives an 8-LED bank from a stand-in inference function.
//!
//! ## Architecture
//!
//! ```text
//! UART bytes ─▶ LineBuffer ─▶ tokenize ─▶ lookup ─▶ execute
//!                                                     │
//!                                   sin_inference ─▶ DemoLoop ─▶ LEDs
//! ```
//!
//! Everything is polled from one loop. Hardware sits behind the traits in
//! [`hal`]; [`hal::SimBoard`] runs the same code on the host.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod console;
pub mod hal;
pub mod inference;
pub mod log_drain;
pub mod logging;

pub use config::{ShellConfig, CONFIG};
pub use console::{Dispatch, Shell};
pub use hal::{Board, SimBoard};
pub use inference::{Predictor, SineOracle};
pub use logging::LogStream;
