//! Serial console: line editor, tokenizer, command table, demo loop
//!
//! Polled, single-threaded, no heap. Every read is non-blocking.

pub mod commands;
pub mod console;
pub mod demo;
pub mod error;
pub mod line_buffer;
pub mod parser;

pub use commands::{execute, lookup, command_names, Command, CommandContext, Outcome, COMMANDS};
pub use console::{Dispatch, Shell, VERSION};
pub use demo::{DemoLoop, DemoState};
pub use error::ConsoleError;
pub use line_buffer::LineBuffer;
pub use parser::{tokenize, ParsedLine};
