//! Module: config
//!
//! Purpose: Compile-time configuration for the runtime shell.
//!
//! Architecture:
//! - `ShellConfig`: console text and demo-loop tuning, `Copy`, owned by the shell
//! - `CsrMap`: CSR layout of the generated LiteX SoC (see `csr.rs`)
//! - `CONFIG`: the defaults the firmware boots with
//!
//! Nothing here is persisted; a rebuild is the only way to change it.

pub mod csr;

pub use csr::CsrMap;

/// Demo loop (`sin_inference`) tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemoConfig {
    /// Added to x after every iteration
    pub x_step: f32,
    /// Busy-wait between iterations, in CPU cycles
    pub pacing_cycles: u32,
    /// Byte that cancels the loop
    pub cancel_key: u8,
}

impl DemoConfig {
    pub const DEFAULT: Self = Self {
        x_step: 0.1,
        pacing_cycles: 3000,
        cancel_key: b'q',
    };
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Console configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellConfig {
    /// First line printed at boot
    pub greeting: &'static str,
    /// Printed after every completed line (no trailing newline)
    pub prompt: &'static str,
    pub demo: DemoConfig,
    /// Drain pending log records to the console before each prompt.
    ///
    /// The console is the board's only sink: with this off, firmware log
    /// records stay in the ring and, once it is full, are only counted as
    /// dropped. The `log-echo` feature turns it on for the firmware.
    pub echo_log: bool,
}

impl ShellConfig {
    pub const DEFAULT: Self = Self {
        greeting: "Hellorld!",
        prompt: "RUNTIME>",
        demo: DemoConfig::DEFAULT,
        echo_log: false,
    };

    /// Same configuration with log echo switched on or off.
    pub const fn with_echo_log(mut self, echo_log: bool) -> Self {
        self.echo_log = echo_log;
        self
    }

    /// Same configuration with a different demo pacing delay.
    pub const fn with_pacing_cycles(mut self, cycles: u32) -> Self {
        self.demo.pacing_cycles = cycles;
        self
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Configuration the firmware boots with.
pub const CONFIG: ShellConfig = ShellConfig::DEFAULT;
