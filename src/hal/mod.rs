//! Hardware Abstraction Layer for the runtime shell.
//!
//! The console, demo loop and commands only see these traits.
//! Register access lives in `litex`, the host/test board in `sim`.

#[cfg(target_arch = "riscv32")]
pub mod litex;
pub mod sim;

#[cfg(target_arch = "riscv32")]
pub use litex::LitexBoard;
pub use sim::SimBoard;

/// Byte-oriented serial console.
///
/// Text goes out through `core::fmt::Write`; raw echo through `write_byte`.
pub trait SerialPort: core::fmt::Write {
    /// Next received byte, or `None` immediately if nothing is pending.
    fn read_nonblock(&mut self) -> Option<u8>;

    /// Send one raw byte.
    fn write_byte(&mut self, byte: u8);
}

/// LED output register. Bit `i` set lights LED `i`.
pub trait LedBank {
    fn read_leds(&self) -> u32;
    fn write_leds(&mut self, value: u32);
}

/// SoC reset.
pub trait ResetControl {
    /// Reset the SoC. Does not return on hardware.
    fn reset(&mut self);
}

/// Time source for pacing and log timestamps.
pub trait Pacer {
    /// Busy-wait for roughly `cycles` CPU cycles.
    fn delay_cycles(&mut self, cycles: u32);

    /// Free-running cycle counter.
    fn timestamp(&self) -> u64;
}

/// Everything the shell needs from a board.
pub trait Board: SerialPort + LedBank + ResetControl + Pacer {}

impl<T: SerialPort + LedBank + ResetControl + Pacer> Board for T {}
