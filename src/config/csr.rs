//! CSR layout of the generated SoC.
//!
//! Must match `build/<board>/software/include/generated/csr.h` of the
//! bitstream the firmware runs on. The defaults are for the Colorlight i5
//! target built with `--sys-clk-freq 60e6`, 32-bit CSR data width.

/// Base addresses of the CSR banks the shell touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsrMap {
    /// `ctrl` bank (`reset` at offset 0)
    pub ctrl_base: usize,
    /// `leds` GPIOOut bank (`out` at offset 0)
    pub leds_base: usize,
    /// `uart` bank (`rxtx`, `txfull`, `rxempty`, `ev_*`)
    pub uart_base: usize,
    /// System clock in Hz
    pub sys_clk_hz: u32,
}

impl CsrMap {
    pub const DEFAULT: Self = Self {
        ctrl_base: 0xf000_0000,
        leds_base: 0xf000_2000,
        uart_base: 0xf000_3800,
        sys_clk_hz: 60_000_000,
    };

    /// Pacing delay in microseconds for a cycle count at this clock.
    pub const fn cycles_to_us(&self, cycles: u32) -> u64 {
        (cycles as u64 * 1_000_000) / self.sys_clk_hz as u64
    }
}

impl Default for CsrMap {
    fn default() -> Self {
        Self::DEFAULT
    }
}
