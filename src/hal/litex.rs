//! LiteX SoC board: CSR access for UART, LEDs and reset on VexRiscv.
//!
//! Polled UART, no RX interrupt. Output translates `\n` to `\r\n` like the
//! LiteX BIOS console.

use core::ptr::{read_volatile, write_volatile};

use super::{LedBank, Pacer, ResetControl, SerialPort};
use crate::config::CsrMap;

// UART CSR offsets (32-bit CSR data width)
const UART_RXTX: usize = 0x00;
const UART_TXFULL: usize = 0x04;
const UART_RXEMPTY: usize = 0x08;
const UART_EV_PENDING: usize = 0x10;
const UART_EV_ENABLE: usize = 0x14;

const UART_EV_TX: u32 = 1 << 0;
const UART_EV_RX: u32 = 1 << 1;

// ctrl CSR offsets
const CTRL_RESET: usize = 0x00;

// leds (GPIOOut) CSR offsets
const LEDS_OUT: usize = 0x00;

/// LiteX SoC board.
pub struct LitexBoard {
    csr: CsrMap,
}

impl LitexBoard {
    /// Take over the UART in polled mode.
    pub fn new(csr: CsrMap) -> Self {
        let board = Self { csr };
        // SAFETY: addresses come from the SoC's generated CSR map
        unsafe {
            board.csr_write(csr.uart_base + UART_EV_ENABLE, 0);
            board.csr_write(csr.uart_base + UART_EV_PENDING, UART_EV_TX | UART_EV_RX);
        }
        board
    }

    pub fn csr_map(&self) -> &CsrMap {
        &self.csr
    }

    #[inline]
    unsafe fn csr_read(&self, addr: usize) -> u32 {
        read_volatile(addr as *const u32)
    }

    #[inline]
    unsafe fn csr_write(&self, addr: usize, value: u32) {
        write_volatile(addr as *mut u32, value)
    }

    fn putc(&mut self, byte: u8) {
        let base = self.csr.uart_base;
        // SAFETY: UART CSRs of the generated SoC
        unsafe {
            while self.csr_read(base + UART_TXFULL) != 0 {
                core::hint::spin_loop();
            }
            self.csr_write(base + UART_RXTX, byte as u32);
        }
    }
}

/// Clear the interrupt mask and enable machine interrupts.
///
/// # Safety
///
/// Must run once at boot, before anything relies on interrupt state.
pub unsafe fn irq_init() {
    // VexRiscv machine interrupt mask, LiteX irq_setmask(0)
    core::arch::asm!("csrw 0xBC0, {mask}", mask = in(reg) 0u32);
    riscv::register::mie::set_mext();
    riscv::register::mstatus::set_mie();
}

impl core::fmt::Write for LitexBoard {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for byte in s.bytes() {
            self.write_byte(byte);
        }
        Ok(())
    }
}

impl SerialPort for LitexBoard {
    fn read_nonblock(&mut self) -> Option<u8> {
        let base = self.csr.uart_base;
        // SAFETY: UART CSRs of the generated SoC
        unsafe {
            if self.csr_read(base + UART_RXEMPTY) != 0 {
                return None;
            }
            let byte = self.csr_read(base + UART_RXTX) as u8;
            self.csr_write(base + UART_EV_PENDING, UART_EV_RX);
            Some(byte)
        }
    }

    fn write_byte(&mut self, byte: u8) {
        if byte == b'\n' {
            self.putc(b'\r');
        }
        self.putc(byte);
    }
}

impl LedBank for LitexBoard {
    fn read_leds(&self) -> u32 {
        // SAFETY: leds CSR of the generated SoC
        unsafe { self.csr_read(self.csr.leds_base + LEDS_OUT) }
    }

    fn write_leds(&mut self, value: u32) {
        // SAFETY: leds CSR of the generated SoC
        unsafe { self.csr_write(self.csr.leds_base + LEDS_OUT, value) }
    }
}

impl ResetControl for LitexBoard {
    fn reset(&mut self) {
        // SAFETY: ctrl CSR of the generated SoC
        unsafe { self.csr_write(self.csr.ctrl_base + CTRL_RESET, 1) };
        loop {
            core::hint::spin_loop();
        }
    }
}

impl Pacer for LitexBoard {
    fn delay_cycles(&mut self, cycles: u32) {
        let start = self.timestamp();
        while self.timestamp().wrapping_sub(start) < cycles as u64 {
            core::hint::spin_loop();
        }
    }

    fn timestamp(&self) -> u64 {
        riscv::register::mcycle::read64()
    }
}
