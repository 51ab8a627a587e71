//! In-memory board for tests and the host simulator.
//!
//! Input is a scripted byte queue. A byte can be held back until a number
//! of pacing delays have elapsed, which is how tests type `q` "after several
//! iterations" of the demo loop. Output is captured, and the LED register,
//! LED writes, resets and delays are counted.

use super::{LedBank, Pacer, ResetControl, SerialPort};

/// Scripted input capacity (bytes).
pub const SIM_INPUT_CAPACITY: usize = 256;

/// Captured output capacity (bytes). Older output is kept, newer is dropped.
pub const SIM_OUTPUT_CAPACITY: usize = 8192;

/// Simulated board.
pub struct SimBoard {
    input: [u8; SIM_INPUT_CAPACITY],
    /// Delay count at which each queued byte becomes readable
    ready_at: [u64; SIM_INPUT_CAPACITY],
    input_head: usize,
    input_len: usize,
    output: [u8; SIM_OUTPUT_CAPACITY],
    output_len: usize,
    output_overflow: bool,
    leds: u32,
    led_writes: u32,
    resets: u32,
    delays: u64,
    cycles: u64,
}

impl SimBoard {
    pub const fn new() -> Self {
        Self {
            input: [0; SIM_INPUT_CAPACITY],
            ready_at: [0; SIM_INPUT_CAPACITY],
            input_head: 0,
            input_len: 0,
            output: [0; SIM_OUTPUT_CAPACITY],
            output_len: 0,
            output_overflow: false,
            leds: 0,
            led_writes: 0,
            resets: 0,
            delays: 0,
            cycles: 0,
        }
    }

    /// Queue bytes that are readable right away.
    ///
    /// Returns the number of bytes queued (less than `bytes.len()` if full).
    pub fn feed(&mut self, bytes: &[u8]) -> usize {
        self.feed_after(0, bytes)
    }

    /// Queue bytes that become readable once `delays` pacing delays have
    /// elapsed since the board was created.
    ///
    /// Bytes are read in queue order, so a held-back byte also holds back
    /// everything queued after it.
    pub fn feed_after(&mut self, delays: u64, bytes: &[u8]) -> usize {
        let free = SIM_INPUT_CAPACITY - self.input_len;
        let count = bytes.len().min(free);
        for (i, &byte) in bytes[..count].iter().enumerate() {
            let slot = (self.input_head + self.input_len + i) % SIM_INPUT_CAPACITY;
            self.input[slot] = byte;
            self.ready_at[slot] = delays;
        }
        self.input_len += count;
        count
    }

    /// Bytes queued but not yet read.
    pub fn pending_input(&self) -> usize {
        self.input_len
    }

    /// Everything written so far.
    pub fn output(&self) -> &[u8] {
        &self.output[..self.output_len]
    }

    /// Output as text (empty if not UTF-8).
    pub fn output_str(&self) -> &str {
        core::str::from_utf8(self.output()).unwrap_or("")
    }

    /// True if output was dropped because the capture buffer filled up.
    pub fn output_overflowed(&self) -> bool {
        self.output_overflow
    }

    pub fn clear_output(&mut self) {
        self.output_len = 0;
        self.output_overflow = false;
    }

    pub fn leds(&self) -> u32 {
        self.leds
    }

    /// Set the LED register without counting a write.
    pub fn set_leds(&mut self, value: u32) {
        self.leds = value;
    }

    pub fn led_writes(&self) -> u32 {
        self.led_writes
    }

    pub fn resets(&self) -> u32 {
        self.resets
    }

    pub fn delays(&self) -> u64 {
        self.delays
    }

    fn push_output(&mut self, bytes: &[u8]) {
        let free = SIM_OUTPUT_CAPACITY - self.output_len;
        let count = bytes.len().min(free);
        self.output[self.output_len..self.output_len + count].copy_from_slice(&bytes[..count]);
        self.output_len += count;
        if count < bytes.len() {
            self.output_overflow = true;
        }
    }
}

impl Default for SimBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Write for SimBoard {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.push_output(s.as_bytes());
        Ok(())
    }
}

impl SerialPort for SimBoard {
    fn read_nonblock(&mut self) -> Option<u8> {
        if self.input_len == 0 || self.ready_at[self.input_head] > self.delays {
            return None;
        }
        let byte = self.input[self.input_head];
        self.input_head = (self.input_head + 1) % SIM_INPUT_CAPACITY;
        self.input_len -= 1;
        Some(byte)
    }

    fn write_byte(&mut self, byte: u8) {
        self.push_output(&[byte]);
    }
}

impl LedBank for SimBoard {
    fn read_leds(&self) -> u32 {
        self.leds
    }

    fn write_leds(&mut self, value: u32) {
        self.leds = value;
        self.led_writes += 1;
    }
}

impl ResetControl for SimBoard {
    fn reset(&mut self) {
        self.resets += 1;
    }
}

impl Pacer for SimBoard {
    fn delay_cycles(&mut self, cycles: u32) {
        self.delays += 1;
        self.cycles += cycles as u64;
    }

    fn timestamp(&self) -> u64 {
        self.cycles
    }
}
