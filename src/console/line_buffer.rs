//! Line editor for console input
//!
//! Consumes at most one byte per call and echoes as it goes. The buffer
//! lives as long as the editor; a completed line borrows it until the next
//! call.

use crate::hal::SerialPort;

/// Buffer size, including the slot the C console kept for the terminator.
pub const LINE_CAPACITY: usize = 64;

/// Longest line the editor accepts.
pub const MAX_LINE_LEN: usize = LINE_CAPACITY - 1;

const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7F;
const BELL: u8 = 0x07;
const NUL: u8 = 0x00;

/// Erase one character on the terminal.
pub const ERASE_ECHO: &str = "\x08 \x08";

/// Line input buffer with echo.
pub struct LineBuffer {
    buf: [u8; LINE_CAPACITY],
    cursor: usize,
}

impl LineBuffer {
    /// Create empty buffer
    pub const fn new() -> Self {
        Self {
            buf: [0u8; LINE_CAPACITY],
            cursor: 0,
        }
    }

    /// Insertion position; also the length of the pending line.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Characters typed since the last completed line.
    pub fn pending(&self) -> &[u8] {
        &self.buf[..self.cursor]
    }

    /// Read one byte from `port` if one is waiting and apply it.
    ///
    /// Returns the completed line on CR or LF. Without pending input this
    /// returns `None` and changes nothing.
    pub fn feed_if_available(&mut self, port: &mut dyn SerialPort) -> Option<&[u8]> {
        let byte = port.read_nonblock()?;
        self.feed(byte, port)
    }

    /// Apply one byte, echoing to `port`.
    pub fn feed(&mut self, byte: u8, port: &mut dyn SerialPort) -> Option<&[u8]> {
        match byte {
            DELETE | BACKSPACE => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let _ = port.write_str(ERASE_ECHO);
                }
                None
            }

            BELL => None,

            b'\r' | b'\n' => {
                let len = self.cursor;
                self.cursor = 0;
                let _ = port.write_str("\n");
                // A typed NUL ends the line, as it did in the C string buffer
                let end = self.buf[..len].iter().position(|&b| b == NUL).unwrap_or(len);
                Some(&self.buf[..end])
            }

            _ => {
                if self.cursor < MAX_LINE_LEN {
                    port.write_byte(byte);
                    self.buf[self.cursor] = byte;
                    self.cursor += 1;
                }
                None
            }
        }
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}
