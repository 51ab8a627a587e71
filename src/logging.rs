//! Non-blocking logging for the runtime shell.
//!
//! ```text
//! shell / demo loop        LogStream             drain
//! ─────────────────        ─────────             ─────
//!
//! shell_info!() ─────────▶ [R0][R1][R2] ───────▶ console (echo_log)
//! formats on stack         fixed ring            stderr (host)
//! never blocks             drops when full
//! ```
//!
//! The console is the only UART on the board, so records are held in the
//! ring until something drains them. The ring belongs to one execution
//! context: it is `Send` but not `Sync`, so it is created next to the shell
//! and lent to it, and can never be pushed from two threads at once.

use core::cell::Cell;

/// Maximum message length.
pub const MAX_MSG_LEN: usize = 96;

/// Log ring size (number of records).
pub const LOG_BUFFER_SIZE: usize = 64;

/// Log level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

/// A single log record.
#[derive(Clone, Copy)]
pub struct LogRecord {
    /// Cycle counter at push time.
    pub cycle: u64,
    pub level: LogLevel,
    /// Message length.
    pub len: u8,
    /// Message bytes (not null-terminated).
    pub text: [u8; MAX_MSG_LEN],
}

impl LogRecord {
    const EMPTY: Self = Self {
        cycle: 0,
        level: LogLevel::Info,
        len: 0,
        text: [0; MAX_MSG_LEN],
    };

    /// Message text, `"<invalid utf8>"` if the bytes are not UTF-8.
    pub fn message(&self) -> &str {
        core::str::from_utf8(&self.text[..self.len as usize]).unwrap_or("<invalid utf8>")
    }
}

impl Default for LogRecord {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Fixed-capacity log ring.
///
/// Push never blocks; when the ring is full the record is dropped and
/// counted. Pushing and draining go through `&self` so commands can log
/// while the shell holds the same stream.
pub struct LogStream<const N: usize = LOG_BUFFER_SIZE> {
    records: [Cell<LogRecord>; N],
    write_idx: Cell<u32>,
    read_idx: Cell<u32>,
    dropped: Cell<u32>,
}

impl<const N: usize> LogStream<N> {
    const MASK: usize = N - 1;

    #[allow(clippy::declare_interior_mutable_const)]
    const EMPTY_SLOT: Cell<LogRecord> = Cell::new(LogRecord::EMPTY);

    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "Log buffer size must be power of 2");

        Self {
            records: [Self::EMPTY_SLOT; N],
            write_idx: Cell::new(0),
            read_idx: Cell::new(0),
            dropped: Cell::new(0),
        }
    }

    /// Queue a record. Returns `false` if it was dropped (ring full).
    #[inline]
    pub fn push(&self, cycle: u64, level: LogLevel, msg: &[u8]) -> bool {
        let write = self.write_idx.get();
        if write.wrapping_sub(self.read_idx.get()) >= N as u32 {
            self.dropped.set(self.dropped.get().wrapping_add(1));
            return false;
        }

        let mut record = LogRecord::EMPTY;
        let len = msg.len().min(MAX_MSG_LEN);
        record.cycle = cycle;
        record.level = level;
        record.len = len as u8;
        record.text[..len].copy_from_slice(&msg[..len]);

        self.records[(write as usize) & Self::MASK].set(record);
        self.write_idx.set(write.wrapping_add(1));
        true
    }

    /// Take the oldest record, if any.
    #[inline]
    pub fn drain(&self) -> Option<LogRecord> {
        let read = self.read_idx.get();
        if read == self.write_idx.get() {
            return None;
        }

        let record = self.records[(read as usize) & Self::MASK].get();
        self.read_idx.set(read.wrapping_add(1));
        Some(record)
    }

    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.get()
    }

    #[inline]
    pub fn reset_dropped(&self) {
        self.dropped.set(0);
    }

    #[inline]
    pub fn has_records(&self) -> bool {
        self.pending() != 0
    }

    /// Number of records waiting to be drained.
    #[inline]
    pub fn pending(&self) -> u32 {
        self.write_idx.get().wrapping_sub(self.read_idx.get())
    }
}

impl<const N: usize> Default for LogStream<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a message into a buffer, truncating at the buffer end.
///
/// Returns the number of bytes written.
#[inline]
pub fn format_to_buffer(buf: &mut [u8], args: core::fmt::Arguments<'_>) -> usize {
    let mut writer = SliceWriter { buf, pos: 0 };
    let _ = core::fmt::write(&mut writer, args);
    writer.pos
}

/// `core::fmt::Write` over a byte slice; silently truncates.
struct SliceWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl core::fmt::Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let bytes = s.as_bytes();
        let remaining = self.buf.len() - self.pos;
        let to_write = bytes.len().min(remaining);
        self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
        self.pos += to_write;
        Ok(())
    }
}

/// Push a formatted record.
///
/// ```ignore
/// shell_log!(LogLevel::Info, log, board.timestamp(), "leds {:#04x}", value);
/// ```
#[macro_export]
macro_rules! shell_log {
    ($level:expr, $stream:expr, $cycle:expr, $($arg:tt)*) => {{
        let mut buf = [0u8; $crate::logging::MAX_MSG_LEN];
        let len = $crate::logging::format_to_buffer(&mut buf, format_args!($($arg)*));
        $stream.push($cycle, $level, &buf[..len]);
    }};
}

#[macro_export]
macro_rules! shell_error {
    ($stream:expr, $cycle:expr, $($arg:tt)*) => {
        $crate::shell_log!($crate::logging::LogLevel::Error, $stream, $cycle, $($arg)*)
    };
}

#[macro_export]
macro_rules! shell_warn {
    ($stream:expr, $cycle:expr, $($arg:tt)*) => {
        $crate::shell_log!($crate::logging::LogLevel::Warn, $stream, $cycle, $($arg)*)
    };
}

#[macro_export]
macro_rules! shell_info {
    ($stream:expr, $cycle:expr, $($arg:tt)*) => {
        $crate::shell_log!($crate::logging::LogLevel::Info, $stream, $cycle, $($arg)*)
    };
}

#[macro_export]
macro_rules! shell_debug {
    ($stream:expr, $cycle:expr, $($arg:tt)*) => {
        $crate::shell_log!($crate::logging::LogLevel::Debug, $stream, $cycle, $($arg)*)
    };
}

#[macro_export]
macro_rules! shell_trace {
    ($stream:expr, $cycle:expr, $($arg:tt)*) => {
        $crate::shell_log!($crate::logging::LogLevel::Trace, $stream, $cycle, $($arg)*)
    };
}
