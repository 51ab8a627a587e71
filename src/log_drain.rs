//! Log drain: formats records and writes them to a text sink.
//!
//! On the board the only sink is the console UART, so draining is done by
//! the shell between commands (see `ShellConfig::echo_log`). The host
//! simulator drains to stderr.

use core::fmt::Write;

use crate::logging::{LogRecord, LogStream};

/// Format one record.
///
/// Format: `[cycle] LEVEL: message\n`
pub fn format_record(record: &LogRecord, out: &mut dyn Write) -> core::fmt::Result {
    writeln!(
        out,
        "[{:10}] {}: {}",
        record.cycle,
        record.level.as_str(),
        record.message()
    )
}

/// Drain every pending record into `out`.
///
/// Reports and resets the dropped counter after the records. Returns the
/// number of records written.
pub fn drain_to<const N: usize>(stream: &LogStream<N>, out: &mut dyn Write) -> usize {
    let mut count = 0;
    while let Some(record) = stream.drain() {
        let _ = format_record(&record, out);
        count += 1;
    }

    let dropped = stream.dropped();
    if dropped > 0 {
        let _ = writeln!(out, "[WARN] Dropped: {}", dropped);
        stream.reset_dropped();
    }

    count
}
