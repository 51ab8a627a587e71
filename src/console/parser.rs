//! Command line tokenizer
//!
//! Splits once, at the first space. No trimming.

/// Command name and the rest of the line, both borrowed from the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    /// Everything before the first space (the whole line if there is none)
    pub command: &'a [u8],
    /// Everything after the first space; empty if there is no space
    pub rest: &'a [u8],
}

impl<'a> ParsedLine<'a> {
    /// Command name as text, if it is UTF-8.
    pub fn command_str(&self) -> Option<&'a str> {
        core::str::from_utf8(self.command).ok()
    }

    /// Rest of the line as text, if it is UTF-8.
    pub fn rest_str(&self) -> Option<&'a str> {
        core::str::from_utf8(self.rest).ok()
    }
}

/// Split a completed line into command name and remainder.
pub fn tokenize(line: &[u8]) -> ParsedLine<'_> {
    match line.iter().position(|&b| b == b' ') {
        Some(space) => ParsedLine {
            command: &line[..space],
            rest: &line[space + 1..],
        },
        None => ParsedLine {
            command: line,
            rest: &line[line.len()..],
        },
    }
}
