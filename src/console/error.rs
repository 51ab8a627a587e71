//! Console error types
//!
//! None of these reach the operator: the shell ignores the line, logs the
//! reason and re-prints the prompt.

/// Why a completed line did not run a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// E01: Line was empty
    EmptyLine,
    /// E02: Command name not in the table
    UnknownCommand,
}

impl ConsoleError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyLine => "E01",
            Self::UnknownCommand => "E02",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::EmptyLine => "empty line",
            Self::UnknownCommand => "unknown command",
        }
    }
}

impl core::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}
