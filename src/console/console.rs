//! Console driver tying line editor, tokenizer and command table together

use super::commands::{self, Command, CommandContext, Outcome};
use super::{tokenize, ConsoleError, LineBuffer};
use crate::config::ShellConfig;
use crate::hal::Board;
use crate::inference::Predictor;
use crate::log_drain;
use crate::logging::LogStream;
use crate::{shell_debug, shell_info, shell_trace};

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

/// What one console cycle did with a completed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Ran { command: Command, outcome: Outcome },
    /// Nothing ran; the operator sees only the next prompt
    Ignored(ConsoleError),
}

/// Read-dispatch-prompt loop.
///
/// Owns the board, the oracle (and with it the call counter) and the line
/// buffer. Exactly one command runs at a time.
pub struct Shell<'a, B: Board, P: Predictor> {
    board: B,
    oracle: P,
    line: LineBuffer,
    config: ShellConfig,
    log: &'a LogStream,
}

impl<'a, B: Board, P: Predictor> Shell<'a, B, P> {
    pub fn new(board: B, oracle: P, config: ShellConfig, log: &'a LogStream) -> Self {
        Self {
            board,
            oracle,
            line: LineBuffer::new(),
            config,
            log,
        }
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    pub fn oracle(&self) -> &P {
        &self.oracle
    }

    pub fn line(&self) -> &LineBuffer {
        &self.line
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Greeting, command list and first prompt.
    pub fn print_banner(&mut self) {
        shell_info!(self.log, self.board.timestamp(), "shell started ({})", VERSION);

        let _ = writeln!(self.board, "{}", self.config.greeting);
        commands::print_help(&mut self.board);
        self.print_prompt();
    }

    /// Print the prompt, after draining the log if `echo_log` is set.
    pub fn print_prompt(&mut self) {
        if self.config.echo_log {
            log_drain::drain_to(self.log, &mut self.board);
        }
        let _ = write!(self.board, "{}", self.config.prompt);
    }

    /// One console cycle: consume at most one input byte and, if that
    /// completed a line, run it and re-prompt.
    ///
    /// Returns `None` when no line was completed.
    pub fn service(&mut self) -> Option<Dispatch> {
        let line = self.line.feed_if_available(&mut self.board)?;
        let len = line.len();
        let parsed = tokenize(line);
        let arg_len = parsed.rest.len();
        let found = commands::lookup(parsed.command);

        let dispatch = match found {
            Ok(command) => {
                shell_debug!(self.log, self.board.timestamp(), "dispatch {}", command.name());
                if arg_len > 0 {
                    shell_trace!(
                        self.log,
                        self.board.timestamp(),
                        "{}: {}-byte argument unused",
                        command.name(),
                        arg_len
                    );
                }
                let mut ctx = CommandContext {
                    board: &mut self.board,
                    oracle: &mut self.oracle,
                    config: &self.config,
                    log: self.log,
                };
                let outcome = commands::execute(command, &mut ctx);
                Dispatch::Ran { command, outcome }
            }
            Err(err) => {
                shell_debug!(self.log, self.board.timestamp(), "ignored {}-byte line: {}", len, err);
                Dispatch::Ignored(err)
            }
        };

        // After a reset request there is no console left to prompt on
        if !matches!(dispatch, Dispatch::Ran { outcome: Outcome::ResetRequested, .. }) {
            self.print_prompt();
        }

        Some(dispatch)
    }

    /// Banner, then service the console forever.
    pub fn run(&mut self) -> ! {
        self.print_banner();
        loop {
            self.service();
        }
    }
}
