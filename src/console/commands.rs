//! Command table and handlers

use core::fmt::Write;

use super::demo::DemoLoop;
use super::ConsoleError;
use crate::config::ShellConfig;
use crate::hal::Board;
use crate::inference::Predictor;
use crate::logging::LogStream;
use crate::{shell_error, shell_info, shell_warn};

/// Built-in commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Reboot,
    Led,
    SinInference,
}

/// Command descriptor
pub struct CommandDescriptor {
    pub name: &'static str,
    pub brief: &'static str,
    pub command: Command,
}

/// All available commands, in `help` order
pub static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor { name: "help", brief: "this command", command: Command::Help },
    CommandDescriptor { name: "reboot", brief: "reboot CPU", command: Command::Reboot },
    CommandDescriptor { name: "led", brief: "led test", command: Command::Led },
    CommandDescriptor { name: "sin_inference", brief: "sin inference", command: Command::SinInference },
];

impl Command {
    /// Name as typed on the console.
    pub fn name(self) -> &'static str {
        COMMANDS
            .iter()
            .find(|c| c.command == self)
            .map(|c| c.name)
            .unwrap_or("")
    }
}

/// What running a command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// Demo loop cancelled after this many iterations
    DemoStopped { iterations: u32 },
    /// Reset was requested; on hardware control never comes back
    ResetRequested,
}

/// Everything a handler may touch.
pub struct CommandContext<'a, B: Board, P: Predictor> {
    pub board: &'a mut B,
    pub oracle: &'a mut P,
    pub config: &'a ShellConfig,
    pub log: &'a LogStream,
}

/// Find a command by exact, case-sensitive name.
pub fn lookup(name: &[u8]) -> Result<Command, ConsoleError> {
    if name.is_empty() {
        return Err(ConsoleError::EmptyLine);
    }

    COMMANDS
        .iter()
        .find(|c| c.name.as_bytes() == name)
        .map(|c| c.command)
        .ok_or(ConsoleError::UnknownCommand)
}

/// Run a command to completion.
pub fn execute<B: Board, P: Predictor>(command: Command, ctx: &mut CommandContext<'_, B, P>) -> Outcome {
    match command {
        Command::Help => {
            print_help(ctx.board);
            Outcome::Completed
        }
        Command::Reboot => cmd_reboot(ctx),
        Command::Led => cmd_led(ctx),
        Command::SinInference => cmd_sin_inference(ctx),
    }
}

/// Get all command names
pub fn command_names() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|c| c.name)
}

/// Print the command list.
pub fn print_help(out: &mut dyn Write) {
    let _ = writeln!(out, "Available commands:");
    for c in COMMANDS {
        let _ = writeln!(out, "{:<32}- {}", c.name, c.brief);
    }
}

// --- Command Implementations ---

fn cmd_reboot<B: Board, P: Predictor>(ctx: &mut CommandContext<'_, B, P>) -> Outcome {
    shell_warn!(ctx.log, ctx.board.timestamp(), "reboot requested");
    ctx.board.reset();

    // Only reachable on boards whose reset hands control back
    shell_error!(ctx.log, ctx.board.timestamp(), "reset returned, CPU still running");
    Outcome::ResetRequested
}

fn cmd_led<B: Board, P: Predictor>(ctx: &mut CommandContext<'_, B, P>) -> Outcome {
    let _ = writeln!(ctx.board, "toggling led...");

    let current = ctx.board.read_leds();
    let next = u32::from(current == 0);
    ctx.board.write_leds(next);

    shell_info!(ctx.log, ctx.board.timestamp(), "leds {:#x} -> {:#x}", current, next);
    Outcome::Completed
}

fn cmd_sin_inference<B: Board, P: Predictor>(ctx: &mut CommandContext<'_, B, P>) -> Outcome {
    shell_info!(ctx.log, ctx.board.timestamp(), "demo started");

    let iterations = DemoLoop::new(ctx.config.demo).run(ctx.board, ctx.oracle);

    shell_info!(ctx.log, ctx.board.timestamp(), "demo stopped after {} iterations", iterations);
    Outcome::DemoStopped { iterations }
}
