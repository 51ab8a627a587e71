//! Console driver tests

use litex_runtime_shell::console::commands::{Command, Outcome};
use litex_runtime_shell::console::{ConsoleError, Dispatch, Shell};
use litex_runtime_shell::hal::SimBoard;
use litex_runtime_shell::logging::{LogLevel, LogStream, LOG_BUFFER_SIZE};
use litex_runtime_shell::{ShellConfig, SineOracle, CONFIG};

type TestShell<'a> = Shell<'a, SimBoard, SineOracle>;

fn shell(log: &LogStream) -> TestShell<'_> {
    Shell::new(SimBoard::new(), SineOracle::new(), CONFIG, log)
}

/// Service until a line is dispatched (or give up).
fn next_dispatch(shell: &mut TestShell<'_>) -> Option<Dispatch> {
    for _ in 0..256 {
        if let Some(dispatch) = shell.service() {
            return Some(dispatch);
        }
    }
    None
}

#[test]
fn test_banner() {
    let log: LogStream = LogStream::new();
    let mut shell = shell(&log);

    shell.print_banner();

    let out = shell.board().output_str();
    assert!(out.starts_with("Hellorld!\nAvailable commands:\n"));
    assert!(out.ends_with("RUNTIME>"));
    assert_eq!(out.matches("RUNTIME>").count(), 1);
}

#[test]
fn test_service_without_input_does_nothing() {
    let log: LogStream = LogStream::new();
    let mut shell = shell(&log);

    assert_eq!(shell.service(), None);
    assert!(shell.board().output().is_empty());
}

#[test]
fn test_help_is_dispatched_and_prompt_reprinted() {
    let log: LogStream = LogStream::new();
    let mut shell = shell(&log);
    shell.board_mut().feed(b"help\n");

    let dispatch = next_dispatch(&mut shell);

    assert_eq!(
        dispatch,
        Some(Dispatch::Ran { command: Command::Help, outcome: Outcome::Completed })
    );
    let out = shell.board().output_str();
    assert!(out.starts_with("help\nAvailable commands:\n"));
    assert!(out.ends_with("RUNTIME>"));
}

#[test]
fn test_unknown_command_is_silently_ignored() {
    let log: LogStream = LogStream::new();
    let mut shell = shell(&log);
    shell.board_mut().feed(b"foo\n");

    let dispatch = next_dispatch(&mut shell);

    assert_eq!(dispatch, Some(Dispatch::Ignored(ConsoleError::UnknownCommand)));
    assert_eq!(shell.board().output_str(), "foo\nRUNTIME>");
    assert_eq!(shell.board().led_writes(), 0);
    assert_eq!(shell.board().resets(), 0);
    assert_eq!(shell.oracle().call_count(), 0);
}

#[test]
fn test_empty_line_reprompts() {
    let log: LogStream = LogStream::new();
    let mut shell = shell(&log);
    shell.board_mut().feed(b"\r");

    assert_eq!(next_dispatch(&mut shell), Some(Dispatch::Ignored(ConsoleError::EmptyLine)));
    assert_eq!(shell.board().output_str(), "\nRUNTIME>");
}

#[test]
fn test_commands_are_case_sensitive() {
    let log: LogStream = LogStream::new();
    let mut shell = shell(&log);
    shell.board_mut().feed(b"Led\n");

    assert_eq!(next_dispatch(&mut shell), Some(Dispatch::Ignored(ConsoleError::UnknownCommand)));
    assert_eq!(shell.board().leds(), 0);
}

#[test]
fn test_arguments_are_accepted_and_unused() {
    let log: LogStream = LogStream::new();
    let mut shell = shell(&log);
    shell.board_mut().feed(b"led extra args\n");

    assert_eq!(
        next_dispatch(&mut shell),
        Some(Dispatch::Ran { command: Command::Led, outcome: Outcome::Completed })
    );
    assert_eq!(shell.board().leds(), 1);
}

#[test]
fn test_partial_line_survives_across_cycles() {
    let log: LogStream = LogStream::new();
    let mut shell = shell(&log);

    shell.board_mut().feed(b"le");
    assert_eq!(shell.service(), None);
    assert_eq!(shell.service(), None);
    assert_eq!(shell.service(), None);
    assert_eq!(shell.line().pending(), b"le");

    shell.board_mut().feed(b"d\n");
    assert_eq!(
        next_dispatch(&mut shell),
        Some(Dispatch::Ran { command: Command::Led, outcome: Outcome::Completed })
    );
}

#[test]
fn test_prompt_after_every_line() {
    let log: LogStream = LogStream::new();
    let mut shell = shell(&log);
    shell.board_mut().feed(b"help\nled\nfoo\n\n");

    for _ in 0..4 {
        assert!(next_dispatch(&mut shell).is_some());
    }

    assert_eq!(shell.board().output_str().matches("RUNTIME>").count(), 4);
}

#[test]
fn test_reboot_resets_once_and_stops_prompting() {
    let log: LogStream = LogStream::new();
    let mut shell = shell(&log);
    shell.board_mut().feed(b"reboot\n");

    assert_eq!(
        next_dispatch(&mut shell),
        Some(Dispatch::Ran { command: Command::Reboot, outcome: Outcome::ResetRequested })
    );
    assert_eq!(shell.board().resets(), 1);
    assert_eq!(shell.board().output_str(), "reboot\n");

    assert_eq!(shell.service(), None);
    assert_eq!(shell.board().resets(), 1);
}

#[test]
fn test_sin_inference_cancelled_with_q() {
    let log: LogStream = LogStream::new();
    let mut shell = shell(&log);
    shell.board_mut().feed(b"sin_inference\n");
    shell.board_mut().feed_after(5, b"q");

    let dispatch = next_dispatch(&mut shell);

    assert_eq!(
        dispatch,
        Some(Dispatch::Ran {
            command: Command::SinInference,
            outcome: Outcome::DemoStopped { iterations: 5 },
        })
    );
    // q seen on the first poll after it became available
    assert_eq!(shell.board().delays(), 5);
    assert_eq!(shell.board().led_writes(), 5);
    assert_eq!(shell.oracle().call_count(), 5);

    let out = shell.board().output_str();
    assert!(out.contains("press q to stop\n"));
    assert!(out.ends_with("\n\nStopped.\nRUNTIME>"));
}

#[test]
fn test_demo_discards_other_input() {
    let log: LogStream = LogStream::new();
    let mut shell = shell(&log);
    shell.board_mut().feed(b"sin_inference\n");
    shell.board_mut().feed_after(2, b"xyq");

    let dispatch = next_dispatch(&mut shell);

    assert_eq!(
        dispatch,
        Some(Dispatch::Ran {
            command: Command::SinInference,
            outcome: Outcome::DemoStopped { iterations: 4 },
        })
    );
    assert_eq!(shell.board().pending_input(), 0);
    assert!(shell.line().pending().is_empty());
}

#[test]
fn test_oracle_counter_persists_across_demo_runs() {
    let log: LogStream = LogStream::new();
    let mut shell = shell(&log);
    shell.board_mut().feed(b"sin_inference\n");
    shell.board_mut().feed_after(3, b"q");
    next_dispatch(&mut shell);

    shell.board_mut().feed(b"sin_inference\n");
    shell.board_mut().feed_after(5, b"q");
    let second = next_dispatch(&mut shell);

    // Second run picks up at delay 3, so q (ready at 5) arrives after 2 iterations
    assert_eq!(
        second,
        Some(Dispatch::Ran {
            command: Command::SinInference,
            outcome: Outcome::DemoStopped { iterations: 2 },
        })
    );
    assert_eq!(shell.oracle().call_count(), 5);
}

#[test]
fn test_log_not_echoed_by_default() {
    let log: LogStream = LogStream::new();
    let mut shell = shell(&log);
    shell.board_mut().feed(b"led\n");

    next_dispatch(&mut shell);

    assert!(!shell.board().output_str().contains("INFO"));
    assert!(log.has_records());
}

#[test]
fn test_echo_log_drains_before_prompt() {
    let log: LogStream = LogStream::new();
    let config = ShellConfig::DEFAULT.with_echo_log(true);
    let mut shell = Shell::new(SimBoard::new(), SineOracle::new(), config, &log);
    shell.board_mut().feed(b"led\n");

    next_dispatch(&mut shell);

    let out = shell.board().output_str();
    assert!(out.contains("DEBUG: dispatch led\n"));
    assert!(out.contains("INFO: leds 0x0 -> 0x1\n"));
    assert!(out.ends_with("RUNTIME>"));
    assert!(!log.has_records());
}

#[test]
fn test_ignored_line_is_logged() {
    let log: LogStream = LogStream::new();
    let mut shell = shell(&log);
    shell.board_mut().feed(b"foo bar\n");

    next_dispatch(&mut shell);

    let record = log.drain().unwrap();
    assert_eq!(record.message(), "ignored 7-byte line: E02: unknown command");
}

#[test]
fn test_unused_arguments_are_traced() {
    let log: LogStream = LogStream::new();
    let mut shell = shell(&log);
    shell.board_mut().feed(b"led extra args\n");

    next_dispatch(&mut shell);

    let traced = core::iter::from_fn(|| log.drain())
        .find(|r| r.level == LogLevel::Trace)
        .unwrap();
    assert_eq!(traced.message(), "led: 10-byte argument unused");
}

#[test]
fn test_undrained_log_fills_and_counts_drops() {
    let log: LogStream = LogStream::new();
    let mut shell = shell(&log);

    for _ in 0..LOG_BUFFER_SIZE {
        shell.board_mut().feed(b"led\n");
        next_dispatch(&mut shell);
    }

    assert_eq!(log.pending() as usize, LOG_BUFFER_SIZE);
    assert!(log.dropped() > 0);
}

#[test]
fn test_echo_log_keeps_ring_from_overflowing() {
    let log: LogStream = LogStream::new();
    let config = ShellConfig::DEFAULT.with_echo_log(true);
    let mut shell = Shell::new(SimBoard::new(), SineOracle::new(), config, &log);

    for _ in 0..LOG_BUFFER_SIZE {
        shell.board_mut().feed(b"led\n");
        next_dispatch(&mut shell);
    }

    assert_eq!(log.dropped(), 0);
    assert!(!log.has_records());
    assert_eq!(shell.board().output_str().matches("INFO: leds").count(), LOG_BUFFER_SIZE);
}
