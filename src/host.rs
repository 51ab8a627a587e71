//! Host simulator board: stdin/stdout console, LEDs in memory.
//!
//! stdin is read on a helper thread so `read_nonblock` can stay
//! non-blocking. Pacing sleeps for the time the cycles would take on the
//! board's system clock.

use std::io::{self, Read, Write as _};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use litex_runtime_shell::config::CsrMap;
use litex_runtime_shell::hal::{LedBank, Pacer, ResetControl, SerialPort};
use litex_runtime_shell::{log_drain, LogStream, Shell, SineOracle, CONFIG};

/// Idle poll interval when no line completed.
const IDLE_POLL: Duration = Duration::from_millis(1);

struct HostBoard {
    rx: Receiver<u8>,
    input_closed: bool,
    stdout: io::Stdout,
    leds: u32,
    started: Instant,
    csr: CsrMap,
}

impl HostBoard {
    fn spawn(csr: CsrMap) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for byte in io::stdin().bytes() {
                let Ok(byte) = byte else { break };
                if tx.send(byte).is_err() {
                    break;
                }
            }
        });

        Self {
            rx,
            input_closed: false,
            stdout: io::stdout(),
            leds: 0,
            started: Instant::now(),
            csr,
        }
    }
}

impl core::fmt::Write for HostBoard {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.stdout.write_all(s.as_bytes()).map_err(|_| core::fmt::Error)?;
        self.stdout.flush().map_err(|_| core::fmt::Error)
    }
}

impl SerialPort for HostBoard {
    fn read_nonblock(&mut self) -> Option<u8> {
        match self.rx.try_recv() {
            Ok(byte) => Some(byte),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.input_closed = true;
                None
            }
        }
    }

    fn write_byte(&mut self, byte: u8) {
        let _ = self.stdout.write_all(&[byte]);
        let _ = self.stdout.flush();
    }
}

impl LedBank for HostBoard {
    fn read_leds(&self) -> u32 {
        self.leds
    }

    fn write_leds(&mut self, value: u32) {
        self.leds = value;
    }
}

impl ResetControl for HostBoard {
    fn reset(&mut self) {
        let _ = self.stdout.flush();
        eprintln!("[host] reset");
        std::process::exit(0);
    }
}

impl Pacer for HostBoard {
    fn delay_cycles(&mut self, cycles: u32) {
        thread::sleep(Duration::from_micros(self.csr.cycles_to_us(cycles)));
    }

    fn timestamp(&self) -> u64 {
        let nanos = self.started.elapsed().as_nanos();
        (nanos * self.csr.sys_clk_hz as u128 / 1_000_000_000) as u64
    }
}

/// `core::fmt::Write` over stderr for the log pump.
struct Stderr;

impl core::fmt::Write for Stderr {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        io::stderr().write_all(s.as_bytes()).map_err(|_| core::fmt::Error)
    }
}

pub fn run() {
    let board = HostBoard::spawn(CsrMap::DEFAULT);
    let log: LogStream = LogStream::new();
    let mut shell = Shell::new(board, SineOracle::new(), CONFIG, &log);

    shell.print_banner();
    loop {
        if shell.service().is_none() {
            log_drain::drain_to(&log, &mut Stderr);
            if shell.board().input_closed {
                break;
            }
            thread::sleep(IDLE_POLL);
        }
    }
}
