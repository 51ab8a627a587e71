//! `sin_inference` demo loop
//!
//! ```text
//!   start ──▶ Running ──(cancel key)──▶ Cancelled
//!               │  ▲
//!               └──┘ predict, light LEDs, x += step, pace, poll
//! ```
//!
//! There is no iteration limit; the cancel key is the only way out. Input is
//! polled once per iteration after the pacing delay, so cancellation takes
//! effect within one iteration.

use crate::config::DemoConfig;
use crate::hal::Board;
use crate::inference::{led_choice, led_mask, leds_on_count, Predictor};

/// Loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoState {
    Running,
    Cancelled,
}

/// Per-invocation demo state.
pub struct DemoLoop {
    config: DemoConfig,
    x: f32,
    iterations: u32,
    state: DemoState,
}

impl DemoLoop {
    pub fn new(config: DemoConfig) -> Self {
        Self {
            config,
            x: 0.0,
            iterations: 0,
            state: DemoState::Running,
        }
    }

    pub fn state(&self) -> DemoState {
        self.state
    }

    /// Next x fed to the predictor.
    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Run one iteration. Does nothing once cancelled.
    pub fn step<B: Board, P: Predictor>(&mut self, board: &mut B, oracle: &mut P) -> DemoState {
        if self.state == DemoState::Cancelled {
            return self.state;
        }

        let prediction = oracle.predict(self.x);
        let mask = led_mask(leds_on_count(led_choice(prediction)));
        board.write_leds(mask as u32);

        self.x += self.config.x_step;
        self.iterations = self.iterations.wrapping_add(1);

        board.delay_cycles(self.config.pacing_cycles);

        // Anything other than the cancel key is consumed and dropped
        if board.read_nonblock() == Some(self.config.cancel_key) {
            let _ = write!(board, "\n\nStopped.\n");
            self.state = DemoState::Cancelled;
        }

        self.state
    }

    /// Announce, then loop until cancelled. Returns the iteration count.
    pub fn run<B: Board, P: Predictor>(mut self, board: &mut B, oracle: &mut P) -> u32 {
        let _ = writeln!(board, "Starting SIN INFERENCE");
        let _ = writeln!(board, "press {} to stop", self.config.cancel_key as char);

        while self.step(board, oracle) == DemoState::Running {}

        self.iterations
    }
}
