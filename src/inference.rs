//! Oracle adapter: the prediction function and LED mapping.
//!
//! `SineOracle` stands in for a real model. It returns `sin(x)` with a small
//! periodic error driven by its call counter, so repeated calls with the
//! same `x` differ the way real measurements would. The counter lives in the
//! oracle instance and keeps counting across demo loop invocations.

/// Amplitude of the periodic error added to the base waveform.
pub const NOISE_AMPLITUDE: f32 = 0.02;

/// Phase advance of the error per call.
pub const NOISE_PHASE_STEP: f32 = 0.3;

/// Number of LEDs on the bank.
pub const LED_COUNT: u8 = 8;

/// Anything that maps `x` to a prediction in `[-1.0, 1.0]`.
pub trait Predictor {
    fn predict(&mut self, x: f32) -> f32;
}

/// `sin(x)` plus call-count-dependent error, clamped to `[-1.0, 1.0]`.
#[derive(Debug, Clone, Default)]
pub struct SineOracle {
    call_count: u32,
}

impl SineOracle {
    pub const fn new() -> Self {
        Self { call_count: 0 }
    }

    /// Number of predictions made so far.
    pub fn call_count(&self) -> u32 {
        self.call_count
    }
}

impl Predictor for SineOracle {
    fn predict(&mut self, x: f32) -> f32 {
        self.call_count = self.call_count.wrapping_add(1);
        let error = NOISE_AMPLITUDE * libm::sinf(self.call_count as f32 * NOISE_PHASE_STEP);
        (libm::sinf(x) + error).clamp(-1.0, 1.0)
    }
}

/// Map a prediction in `[-1, 1]` to `0..=255`.
///
/// Out-of-range input is clamped; scaling truncates.
pub fn led_choice(prediction: f32) -> u8 {
    let normalized = ((prediction + 1.0) / 2.0).clamp(0.0, 1.0);
    (normalized * 255.0) as u8
}

/// How many LEDs to light for an LED value: `value * 9 / 256`, at most 8.
pub fn leds_on_count(led_value: u8) -> u8 {
    ((led_value as u16 * 9 / 256) as u8).min(LED_COUNT)
}

/// Bitmask with the low `count` bits set.
pub fn led_mask(count: u8) -> u8 {
    match count {
        0 => 0,
        n if n >= LED_COUNT => u8::MAX,
        n => (1u8 << n) - 1,
    }
}
