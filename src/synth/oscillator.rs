//! Sine wave oscillator.

use crate::core::{Pitched, Signal};
use std::f64::consts::PI;

/// A phase-accumulating sine oscillator.
///
/// Phase is kept continuous across frequency changes, so a sweep built by
/// retuning the oscillator every sample has no discontinuities.
///
/// # Type Parameters
///
/// * `SAMPLE_RATE` - Sample rate in Hz (e.g., 44100 for CD quality)
#[derive(Debug, Clone)]
pub struct SineOscillator<const SAMPLE_RATE: u32> {
    /// Current phase of the oscillator (0.0 to 1.0)
    phase: f64,
    /// Phase increment per sample (frequency / sample_rate)
    phase_increment: f64,
}

impl<const SAMPLE_RATE: u32> SineOscillator<SAMPLE_RATE> {
    /// Creates a new sine oscillator starting at phase zero.
    ///
    /// # Arguments
    ///
    /// * `frequency` - Frequency of the sine wave in Hz
    ///
    /// # Examples
    ///
    /// ```
    /// use earshot::{Signal, SineOscillator};
    ///
    /// let mut osc = SineOscillator::<44100>::new(440.0);
    /// assert_eq!(osc.next_sample(), 0.0);
    /// ```
    pub fn new(frequency: f64) -> Self {
        Self {
            phase: 0.0,
            phase_increment: frequency / SAMPLE_RATE as f64,
        }
    }
}

impl<const SAMPLE_RATE: u32> Signal for SineOscillator<SAMPLE_RATE> {
    fn next_sample(&mut self) -> f64 {
        let sample = (self.phase * 2.0 * PI).sin();

        // Wrap to [0.0, 1.0)
        self.phase = (self.phase + self.phase_increment).rem_euclid(1.0);

        sample
    }
}

impl<const SAMPLE_RATE: u32> Pitched for SineOscillator<SAMPLE_RATE> {
    fn set_frequency(&mut self, frequency: f64) {
        self.phase_increment = frequency / SAMPLE_RATE as f64;
    }

    fn frequency(&self) -> f64 {
        self.phase_increment * SAMPLE_RATE as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_closed_form_sine() {
        let mut osc = SineOscillator::<44100>::new(440.0);
        for i in 0..1000 {
            let t = i as f64 / 44100.0;
            let expected = (2.0 * PI * 440.0 * t).sin();
            assert!((osc.next_sample() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_frequency_change() {
        let mut osc = SineOscillator::<44100>::new(440.0);
        osc.set_frequency(880.0);
        assert_eq!(osc.frequency(), 880.0);
    }

    #[test]
    fn test_sample_range() {
        let mut osc = SineOscillator::<44100>::new(440.0);
        for _ in 0..44100 {
            let sample = osc.next_sample();
            assert!((-1.0..=1.0).contains(&sample));
        }
    }

    #[test]
    fn test_phase_wrapping() {
        let mut osc = SineOscillator::<44100>::new(1000.0);
        for _ in 0..100000 {
            osc.next_sample();
        }
        assert!(osc.phase >= 0.0 && osc.phase < 1.0);
    }

    #[test]
    fn test_zero_frequency_is_silent() {
        let mut osc = SineOscillator::<44100>::new(0.0);
        assert_eq!(osc.next_sample(), 0.0);
        assert_eq!(osc.next_sample(), 0.0);
    }
}
