//! Per-sample generator trait and pitch control.

/// Common interface for per-sample generators.
///
/// Oscillators produce audio-rate waveforms, envelopes produce gain curves.
/// Both are consumed one sample at a time by the tone builders.
pub trait Signal {
    /// Generates the next sample from the signal.
    ///
    /// # Returns
    ///
    /// A sample value, between -1.0 and 1.0 for waveforms and between 0.0 and
    /// 1.0 for gain curves
    fn next_sample(&mut self) -> f64;

    /// Generates multiple samples into a buffer.
    ///
    /// Default implementation calls `next_sample()` for each element.
    ///
    /// # Arguments
    ///
    /// * `buffer` - Mutable slice to fill with samples
    fn process(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }
}

/// Minimal trait for anything with a controllable pitch.
///
/// Frequency sweeps retune their oscillator every sample through this trait.
///
/// # Examples
///
/// ```
/// use earshot::{Pitched, SineOscillator};
///
/// let mut osc = SineOscillator::<44100>::new(440.0);
/// assert_eq!(osc.frequency(), 440.0);
///
/// osc.set_frequency(880.0);
/// assert_eq!(osc.frequency(), 880.0);
/// ```
pub trait Pitched {
    /// Sets the frequency of the signal in Hz.
    fn set_frequency(&mut self, freq: f64);

    /// Gets the current frequency of the signal in Hz.
    fn frequency(&self) -> f64;
}
