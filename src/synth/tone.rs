//! Tone and melody builders.
//!
//! Every sound is rendered by one primitive, [`Tone::render`]: a sum of sine
//! partials, optionally glided to a new pitch, shaped by a linear decay and a
//! fixed edge fade, then split to stereo with a linear pan law. Chords, sweeps
//! and melodies are all expressed through it.

use super::envelope::{EdgeFade, LinearRamp};
use super::frame::{Frame, SampleBuffer};
use super::oscillator::SineOscillator;
use crate::core::{Pitched, Signal};

/// Default tone volume.
pub const DEFAULT_VOLUME: f64 = 0.3;

/// Length of the fade applied at each end of every tone, in seconds.
pub const EDGE_FADE_SECONDS: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Partial {
    frequency: f64,
    weight: f64,
}

/// A single synthesized sound event.
///
/// # Type Parameters
///
/// * `SAMPLE_RATE` - Sample rate in Hz of the rendered buffer
///
/// # Examples
///
/// ```
/// use earshot::Tone;
///
/// // Two-partial chord that decays to silence
/// let buffer = Tone::<44100>::new(600.0, 0.1)
///     .with_partial(900.0, 0.5)
///     .with_decay(0.0)
///     .render();
/// assert_eq!(buffer.len(), 4410);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Tone<const SAMPLE_RATE: u32> {
    partials: Vec<Partial>,
    duration: f64,
    volume: f64,
    pan: f64,
    decay_to: f64,
    glide_to: Option<f64>,
}

impl<const SAMPLE_RATE: u32> Tone<SAMPLE_RATE> {
    /// Creates a sine tone at full weight with the default volume, centred.
    ///
    /// Non-finite or negative frequencies are treated as 0 Hz (silence), and
    /// non-positive durations produce an empty buffer.
    ///
    /// # Arguments
    ///
    /// * `frequency` - Fundamental frequency in Hz
    /// * `duration` - Length of the tone in seconds
    pub fn new(frequency: f64, duration: f64) -> Self {
        Self {
            partials: vec![Partial {
                frequency: sanitize_frequency(frequency),
                weight: 1.0,
            }],
            duration: if duration.is_finite() {
                duration.max(0.0)
            } else {
                0.0
            },
            volume: DEFAULT_VOLUME,
            pan: 0.0,
            decay_to: 1.0,
            glide_to: None,
        }
    }

    /// Sets the output volume, clamped to [0, 1].
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = if volume.is_nan() {
            0.0
        } else {
            volume.clamp(0.0, 1.0)
        };
        self
    }

    /// Sets the stereo position, clamped to [-1, 1] (-1 = full left).
    pub fn with_pan(mut self, pan: f64) -> Self {
        self.pan = if pan.is_nan() { 0.0 } else { pan.clamp(-1.0, 1.0) };
        self
    }

    /// Adds another sine component with its own weight.
    pub fn with_partial(mut self, frequency: f64, weight: f64) -> Self {
        self.partials.push(Partial {
            frequency: sanitize_frequency(frequency),
            weight,
        });
        self
    }

    /// Decays the amplitude linearly from full level to `level` over the tone.
    pub fn with_decay(mut self, level: f64) -> Self {
        self.decay_to = level;
        self
    }

    /// Glides the fundamental linearly to `frequency` by the last frame.
    ///
    /// Extra partials keep their ratio to the fundamental.
    pub fn glide_to(mut self, frequency: f64) -> Self {
        self.glide_to = Some(sanitize_frequency(frequency));
        self
    }

    /// Number of frames the rendered buffer will contain.
    pub fn frame_count(&self) -> usize {
        (SAMPLE_RATE as f64 * self.duration).round() as usize
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Renders the tone into a stereo buffer.
    pub fn render(&self) -> SampleBuffer {
        let len = self.frame_count();
        let fade_window = (SAMPLE_RATE as f64 * EDGE_FADE_SECONDS).round() as usize;

        let mut oscillators: Vec<SineOscillator<SAMPLE_RATE>> = self
            .partials
            .iter()
            .map(|p| SineOscillator::new(p.frequency))
            .collect();
        let mut decay = LinearRamp::new(1.0, self.decay_to, len);
        let mut fade = EdgeFade::new(len, fade_window);
        let mut glide = self
            .glide_to
            .map(|target| LinearRamp::new(self.fundamental(), target, len));
        let (left, right) = pan_gains(self.volume, self.pan);

        (0..len)
            .map(|_| {
                if let Some(glide) = glide.as_mut() {
                    self.retune(&mut oscillators, glide.next_sample());
                }
                let wave: f64 = oscillators
                    .iter_mut()
                    .zip(&self.partials)
                    .map(|(osc, partial)| osc.next_sample() * partial.weight)
                    .sum();
                let sample = wave * decay.next_sample() * fade.next_sample();
                Frame::new((sample * left) as f32, (sample * right) as f32)
            })
            .collect()
    }

    fn fundamental(&self) -> f64 {
        self.partials[0].frequency
    }

    fn retune(&self, oscillators: &mut [SineOscillator<SAMPLE_RATE>], fundamental: f64) {
        let base = self.fundamental();
        for (osc, partial) in oscillators.iter_mut().zip(&self.partials) {
            let ratio = if base > 0.0 {
                partial.frequency / base
            } else {
                1.0
            };
            osc.set_frequency(fundamental * ratio);
        }
    }
}

/// Renders a plain sine tone.
///
/// Left and right gains follow `left = volume * (1 - max(0, pan))` and
/// `right = volume * (1 + min(0, pan))`.
///
/// # Examples
///
/// ```
/// use earshot::synth::tone;
///
/// let buffer = tone::<44100>(440.0, 0.08, 0.4, -1.0);
/// assert_eq!(buffer.len(), 3528);
/// assert!(buffer.frames().iter().all(|f| f.right == 0.0));
/// ```
pub fn tone<const SAMPLE_RATE: u32>(
    frequency: f64,
    duration: f64,
    volume: f64,
    pan: f64,
) -> SampleBuffer {
    Tone::<SAMPLE_RATE>::new(frequency, duration)
        .with_volume(volume)
        .with_pan(pan)
        .render()
}

/// A sequence of tones played back to back, each with its own envelope.
///
/// # Examples
///
/// ```
/// use earshot::{Melody, Tone};
///
/// let melody = Melody::<44100>::from_notes(&[440.0, 554.0, 659.0], 0.1, |tone| {
///     tone.with_decay(0.0)
/// });
/// assert_eq!(melody.render().len(), 3 * 4410);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Melody<const SAMPLE_RATE: u32> {
    notes: Vec<Tone<SAMPLE_RATE>>,
}

impl<const SAMPLE_RATE: u32> Melody<SAMPLE_RATE> {
    pub fn new() -> Self {
        Self { notes: Vec::new() }
    }

    /// Builds a melody of equal-length notes, shaping each with `shape`.
    pub fn from_notes(
        frequencies: &[f64],
        note_duration: f64,
        shape: impl Fn(Tone<SAMPLE_RATE>) -> Tone<SAMPLE_RATE>,
    ) -> Self {
        Self {
            notes: frequencies
                .iter()
                .map(|&freq| shape(Tone::new(freq, note_duration)))
                .collect(),
        }
    }

    /// Appends a note.
    pub fn with_note(mut self, note: Tone<SAMPLE_RATE>) -> Self {
        self.notes.push(note);
        self
    }

    /// Total length in seconds.
    pub fn duration(&self) -> f64 {
        self.notes.iter().map(Tone::duration).sum()
    }

    pub fn render(&self) -> SampleBuffer {
        SampleBuffer::concat(self.notes.iter().map(Tone::render))
    }
}

/// Per-channel gains for a linear pan law.
pub fn pan_gains(volume: f64, pan: f64) -> (f64, f64) {
    let left = volume * (1.0 - pan.max(0.0));
    let right = volume * (1.0 + pan.min(0.0));
    (left, right)
}

fn sanitize_frequency(frequency: f64) -> f64 {
    if frequency.is_finite() {
        frequency.max(0.0)
    } else {
        0.0
    }
}
