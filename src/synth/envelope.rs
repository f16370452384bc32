//! Gain envelopes for shaping tones.
//!
//! Both envelopes are `Signal`s that yield one gain value per sample, so a tone
//! is shaped by multiplying its waveform with each envelope in lockstep.

use crate::core::Signal;

/// Linear ramp between two levels across a fixed number of samples.
///
/// The first sample is exactly `from` and the last is exactly `to`. Past the
/// end the ramp holds at `to`.
///
/// # Examples
///
/// ```
/// use earshot::{LinearRamp, Signal};
///
/// let mut ramp = LinearRamp::new(1.0, 0.0, 5);
/// let levels: Vec<f64> = (0..5).map(|_| ramp.next_sample()).collect();
/// assert_eq!(levels, vec![1.0, 0.75, 0.5, 0.25, 0.0]);
/// ```
#[derive(Debug, Clone)]
pub struct LinearRamp {
    from: f64,
    to: f64,
    len: usize,
    position: usize,
}

impl LinearRamp {
    /// Creates a ramp from `from` to `to` spanning `len` samples.
    pub fn new(from: f64, to: f64, len: usize) -> Self {
        Self {
            from,
            to,
            len,
            position: 0,
        }
    }

    /// Level of the ramp at sample `index`.
    pub fn level_at(&self, index: usize) -> f64 {
        if self.len <= 1 {
            return self.from;
        }
        let t = index.min(self.len - 1) as f64 / (self.len - 1) as f64;
        self.from + (self.to - self.from) * t
    }
}

impl Signal for LinearRamp {
    fn next_sample(&mut self) -> f64 {
        let level = self.level_at(self.position);
        self.position = self.position.saturating_add(1);
        level
    }
}

/// Linear fade-in and fade-out applied at the edges of a buffer.
///
/// The fade windows are clamped to half the buffer length each, so short
/// buffers fade in to the midpoint and straight back out again.
///
/// # Examples
///
/// ```
/// use earshot::EdgeFade;
///
/// // 10 samples with a 3-sample window on each end
/// let fade = EdgeFade::new(10, 3);
/// assert_eq!(fade.gain_at(0), 0.0);
/// assert_eq!(fade.gain_at(2), 1.0);
/// assert_eq!(fade.gain_at(5), 1.0);
/// assert_eq!(fade.gain_at(9), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct EdgeFade {
    len: usize,
    window: usize,
    position: usize,
}

impl EdgeFade {
    /// Creates a fade for a buffer of `len` samples with `window` samples of
    /// fade at each end.
    pub fn new(len: usize, window: usize) -> Self {
        Self {
            len,
            window: window.min(len / 2),
            position: 0,
        }
    }

    /// Effective window length after clamping.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Gain at sample `index`.
    pub fn gain_at(&self, index: usize) -> f64 {
        if self.window == 0 {
            return 1.0;
        }
        let ramp = |offset: usize| {
            if self.window == 1 {
                0.0
            } else {
                offset as f64 / (self.window - 1) as f64
            }
        };

        if index >= self.len {
            0.0
        } else if index < self.window {
            ramp(index)
        } else if index >= self.len - self.window {
            1.0 - ramp(index - (self.len - self.window))
        } else {
            1.0
        }
    }
}

impl Signal for EdgeFade {
    fn next_sample(&mut self) -> f64 {
        let gain = self.gain_at(self.position);
        self.position = self.position.saturating_add(1);
        gain
    }
}
