//! Stereo frames and immutable sample buffers.

use std::ops::{Add, AddAssign};

/// One stereo sample pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    pub left: f32,
    pub right: f32,
}

impl Frame {
    /// A frame of exact silence.
    pub const SILENCE: Frame = Frame {
        left: 0.0,
        right: 0.0,
    };

    pub fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }

    /// Creates a frame with the same value on both channels.
    pub fn mono(value: f32) -> Self {
        Self {
            left: value,
            right: value,
        }
    }

    /// Hard-clips both channels to `[-limit, limit]`.
    pub fn clip(self, limit: f32) -> Self {
        Self {
            left: self.left.clamp(-limit, limit),
            right: self.right.clamp(-limit, limit),
        }
    }

    /// Largest absolute sample value of the two channels.
    pub fn peak(&self) -> f32 {
        self.left.abs().max(self.right.abs())
    }
}

impl Add for Frame {
    type Output = Frame;

    fn add(self, rhs: Frame) -> Frame {
        Frame {
            left: self.left + rhs.left,
            right: self.right + rhs.right,
        }
    }
}

impl AddAssign for Frame {
    fn add_assign(&mut self, rhs: Frame) {
        self.left += rhs.left;
        self.right += rhs.right;
    }
}

/// An immutable run of stereo frames produced by the synth layer.
///
/// Buffers are built once and then moved into the mixer, which owns them
/// until every frame has been played.
///
/// # Examples
///
/// ```
/// use earshot::{Frame, SampleBuffer};
///
/// let buffer: SampleBuffer = vec![Frame::mono(0.5); 4].into();
/// assert_eq!(buffer.len(), 4);
/// assert_eq!(buffer.frames()[0].left, 0.5);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleBuffer {
    frames: Vec<Frame>,
}

impl SampleBuffer {
    /// Number of stereo frames in the buffer.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Joins buffers back to back into a single buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use earshot::{Frame, SampleBuffer};
    ///
    /// let a: SampleBuffer = vec![Frame::mono(0.1); 2].into();
    /// let b: SampleBuffer = vec![Frame::mono(0.2); 3].into();
    /// let joined = SampleBuffer::concat([a, b]);
    /// assert_eq!(joined.len(), 5);
    /// assert_eq!(joined.frames()[2], Frame::mono(0.2));
    /// ```
    pub fn concat(parts: impl IntoIterator<Item = SampleBuffer>) -> Self {
        let mut frames = Vec::new();
        for part in parts {
            frames.extend_from_slice(&part.frames);
        }
        Self { frames }
    }
}

impl From<Vec<Frame>> for SampleBuffer {
    fn from(frames: Vec<Frame>) -> Self {
        Self { frames }
    }
}

impl FromIterator<Frame> for SampleBuffer {
    fn from_iter<I: IntoIterator<Item = Frame>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_limits_both_channels() {
        let frame = Frame::new(1.4, -2.0).clip(0.9);
        assert_eq!(frame, Frame::new(0.9, -0.9));
    }

    #[test]
    fn test_clip_leaves_in_range_values() {
        let frame = Frame::new(0.25, -0.5);
        assert_eq!(frame.clip(0.9), frame);
    }

    #[test]
    fn test_add_assign_sums_channels() {
        let mut frame = Frame::new(0.1, 0.2);
        frame += Frame::new(0.3, -0.2);
        assert!((frame.left - 0.4).abs() < 1e-6);
        assert_eq!(frame.right, 0.0);
    }

    #[test]
    fn test_peak() {
        assert_eq!(Frame::new(0.3, -0.7).peak(), 0.7);
        assert_eq!(Frame::SILENCE.peak(), 0.0);
    }

    #[test]
    fn test_concat_of_nothing_is_empty() {
        let joined = SampleBuffer::concat(Vec::new());
        assert!(joined.is_empty());
    }
}
