//! A sample buffer paired with its playback position.

use crate::synth::{Frame, SampleBuffer};

/// An active sound in the mixer.
///
/// The cursor is the index of the next unread frame. A clip is exhausted once
/// the cursor reaches the end of its buffer.
#[derive(Debug)]
pub struct Clip {
    buffer: SampleBuffer,
    cursor: usize,
}

impl Clip {
    /// Wraps a buffer with the cursor at the first frame.
    pub fn new(buffer: SampleBuffer) -> Self {
        Self { buffer, cursor: 0 }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Frames left to play.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.buffer.len()
    }

    /// Adds the next frames of the clip into `out`, starting at `out[0]`.
    ///
    /// Copies `min(out.len(), remaining)` frames and advances the cursor by
    /// that count.
    ///
    /// # Returns
    ///
    /// The number of frames mixed
    pub fn mix_into(&mut self, out: &mut [Frame]) -> usize {
        let count = out.len().min(self.remaining());
        let source = &self.buffer.frames()[self.cursor..self.cursor + count];
        for (dst, src) in out.iter_mut().zip(source) {
            *dst += *src;
        }
        self.cursor += count;
        count
    }

    /// Releases the underlying buffer.
    pub fn into_buffer(self) -> SampleBuffer {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(len: usize) -> SampleBuffer {
        (0..len).map(|i| Frame::mono(i as f32)).collect()
    }

    #[test]
    fn test_new_clip_starts_at_zero() {
        let clip = Clip::new(ramp(5));
        assert_eq!(clip.cursor(), 0);
        assert_eq!(clip.remaining(), 5);
        assert!(!clip.is_exhausted());
    }

    #[test]
    fn test_mix_into_adds_and_advances() {
        let mut clip = Clip::new(ramp(5));
        let mut out = vec![Frame::mono(10.0); 3];

        assert_eq!(clip.mix_into(&mut out), 3);
        assert_eq!(out, vec![Frame::mono(10.0), Frame::mono(11.0), Frame::mono(12.0)]);
        assert_eq!(clip.cursor(), 3);

        let mut out = vec![Frame::SILENCE; 3];
        assert_eq!(clip.mix_into(&mut out), 2);
        assert_eq!(out, vec![Frame::mono(3.0), Frame::mono(4.0), Frame::SILENCE]);
        assert!(clip.is_exhausted());
    }

    #[test]
    fn test_exhausted_clip_mixes_nothing() {
        let mut clip = Clip::new(ramp(2));
        let mut out = vec![Frame::SILENCE; 4];
        clip.mix_into(&mut out);

        let mut out = vec![Frame::SILENCE; 4];
        assert_eq!(clip.mix_into(&mut out), 0);
        assert!(out.iter().all(|f| *f == Frame::SILENCE));
    }
}
