//! Thread-safe clip mixer.

use super::clip::Clip;
use crate::synth::{Frame, SampleBuffer};
use parking_lot::Mutex;

/// Output samples are hard-clipped to `[-CLIP_LIMIT, CLIP_LIMIT]`.
pub const CLIP_LIMIT: f32 = 0.9;

const INITIAL_CAPACITY: usize = 32;

#[derive(Debug)]
struct Inner {
    active: Vec<Clip>,
    /// Finished buffers waiting to be freed off the audio thread.
    retired: Vec<SampleBuffer>,
}

impl Inner {
    /// A render pass retires at most one buffer per active clip, so the
    /// retired list only needs replacing once it holds something or could
    /// overflow.
    fn retired_needs_swap(&self) -> bool {
        !self.retired.is_empty() || self.retired.capacity() < self.active.len()
    }
}

/// Sums any number of overlapping clips into one stereo stream.
///
/// The producer side calls [`MixBus::enqueue`] from the simulation thread, the
/// consumer side calls [`MixBus::render_into`] from the audio callback. A single
/// lock covers both, so a render pass never sees a clip half-inserted, and a
/// clip enqueued before a pass always starts from its first frame.
///
/// Exhausted buffers are moved to a retired list during rendering and dropped
/// later by the producer side, so the audio thread never frees memory.
///
/// # Examples
///
/// ```
/// use earshot::{Frame, MixBus, SampleBuffer};
///
/// let bus = MixBus::new();
/// bus.enqueue(vec![Frame::mono(0.25); 3].into());
/// bus.enqueue(vec![Frame::mono(0.5); 2].into());
///
/// let out = bus.render(4);
/// assert_eq!(out[0], Frame::mono(0.75));
/// assert_eq!(out[2], Frame::mono(0.25));
/// assert_eq!(out[3], Frame::SILENCE);
/// assert_eq!(bus.active_clips(), 0);
/// ```
#[derive(Debug)]
pub struct MixBus {
    inner: Mutex<Inner>,
}

impl MixBus {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Creates a bus with room for `capacity` simultaneous clips before the
    /// clip list has to grow.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                active: Vec::with_capacity(capacity),
                retired: Vec::with_capacity(capacity),
            }),
        }
    }

    /// Starts playing `buffer` from its first frame on the next render pass.
    ///
    /// Empty buffers are ignored. Never call this from inside a render pass.
    pub fn enqueue(&self, buffer: SampleBuffer) {
        if buffer.is_empty() {
            return;
        }
        self.inner.lock().active.push(Clip::new(buffer));
        drop(self.take_retired());
    }

    /// Frees buffers of clips that have finished playing.
    ///
    /// Call periodically from the producer thread.
    pub fn reclaim(&self) {
        drop(self.take_retired());
    }

    /// Swaps the retired list for an empty one with room for every active
    /// clip and hands back the old list.
    ///
    /// The replacement is allocated with the lock released. If more clips
    /// arrived in the meantime it is too small and the swap is retried.
    fn take_retired(&self) -> Vec<SampleBuffer> {
        loop {
            let capacity = {
                let inner = self.inner.lock();
                if !inner.retired_needs_swap() {
                    return Vec::new();
                }
                inner.active.capacity().max(INITIAL_CAPACITY)
            };

            let mut spare = Vec::with_capacity(capacity);
            let mut inner = self.inner.lock();
            if spare.capacity() >= inner.active.len() {
                std::mem::swap(&mut inner.retired, &mut spare);
                return spare;
            }
        }
    }

    /// Renders `frame_count` frames into a new buffer.
    pub fn render(&self, frame_count: usize) -> Vec<Frame> {
        let mut out = vec![Frame::SILENCE; frame_count];
        self.render_into(&mut out);
        out
    }

    /// Renders one block into `out`, overwriting its contents.
    ///
    /// Every active clip contributes its next `min(out.len(), remaining)`
    /// frames at offset zero. Clips that reach their end are removed, and the
    /// summed output is hard-clipped to [`CLIP_LIMIT`].
    pub fn render_into(&self, out: &mut [Frame]) {
        out.fill(Frame::SILENCE);

        {
            let mut inner = self.inner.lock();
            let Inner { active, retired } = &mut *inner;

            let mut i = 0;
            while i < active.len() {
                active[i].mix_into(out);
                if active[i].is_exhausted() {
                    retired.push(active.swap_remove(i).into_buffer());
                } else {
                    i += 1;
                }
            }
        }

        for frame in out.iter_mut() {
            *frame = frame.clip(CLIP_LIMIT);
        }
    }

    /// Renders `out` as consecutive passes of at most `block_size` frames.
    ///
    /// Keeps the pass size fixed when the device asks for more frames per
    /// callback than one block.
    pub fn render_blocks(&self, out: &mut [Frame], block_size: usize) {
        for chunk in out.chunks_mut(block_size.max(1)) {
            self.render_into(chunk);
        }
    }

    /// Number of clips still playing.
    pub fn active_clips(&self) -> usize {
        self.inner.lock().active.len()
    }

    /// True when nothing is left to play.
    pub fn is_idle(&self) -> bool {
        self.active_clips() == 0
    }
}

impl Default for MixBus {
    fn default() -> Self {
        Self::new()
    }
}
