//! Real-time clip mixing.
//!
//! The simulation thread enqueues finished sample buffers, the audio thread
//! pulls mixed blocks out. See [`MixBus`] for the locking contract.

mod bus;
mod clip;

pub use bus::{CLIP_LIMIT, MixBus};
pub use clip::Clip;
