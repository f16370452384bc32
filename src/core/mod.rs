//! Core signal abstractions.
//!
//! Every generator in the synth layer (oscillators, envelopes) is a `Signal`:
//! something that yields one value per sample. Tone builders pull from several
//! signals in lockstep and multiply them together.

mod signal;

pub use signal::{Pitched, Signal};
