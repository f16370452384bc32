//! Procedural tone synthesis.
//!
//! Pure, stateless generation of stereo [`SampleBuffer`]s from a handful of
//! semantic parameters: frequency, duration, volume, pan, extra partials,
//! decay and pitch glide.

mod envelope;
mod frame;
mod oscillator;
mod tone;

pub use envelope::{EdgeFade, LinearRamp};
pub use frame::{Frame, SampleBuffer};
pub use oscillator::SineOscillator;
pub use tone::{DEFAULT_VOLUME, EDGE_FADE_SECONDS, Melody, Tone, pan_gains, tone};
