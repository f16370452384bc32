//! Earshot - an audio-only bounce-and-return arcade game
//!
//! A ball travels across a one-dimensional court and the player presses a
//! single button to send it back before it crosses the line. There is nothing
//! to see: position is conveyed by pitch and stereo placement, and every game
//! event has its own synthesized sound.
//!
//! The crate is built from three layers:
//! - [`synth`]: pure generation of stereo sample buffers (tones, chords,
//!   sweeps, melodies)
//! - [`mixer`]: a thread-safe bus that sums overlapping clips for a real-time
//!   audio callback
//! - [`game`]: the simulation state machine and the loop that schedules its
//!   sounds
//!
//! Live playback (`driver`) and gamepad input are behind the `playback` and
//! `gamepad` features.

pub mod config;
pub mod core;
#[cfg(feature = "playback")]
pub mod driver;
pub mod error;
pub mod game;
pub mod input;
pub mod mixer;
pub mod sounds;
pub mod synth;

/// Output sample rate in Hz.
pub const SAMPLE_RATE: u32 = 44100;

// Re-export commonly used types at the crate root
pub use config::{AudioConfig, GameConfig, Latency};
pub use crate::core::{Pitched, Signal};
#[cfg(feature = "playback")]
pub use driver::AudioDriver;
pub use error::{Error, Result};
pub use game::{Cue, GameLoop, GameState, Step};
pub use input::{InputAdapter, InputEvent, KeyboardInput};
#[cfg(feature = "gamepad")]
pub use input::GamepadInput;
pub use mixer::{CLIP_LIMIT, Clip, MixBus};
pub use sounds::Sound;
pub use synth::{EdgeFade, Frame, LinearRamp, Melody, SampleBuffer, SineOscillator, Tone};
