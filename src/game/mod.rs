//! Game simulation.
//!
//! [`GameState`] holds the ball and the streaks and exposes each transition as
//! a method returning [`Cue`]s. [`GameLoop`] polls input, ticks the state at a
//! fixed rate, and acts out the cues against the mixer.

mod limiter;
mod runner;
mod state;

pub use limiter::FrameLimiter;
pub use runner::{GameLoop, Step};
pub use state::{
    ARM_LINE, Ball, Cue, GameState, HIT_SPEEDUP, MISS_LINE, RESPAWN_LINE, RESPAWN_SPREAD, Streaks,
    Winner,
};
