//! The game's sound palette.
//!
//! Each game event maps to one [`Sound`], rendered on demand by the synth layer.

use crate::synth::{Melody, SampleBuffer, Tone};
use std::time::Duration;

const INTRO_NOTES: [f64; 3] = [440.0, 554.0, 659.0];
const WIN_NOTES: [f64; 4] = [523.0, 659.0, 784.0, 1047.0];
const LOSE_NOTES: [f64; 4] = [392.0, 349.0, 294.0, 220.0];

/// A sound cue triggered by the game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sound {
    /// Continuous position cue: pitch follows `y`, stereo position follows `x`.
    Proximity { x: f64, y: f64 },
    /// The ball was returned.
    Hit,
    /// The button was pressed while the ball was out of reach.
    MissPress,
    /// The ball got past the player.
    Miss,
    /// Falling sweep that follows a miss.
    Fall,
    /// Round start jingle.
    Intro,
    /// The defender reached the winning streak.
    Win,
    /// The attacker reached the winning streak.
    Lose,
}

impl Sound {
    /// Renders the sound at the given sample rate.
    ///
    /// # Examples
    ///
    /// ```
    /// use earshot::Sound;
    ///
    /// let hit = Sound::Hit.render::<44100>();
    /// assert_eq!(hit.len(), 4410);
    /// ```
    pub fn render<const SAMPLE_RATE: u32>(&self) -> SampleBuffer {
        match *self {
            Sound::Proximity { x, y } => Tone::<SAMPLE_RATE>::new(200.0 + y * 600.0, 0.08)
                .with_volume(0.4)
                .with_pan(x)
                .render(),
            Sound::Hit => Tone::<SAMPLE_RATE>::new(600.0, 0.1)
                .with_partial(900.0, 0.5)
                .with_decay(0.0)
                .render(),
            Sound::MissPress => Tone::<SAMPLE_RATE>::new(200.0, 0.15)
                .with_partial(250.0, 0.3)
                .with_decay(0.0)
                .render(),
            Sound::Miss => Tone::<SAMPLE_RATE>::new(150.0, 0.3)
                .with_volume(0.4)
                .with_decay(0.0)
                .render(),
            Sound::Fall => Tone::<SAMPLE_RATE>::new(300.0, 0.25)
                .glide_to(100.0)
                .with_volume(0.35)
                .with_decay(0.0)
                .render(),
            Sound::Intro => Melody::<SAMPLE_RATE>::from_notes(&INTRO_NOTES, 0.1, |note| {
                note.with_decay(0.0)
            })
            .render(),
            Sound::Win => WIN_NOTES
                .iter()
                .fold(Melody::<SAMPLE_RATE>::new(), |melody, &freq| {
                    melody.with_note(
                        Tone::new(freq, 0.15)
                            .with_partial(freq * 2.0, 0.3)
                            .with_volume(0.35)
                            .with_decay(0.3),
                    )
                })
                .render(),
            Sound::Lose => Melody::<SAMPLE_RATE>::from_notes(&LOSE_NOTES, 0.2, |note| {
                note.with_volume(0.35).with_decay(0.0)
            })
            .render(),
        }
    }

    /// How long the game holds still after triggering this sound.
    pub fn settle(&self) -> Duration {
        match self {
            Sound::Intro => Duration::from_millis(350),
            Sound::Win => Duration::from_millis(650),
            Sound::Lose => Duration::from_millis(850),
            _ => Duration::ZERO,
        }
    }
}
