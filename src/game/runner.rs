//! The simulation loop and its cue scheduler.

use super::limiter::FrameLimiter;
use super::state::{Cue, GameState};
use crate::config::GameConfig;
use crate::error::Result;
use crate::input::{InputAdapter, InputEvent};
use crate::mixer::MixBus;
use crate::sounds::Sound;
use crate::SAMPLE_RATE;
use rand::Rng;
use std::collections::VecDeque;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Outcome of one [`GameLoop::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A tick ran.
    Ticked,
    /// A scheduled pause is in effect until the given time. No tick ran and
    /// no input was read.
    Paused(Instant),
    /// The input device went away. No tick ran.
    DeviceLost,
    /// The player asked to quit.
    Quit,
}

/// Drives [`GameState`] from player input and turns its cues into sound.
///
/// Pauses are scheduled rather than slept inside transitions: while one is
/// pending, [`step`](GameLoop::step) neither ticks nor reads input. The mixer
/// runs on the audio thread and is unaffected.
pub struct GameLoop<I, R> {
    state: GameState,
    bus: Arc<MixBus>,
    input: I,
    rng: R,
    config: GameConfig,
    pending: VecDeque<Cue>,
    resume_at: Option<Instant>,
    events: Vec<InputEvent>,
}

impl<I: InputAdapter, R: Rng> GameLoop<I, R> {
    pub fn new(bus: Arc<MixBus>, input: I, rng: R, config: GameConfig, now: Instant) -> Self {
        Self {
            state: GameState::new(now, config.win_streak),
            bus,
            input,
            rng,
            config,
            pending: VecDeque::new(),
            resume_at: None,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// True while a scheduled pause is holding off ticks.
    pub fn is_paused(&self, now: Instant) -> bool {
        self.resume_at.is_some_and(|until| now < until) || !self.pending.is_empty()
    }

    /// Schedules the opening: the startup delay, the intro jingle and its rest.
    pub fn start(&mut self, now: Instant) {
        let mut cues = vec![Cue::Pause(self.config.startup_delay)];
        cues.extend(GameState::intro());
        // proximity tones start counting from the first tick, not from here
        self.state.last_tone = now + total_pause(&cues);
        self.schedule(cues, now);
    }

    /// Advances the loop by one turn.
    ///
    /// Plays any cues that have come due. If a pause is still in effect,
    /// returns without ticking. Otherwise reads input and runs one tick.
    pub fn step(&mut self, now: Instant) -> Result<Step> {
        self.bus.reclaim();

        if !self.drain(now) {
            // drain leaves resume_at set whenever it reports a pause
            return Ok(Step::Paused(self.resume_at.unwrap_or(now)));
        }

        if !self.input.is_connected() {
            return Ok(Step::DeviceLost);
        }

        self.events.clear();
        self.input.poll(&mut self.events)?;
        let quit_at = self.events.iter().position(|e| *e == InputEvent::Quit);
        let presses = self.events[..quit_at.unwrap_or(self.events.len())]
            .iter()
            .filter(|e| **e == InputEvent::ButtonPress)
            .count();

        let cues = self.state.tick(now, presses, &mut self.rng);
        self.schedule(cues, now);

        if quit_at.is_some() {
            tracing::info!("quit requested");
            return Ok(Step::Quit);
        }
        Ok(Step::Ticked)
    }

    /// Runs until the player quits.
    ///
    /// Waits for an input device first. If the device disappears mid-game the
    /// loop pauses until it is back.
    pub fn run(mut self) -> Result<()> {
        tracing::info!("waiting for an input device");
        self.input.wait_for_device()?;
        tracing::info!("input device ready, starting shortly");

        let mut limiter = FrameLimiter::new(self.config.tick_period(), Instant::now());
        self.start(Instant::now());

        loop {
            let now = Instant::now();
            match self.step(now)? {
                Step::Ticked => limiter.wait(),
                Step::Paused(until) => {
                    thread::sleep(until.saturating_duration_since(now));
                    limiter.reset(Instant::now());
                }
                Step::DeviceLost => {
                    tracing::warn!("input device lost, pausing until it returns");
                    self.input.wait_for_device()?;
                    tracing::info!("input device back, resuming");
                    limiter.reset(Instant::now());
                }
                Step::Quit => return Ok(()),
            }
        }
    }

    fn schedule(&mut self, cues: Vec<Cue>, now: Instant) {
        self.pending.extend(cues);
        self.drain(now);
    }

    /// Acts out pending cues up to the next pause that has not elapsed.
    ///
    /// Returns true once nothing is pending. Consecutive pauses chain from the
    /// previous deadline so the schedule does not drift with tick jitter.
    fn drain(&mut self, now: Instant) -> bool {
        let mut clock = now;
        loop {
            if let Some(until) = self.resume_at {
                if now < until {
                    return false;
                }
                clock = until;
                self.resume_at = None;
            }
            match self.pending.pop_front() {
                None => return true,
                Some(Cue::Play(sound)) => self.play(sound),
                Some(Cue::Pause(duration)) => self.resume_at = Some(clock + duration),
            }
        }
    }

    fn play(&self, sound: Sound) {
        tracing::trace!(?sound, "enqueue");
        self.bus.enqueue(sound.render::<SAMPLE_RATE>());
    }
}

/// Time the schedule spends paused. Pauses chain, so this is also how long it
/// runs.
fn total_pause(cues: &[Cue]) -> Duration {
    cues.iter()
        .filter_map(|cue| match cue {
            Cue::Pause(duration) => Some(*duration),
            Cue::Play(_) => None,
        })
        .sum()
}
