//! Game state and its transitions.
//!
//! Transitions mutate the state immediately and return the [`Cue`]s the loop
//! should act out: sounds to enqueue and pauses during which no tick runs.

use crate::sounds::Sound;
use rand::Rng;
use std::time::{Duration, Instant};

/// The ball becomes returnable at or past this x position.
pub const ARM_LINE: f64 = 0.85;
/// Reaching this x position means the ball got past the player.
pub const MISS_LINE: f64 = 1.0;
/// The ball turns back inward at this x position.
pub const RESPAWN_LINE: f64 = -1.0;
/// Each successful return speeds the ball up by this factor.
pub const HIT_SPEEDUP: f64 = 1.05;
/// Maximum vertical speed picked when the ball turns back inward.
pub const RESPAWN_SPREAD: f64 = 0.015;

const MISS_GAP: Duration = Duration::from_millis(350);
const MISS_PAUSE: Duration = Duration::from_millis(500);
const ROUND_END_PAUSE: Duration = Duration::from_secs(2);
const INTRO_REST: Duration = Duration::from_secs(1);

/// Something the game loop has to act out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cue {
    /// Synthesize and enqueue a sound.
    Play(Sound),
    /// Hold off further cues, ticks and input for this long.
    Pause(Duration),
}

/// Ball position and velocity in court units.
///
/// `x` runs from the respawn line (-1) to the miss line (1), `y` spans the
/// court width from 0 to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

impl Ball {
    /// Ball state at the start of every round.
    pub const INITIAL: Ball = Ball {
        x: 0.0,
        y: 0.5,
        vx: -0.012,
        vy: 0.008,
    };
}

impl Default for Ball {
    fn default() -> Self {
        Ball::INITIAL
    }
}

/// Consecutive successes on each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Streaks {
    /// Successful returns by the player.
    pub defender: u32,
    /// Balls that got past the player.
    pub attacker: u32,
}

/// Who took the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Defender,
    Attacker,
}

/// Complete simulation state.
///
/// # Examples
///
/// ```
/// use earshot::game::{Cue, GameState};
/// use earshot::Sound;
/// use std::time::Instant;
///
/// let mut state = GameState::new(Instant::now(), 5);
/// state.ball.x = 0.9;
/// state.armed = true;
///
/// assert_eq!(state.press(), vec![Cue::Play(Sound::Hit)]);
/// assert_eq!(state.streaks.defender, 1);
/// assert!(!state.armed);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub ball: Ball,
    /// Set while the ball is in the returnable zone and not yet acted on.
    pub armed: bool,
    pub streaks: Streaks,
    /// When the last proximity tone was played.
    pub last_tone: Instant,
    win_streak: u32,
}

impl GameState {
    pub fn new(now: Instant, win_streak: u32) -> Self {
        Self {
            ball: Ball::INITIAL,
            armed: false,
            streaks: Streaks::default(),
            last_tone: now,
            win_streak,
        }
    }

    /// Cues for the round-start jingle and the rest that follows it.
    pub fn intro() -> Vec<Cue> {
        vec![
            Cue::Play(Sound::Intro),
            Cue::Pause(Sound::Intro.settle()),
            Cue::Pause(INTRO_REST),
        ]
    }

    /// Runs one simulation tick.
    ///
    /// Moves the ball, plays the proximity tone when due, applies `presses`
    /// button presses in order, and ends the round if a streak is complete.
    pub fn tick<R: Rng>(&mut self, now: Instant, presses: usize, rng: &mut R) -> Vec<Cue> {
        let mut cues = self.advance(rng);
        cues.extend(self.proximity(now));
        for _ in 0..presses {
            cues.extend(self.press());
        }
        cues.extend(self.finish_round());
        cues
    }

    /// Moves the ball one step and handles bounces, arming, misses and the
    /// turn at the far edge.
    pub fn advance<R: Rng>(&mut self, rng: &mut R) -> Vec<Cue> {
        let mut cues = Vec::new();
        let ball = &mut self.ball;

        ball.x += ball.vx;
        ball.y += ball.vy;

        if ball.y <= 0.0 || ball.y >= 1.0 {
            ball.vy = -ball.vy;
            ball.y = ball.y.clamp(0.0, 1.0);
        }

        if ball.x >= ARM_LINE {
            self.armed = true;
        }

        if ball.x >= MISS_LINE {
            if self.armed {
                self.streaks.attacker += 1;
                tracing::debug!(attacker = self.streaks.attacker, "ball got through");
                cues.extend([
                    Cue::Play(Sound::Miss),
                    Cue::Pause(MISS_GAP),
                    Cue::Play(Sound::Fall),
                ]);
            }
            ball.x = 0.0;
            ball.vx = -ball.vx.abs();
            self.armed = false;
            cues.push(Cue::Pause(MISS_PAUSE));
        }

        if ball.x <= RESPAWN_LINE {
            ball.vx = ball.vx.abs();
            ball.vy = (rng.gen_range(0.0..1.0) - 0.5) * 2.0 * RESPAWN_SPREAD;
        }

        cues
    }

    /// Interval between proximity tones at the current ball position.
    ///
    /// Shrinks as the ball nears the returnable zone.
    pub fn tone_interval(&self) -> Duration {
        Duration::from_secs_f64((0.1 + (1.0 - self.ball.x) * 0.3).max(0.0))
    }

    /// Plays the position cue if the last one is older than the interval.
    pub fn proximity(&mut self, now: Instant) -> Option<Cue> {
        if now.saturating_duration_since(self.last_tone) > self.tone_interval() {
            self.last_tone = now;
            Some(Cue::Play(Sound::Proximity {
                x: self.ball.x,
                y: self.ball.y,
            }))
        } else {
            None
        }
    }

    /// Handles a button press.
    ///
    /// While armed the ball is returned outward, faster. Otherwise the press
    /// only produces the miss-press sound.
    pub fn press(&mut self) -> Vec<Cue> {
        if !self.armed {
            return vec![Cue::Play(Sound::MissPress)];
        }

        self.streaks.defender += 1;
        self.ball.vx = -self.ball.vx.abs() * HIT_SPEEDUP;
        self.armed = false;
        tracing::debug!(defender = self.streaks.defender, vx = self.ball.vx, "ball returned");
        vec![Cue::Play(Sound::Hit)]
    }

    /// Side that has completed its streak, if any.
    pub fn winner(&self) -> Option<Winner> {
        if self.streaks.defender >= self.win_streak {
            Some(Winner::Defender)
        } else if self.streaks.attacker >= self.win_streak {
            Some(Winner::Attacker)
        } else {
            None
        }
    }

    /// Ends the round when a streak is complete: plays the result jingle,
    /// resets the state, and starts the next round with the intro.
    pub fn finish_round(&mut self) -> Vec<Cue> {
        let Some(winner) = self.winner() else {
            return Vec::new();
        };
        tracing::info!(?winner, streaks = ?self.streaks, "round over");

        let jingle = match winner {
            Winner::Defender => Sound::Win,
            Winner::Attacker => Sound::Lose,
        };
        self.reset();

        let mut cues = vec![
            Cue::Play(jingle),
            Cue::Pause(jingle.settle()),
            Cue::Pause(ROUND_END_PAUSE),
        ];
        cues.extend(Self::intro());
        cues
    }

    /// Puts the ball and both streaks back to their starting values.
    pub fn reset(&mut self) {
        self.ball = Ball::INITIAL;
        self.armed = false;
        self.streaks = Streaks::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const EPSILON: f64 = 1e-12;

    fn state() -> GameState {
        GameState::new(Instant::now(), 5)
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_initial_state() {
        let state = state();
        assert_eq!(state.ball, Ball::INITIAL);
        assert!(!state.armed);
        assert_eq!(state.streaks, Streaks::default());
    }

    #[test]
    fn test_advance_moves_ball() {
        let mut state = state();
        assert!(state.advance(&mut rng()).is_empty());
        assert!((state.ball.x - -0.012).abs() < EPSILON);
        assert!((state.ball.y - 0.508).abs() < EPSILON);
    }

    #[test]
    fn test_wall_bounce_reflects_and_clamps() {
        let mut state = state();
        state.ball.y = 0.995;
        state.ball.vy = 0.01;
        let cues = state.advance(&mut rng());
        assert!(cues.is_empty(), "wall bounce is silent");
        assert_eq!(state.ball.y, 1.0);
        assert_eq!(state.ball.vy, -0.01);

        state.ball.y = 0.004;
        state.ball.vy = -0.01;
        state.advance(&mut rng());
        assert_eq!(state.ball.y, 0.0);
        assert_eq!(state.ball.vy, 0.01);
    }

    #[test]
    fn test_arms_in_zone() {
        let mut state = state();
        state.ball.x = 0.84;
        state.ball.vx = 0.012;
        state.advance(&mut rng());
        assert!(state.armed);
    }

    #[test]
    fn test_armed_miss_scores_attacker() {
        let mut state = state();
        state.ball.x = 0.995;
        state.ball.vx = 0.012;
        state.armed = true;

        let cues = state.advance(&mut rng());
        assert_eq!(
            cues,
            vec![
                Cue::Play(Sound::Miss),
                Cue::Pause(Duration::from_millis(350)),
                Cue::Play(Sound::Fall),
                Cue::Pause(Duration::from_millis(500)),
            ]
        );
        assert_eq!(state.streaks.attacker, 1);
        assert_eq!(state.ball.x, 0.0);
        assert!(state.ball.vx < 0.0);
        assert!(!state.armed);
    }

    #[test]
    fn test_respawn_turns_inward_with_bounded_spread() {
        let mut rng = rng();
        for _ in 0..100 {
            let mut state = state();
            state.ball.x = -0.995;
            state.ball.vx = -0.012;
            state.advance(&mut rng);
            assert_eq!(state.ball.vx, 0.012);
            assert!(state.ball.vy.abs() <= RESPAWN_SPREAD);
        }
    }

    #[test]
    fn test_tone_interval_shrinks_toward_zone() {
        let mut state = state();
        state.ball.x = -1.0;
        let far = state.tone_interval();
        state.ball.x = 0.9;
        let near = state.tone_interval();
        assert!(near < far);
        assert!(far > Duration::from_millis(699) && far < Duration::from_millis(701));
    }

    #[test]
    fn test_proximity_throttled() {
        let start = Instant::now();
        let mut state = GameState::new(start, 5);
        state.ball.x = 0.5;
        state.ball.y = 0.25;

        // Interval at x = 0.5 is 250 ms
        assert_eq!(state.proximity(start + Duration::from_millis(200)), None);
        let cue = state.proximity(start + Duration::from_millis(260));
        assert_eq!(cue, Some(Cue::Play(Sound::Proximity { x: 0.5, y: 0.25 })));
        assert_eq!(state.proximity(start + Duration::from_millis(300)), None);
    }

    #[test]
    fn test_press_while_armed_returns_ball() {
        let mut state = state();
        state.ball.x = 0.9;
        state.ball.vx = 0.012;
        state.armed = true;

        assert_eq!(state.press(), vec![Cue::Play(Sound::Hit)]);
        assert_eq!(state.streaks.defender, 1);
        assert!((state.ball.vx - -0.0126).abs() < EPSILON);
        assert!(!state.armed);
    }

    #[test]
    fn test_press_while_unarmed_changes_nothing() {
        let mut state = state();
        let before = state.clone();
        assert_eq!(state.press(), vec![Cue::Play(Sound::MissPress)]);
        assert_eq!(state, before);
    }

    #[test]
    fn test_defender_streak_wins_round() {
        let mut state = state();
        state.streaks.defender = 5;
        state.streaks.attacker = 3;
        state.ball.x = 0.3;
        state.ball.y = 0.1;

        let cues = state.finish_round();
        assert_eq!(cues[0], Cue::Play(Sound::Win));
        assert!(cues.contains(&Cue::Play(Sound::Intro)));
        assert_eq!(state.streaks, Streaks::default());
        assert_eq!(state.ball, Ball::INITIAL);
    }

    #[test]
    fn test_attacker_streak_loses_round() {
        let mut state = state();
        state.streaks.attacker = 5;
        let cues = state.finish_round();
        assert_eq!(
            cues,
            vec![
                Cue::Play(Sound::Lose),
                Cue::Pause(Duration::from_millis(850)),
                Cue::Pause(Duration::from_secs(2)),
                Cue::Play(Sound::Intro),
                Cue::Pause(Duration::from_millis(350)),
                Cue::Pause(Duration::from_secs(1)),
            ]
        );
    }

    #[test]
    fn test_no_round_end_below_streak() {
        let mut state = state();
        state.streaks.defender = 4;
        state.streaks.attacker = 4;
        assert!(state.finish_round().is_empty());
        assert_eq!(state.winner(), None);
    }

    #[test]
    fn test_tick_orders_cues() {
        let start = Instant::now();
        let mut state = GameState::new(start, 5);
        state.ball.x = 0.88;
        state.ball.vx = 0.012;
        state.streaks.defender = 4;

        let cues = state.tick(start + Duration::from_secs(1), 1, &mut rng());
        assert!(matches!(cues[0], Cue::Play(Sound::Proximity { .. })));
        assert_eq!(cues[1], Cue::Play(Sound::Hit));
        assert_eq!(cues[2], Cue::Play(Sound::Win));
        assert_eq!(state.streaks.defender, 0);
    }
}
