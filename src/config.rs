//! Runtime configuration for the audio stream and the game loop.

use crate::error::{Error, Result};
use std::time::Duration;

/// How much device buffering to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Latency {
    /// One render block of device buffering.
    Low,
    /// Two render blocks, which absorbs jitter from lock contention.
    #[default]
    High,
}

impl Latency {
    /// Device buffer size in frames for the given render block size.
    pub fn buffer_frames(&self, block_size: u32) -> u32 {
        match self {
            Latency::Low => block_size,
            Latency::High => block_size.saturating_mul(2),
        }
    }
}

/// Output stream settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioConfig {
    /// Frames per render pass.
    pub block_size: u32,
    pub latency: Latency,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            block_size: 2048,
            latency: Latency::High,
        }
    }
}

impl AudioConfig {
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(Error::InvalidConfig("block size must be at least 1 frame".into()));
        }
        Ok(())
    }
}

/// Game loop settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Simulation ticks per second.
    pub tick_rate: u32,
    /// Streak that ends a round.
    pub win_streak: u32,
    /// Wait between a controller showing up and the intro jingle.
    pub startup_delay: Duration,
    /// How often to look for a controller while none is connected.
    pub device_poll_interval: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            win_streak: 5,
            startup_delay: Duration::from_secs(2),
            device_poll_interval: Duration::from_millis(500),
        }
    }
}

impl GameConfig {
    /// Target duration of one simulation tick.
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate.max(1)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_rate == 0 {
            return Err(Error::InvalidConfig("tick rate must be positive".into()));
        }
        if self.win_streak == 0 {
            return Err(Error::InvalidConfig("win streak must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_setup() {
        let audio = AudioConfig::default();
        assert_eq!(audio.block_size, 2048);
        assert_eq!(audio.latency, Latency::High);

        let game = GameConfig::default();
        assert_eq!(game.tick_rate, 60);
        assert_eq!(game.win_streak, 5);
    }

    #[test]
    fn test_latency_buffer_frames() {
        assert_eq!(Latency::Low.buffer_frames(2048), 2048);
        assert_eq!(Latency::High.buffer_frames(2048), 4096);
    }

    #[test]
    fn test_tick_period() {
        let game = GameConfig::default();
        assert_eq!(game.tick_period(), Duration::from_nanos(16_666_666));
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let audio = AudioConfig {
            block_size: 0,
            ..AudioConfig::default()
        };
        assert!(matches!(audio.validate(), Err(Error::InvalidConfig(_))));

        let game = GameConfig {
            tick_rate: 0,
            ..GameConfig::default()
        };
        assert!(game.validate().is_err());

        let game = GameConfig {
            win_streak: 0,
            ..GameConfig::default()
        };
        assert!(game.validate().is_err());
        assert!(GameConfig::default().validate().is_ok());
    }
}
