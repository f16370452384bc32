//! Command line options.

use clap::{Parser, ValueEnum};
use earshot::{AudioConfig, GameConfig, Latency};

#[derive(Parser, Debug)]
#[command(name = "earshot")]
#[command(about = "Audio-only bounce-and-return arcade game")]
pub struct Cli {
    /// Frames rendered per audio callback
    #[arg(long, default_value_t = 2048)]
    pub block_size: u32,

    /// Device buffering; high trades delay for fewer dropouts
    #[arg(long, value_enum, default_value_t = Latency::High)]
    pub latency: Latency,

    /// Simulation ticks per second
    #[arg(long, default_value_t = 60)]
    pub tick_rate: u32,

    /// Streak that ends a round
    #[arg(long, default_value_t = 5)]
    pub win_streak: u32,

    /// Where button presses come from
    #[arg(long, value_enum, default_value_t = InputKind::Keyboard)]
    pub input: InputKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum InputKind {
    /// Space or Enter in this terminal
    Keyboard,
    /// Any button on a connected gamepad
    Gamepad,
}

impl Cli {
    pub fn audio_config(&self) -> AudioConfig {
        AudioConfig {
            block_size: self.block_size,
            latency: self.latency,
        }
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            tick_rate: self.tick_rate,
            win_streak: self.win_streak,
            ..GameConfig::default()
        }
    }
}
