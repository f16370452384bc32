//! Earshot: press the button when the tone gets close.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, InputKind};
use earshot::{AudioDriver, GameConfig, GameLoop, InputAdapter, KeyboardInput};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let game_config = cli.game_config();
    game_config.validate()?;

    let driver = AudioDriver::open(&cli.audio_config()).context("failed to open audio output")?;

    match cli.input {
        InputKind::Keyboard => println!("Press SPACE when the ball is close, Q to quit."),
        InputKind::Gamepad => println!("Please connect a gamepad..."),
    }
    let input = open_input(cli.input, &game_config)?;

    let outcome = GameLoop::new(
        driver.bus(),
        input,
        rand::thread_rng(),
        game_config,
        Instant::now(),
    )
    .run();

    driver.close().context("failed to stop audio output")?;
    outcome?;

    println!("\nGoodbye!");
    Ok(())
}

fn open_input(
    kind: InputKind,
    #[cfg_attr(not(feature = "gamepad"), allow(unused_variables))] config: &GameConfig,
) -> Result<Box<dyn InputAdapter>> {
    match kind {
        InputKind::Keyboard => Ok(Box::new(
            KeyboardInput::new().context("failed to set up the terminal")?,
        )),
        #[cfg(feature = "gamepad")]
        InputKind::Gamepad => Ok(Box::new(earshot::GamepadInput::new(
            config.device_poll_interval,
        )?)),
        #[cfg(not(feature = "gamepad"))]
        InputKind::Gamepad => {
            anyhow::bail!("this build has no gamepad support; rebuild with --features gamepad")
        }
    }
}
