use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[cfg(feature = "playback")]
    #[error("no audio output device available")]
    NoOutputDevice,

    #[cfg(feature = "playback")]
    #[error("unsupported sample format: {0}")]
    UnsupportedSampleFormat(cpal::SampleFormat),

    #[cfg(feature = "playback")]
    #[error("failed to query output config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),

    #[cfg(feature = "playback")]
    #[error("failed to build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[cfg(feature = "playback")]
    #[error("failed to start output stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[cfg(feature = "playback")]
    #[error("failed to stop output stream: {0}")]
    PauseStream(#[from] cpal::PauseStreamError),

    #[error("gamepad backend error: {0}")]
    Gamepad(String),

    #[error("terminal I/O error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
