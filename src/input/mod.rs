//! Player input sources.
//!
//! The game only needs two things from an input device: discrete button
//! presses and a request to quit. Adapters translate their backend's events
//! into [`InputEvent`]s.

#[cfg(feature = "gamepad")]
mod gamepad;
mod keyboard;

#[cfg(feature = "gamepad")]
pub use gamepad::GamepadInput;
pub use keyboard::{KeyboardInput, map_key};

use crate::error::Result;

/// A discrete input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    ButtonPress,
    Quit,
}

/// Source of player input, polled once per simulation tick.
pub trait InputAdapter {
    /// Appends every event that arrived since the last poll. Never blocks.
    fn poll(&mut self, events: &mut Vec<InputEvent>) -> Result<()>;

    /// Blocks until at least one input device is present.
    fn wait_for_device(&mut self) -> Result<()>;

    /// Whether an input device is currently present.
    fn is_connected(&self) -> bool {
        true
    }
}

impl<T: InputAdapter + ?Sized> InputAdapter for Box<T> {
    fn poll(&mut self, events: &mut Vec<InputEvent>) -> Result<()> {
        (**self).poll(events)
    }

    fn wait_for_device(&mut self) -> Result<()> {
        (**self).wait_for_device()
    }

    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }
}
