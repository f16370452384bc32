//! Gamepad input using gilrs.

use super::{InputAdapter, InputEvent};
use crate::error::{Error, Result};
use gilrs::{Button, Event, EventType, Gilrs};
use std::thread;
use std::time::Duration;

/// Reads button presses from any connected gamepad.
///
/// Every button counts as the game button except the guide (Mode) button,
/// which quits.
pub struct GamepadInput {
    gilrs: Gilrs,
    poll_interval: Duration,
}

impl GamepadInput {
    /// Initializes the gamepad backend.
    ///
    /// # Arguments
    ///
    /// * `poll_interval` - How often to rescan while waiting for a gamepad
    pub fn new(poll_interval: Duration) -> Result<Self> {
        let gilrs = Gilrs::new().map_err(|e| {
            tracing::error!("Failed to initialize gilrs: {}", e);
            Error::Gamepad(e.to_string())
        })?;
        Ok(Self {
            gilrs,
            poll_interval,
        })
    }
}

impl InputAdapter for GamepadInput {
    fn poll(&mut self, events: &mut Vec<InputEvent>) -> Result<()> {
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            match event {
                EventType::Connected => tracing::info!("Gamepad connected: {:?}", id),
                EventType::Disconnected => tracing::warn!("Gamepad disconnected: {:?}", id),
                _ => events.extend(map_event(&event)),
            }
        }
        Ok(())
    }

    fn wait_for_device(&mut self) -> Result<()> {
        loop {
            // Presses made before a pad is fully up are dropped
            while let Some(Event { id, .. }) = self.gilrs.next_event() {
                tracing::trace!(?id, "discarding event while waiting for a gamepad");
            }
            if let Some((id, gamepad)) = self.gilrs.gamepads().find(|(_, g)| g.is_connected()) {
                tracing::info!("Using gamepad {} ({:?})", gamepad.name(), id);
                return Ok(());
            }
            thread::sleep(self.poll_interval);
        }
    }

    fn is_connected(&self) -> bool {
        self.gilrs.gamepads().any(|(_, g)| g.is_connected())
    }
}

/// Maps a gilrs event to a game input event.
fn map_event(event: &EventType) -> Option<InputEvent> {
    match event {
        EventType::ButtonPressed(Button::Mode, _) => Some(InputEvent::Quit),
        EventType::ButtonPressed(..) => Some(InputEvent::ButtonPress),
        _ => None,
    }
}
