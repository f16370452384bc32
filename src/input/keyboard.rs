//! Terminal keyboard input.

use super::{InputAdapter, InputEvent};
use crate::error::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::panic;
use std::sync::Once;
use std::time::Duration;

static PANIC_HOOK: Once = Once::new();

/// Reads key presses from the terminal in raw mode.
///
/// Space or Enter is the button, Q, Esc or Ctrl-C quits. The terminal is
/// restored when the adapter is dropped, and also if the program panics.
pub struct KeyboardInput {
    _private: (),
}

impl KeyboardInput {
    /// Switches the terminal to raw mode so single key presses arrive
    /// immediately.
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;

        PANIC_HOOK.call_once(|| {
            let original_hook = panic::take_hook();
            panic::set_hook(Box::new(move |panic_info| {
                let _ = disable_raw_mode();
                original_hook(panic_info);
            }));
        });

        Ok(Self { _private: () })
    }
}

impl Drop for KeyboardInput {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

impl InputAdapter for KeyboardInput {
    fn poll(&mut self, events: &mut Vec<InputEvent>) -> Result<()> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key_event) = event::read()? {
                events.extend(map_key(&key_event));
            }
        }
        Ok(())
    }

    fn wait_for_device(&mut self) -> Result<()> {
        // The keyboard is always there
        Ok(())
    }
}

/// Maps a terminal key event to a game input event.
///
/// Only presses count; repeats and releases are ignored.
pub fn map_key(key_event: &KeyEvent) -> Option<InputEvent> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    match key_event.code {
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Quit)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(InputEvent::Quit),
        KeyCode::Char(' ') | KeyCode::Enter => Some(InputEvent::ButtonPress),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        key(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    #[test]
    fn test_button_keys() {
        assert_eq!(map_key(&press(KeyCode::Char(' '))), Some(InputEvent::ButtonPress));
        assert_eq!(map_key(&press(KeyCode::Enter)), Some(InputEvent::ButtonPress));
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key(&press(KeyCode::Char('q'))), Some(InputEvent::Quit));
        assert_eq!(map_key(&press(KeyCode::Esc)), Some(InputEvent::Quit));
        let ctrl_c = key(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press);
        assert_eq!(map_key(&ctrl_c), Some(InputEvent::Quit));
    }

    #[test]
    fn test_ignores_releases_and_other_keys() {
        let release = key(KeyCode::Char(' '), KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(map_key(&release), None);
        assert_eq!(map_key(&press(KeyCode::Char('c'))), None);
        assert_eq!(map_key(&press(KeyCode::Left)), None);
    }
}
