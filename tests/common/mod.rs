//! Shared helpers for the integration tests.

#![allow(dead_code)]

use earshot::{InputAdapter, InputEvent, Result};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Script {
    /// Events handed out by successive polls. Polls past the end see nothing.
    pub batches: VecDeque<Vec<InputEvent>>,
    pub polls: usize,
    pub waits: usize,
    pub disconnected: bool,
}

/// Input adapter driven by a script the test keeps a handle to.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    script: Arc<Mutex<Script>>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the events returned by the next unanswered poll.
    pub fn push(&self, events: &[InputEvent]) {
        self.script.lock().batches.push_back(events.to_vec());
    }

    pub fn polls(&self) -> usize {
        self.script.lock().polls
    }

    pub fn set_connected(&self, connected: bool) {
        self.script.lock().disconnected = !connected;
    }
}

impl InputAdapter for ScriptedInput {
    fn poll(&mut self, events: &mut Vec<InputEvent>) -> Result<()> {
        let mut script = self.script.lock();
        script.polls += 1;
        if let Some(batch) = script.batches.pop_front() {
            events.extend(batch);
        }
        Ok(())
    }

    fn wait_for_device(&mut self) -> Result<()> {
        let mut script = self.script.lock();
        script.waits += 1;
        script.disconnected = false;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        !self.script.lock().disconnected
    }
}
