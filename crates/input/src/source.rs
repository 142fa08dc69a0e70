//! Reading crossterm events into a [`KeyState`].

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use tracing::trace;

use crate::handler::{InputFrame, KeyState};

/// Non-blocking keyboard source backed by the terminal event queue.
#[derive(Debug, Default)]
pub struct TerminalInput {
    keys: KeyState,
}

impl TerminalInput {
    pub fn new(keys: KeyState) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &KeyState {
        &self.keys
    }

    /// Handle every event already queued without blocking.
    pub fn drain(&mut self) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            self.handle(event::read()?);
        }
        Ok(())
    }

    /// Wait until `deadline`, handling events as they arrive.
    pub fn pump_until(&mut self, deadline: Instant) -> io::Result<()> {
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(());
            }
            if event::poll(remaining)? {
                self.handle(event::read()?);
            }
        }
    }

    pub fn handle(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if let Some(control) = self.keys.handle_event(key, Instant::now()) {
                trace!(control = control.as_str(), "pressed");
            }
        }
    }

    /// Snapshot held controls and drain the presses seen since the last call.
    pub fn snapshot(&mut self) -> InputFrame {
        self.keys.snapshot(Instant::now())
    }
}
