//! Key-state tracker for terminal environments.
//!
//! Terminals deliver key events, not key state. This handler rebuilds a
//! "which controls are down right now" snapshot from those events. Terminals
//! that report releases (keyboard enhancement protocol) release keys
//! explicitly; others fall back to a hold timeout refreshed by auto-repeat.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::handle_key_event;
use crate::types::{Control, ControlSet, DEFAULT_HOLD_MS};

/// Presses recorded between two snapshots; extra presses are dropped.
pub const MAX_PRESSES_PER_FRAME: usize = 32;

/// Input for one tick: what is held, and what was newly pressed (in order).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputFrame {
    pub held: ControlSet,
    pub pressed: ArrayVec<Control, MAX_PRESSES_PER_FRAME>,
}

impl InputFrame {
    /// A frame with nothing held or pressed.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Convenience for scripted input: `held` down, nothing newly pressed.
    pub fn holding(held: &[Control]) -> Self {
        Self {
            held: held.iter().copied().collect(),
            pressed: ArrayVec::new(),
        }
    }

    /// Convenience for scripted input: each control pressed once this tick.
    pub fn pressing(pressed: &[Control]) -> Self {
        let mut frame = Self::default();
        for &control in pressed {
            frame.held.insert(control);
            let _ = frame.pressed.try_push(control);
        }
        frame
    }

    pub fn press_count(&self, control: Control) -> usize {
        self.pressed.iter().filter(|c| **c == control).count()
    }

    pub fn was_pressed(&self, control: Control) -> bool {
        self.pressed.contains(&control)
    }

    pub fn quit_requested(&self) -> bool {
        self.was_pressed(Control::Quit) || self.held.contains(Control::Quit)
    }
}

/// Tracks held controls between snapshots.
#[derive(Debug, Clone)]
pub struct KeyState {
    last_seen: [Option<Instant>; Control::COUNT],
    pressed: ArrayVec<Control, MAX_PRESSES_PER_FRAME>,
    release_events: bool,
    hold_timeout: Duration,
}

impl KeyState {
    pub fn new() -> Self {
        Self::with_hold_timeout_ms(DEFAULT_HOLD_MS)
    }

    pub fn with_hold_timeout_ms(hold_ms: u32) -> Self {
        Self {
            last_seen: [None; Control::COUNT],
            pressed: ArrayVec::new(),
            release_events: false,
            hold_timeout: Duration::from_millis(hold_ms as u64),
        }
    }

    /// Trust release events instead of the hold timeout.
    pub fn with_release_events(mut self, enabled: bool) -> Self {
        self.release_events = enabled;
        self
    }

    pub fn hold_timeout(&self) -> Duration {
        self.hold_timeout
    }

    pub fn release_events(&self) -> bool {
        self.release_events
    }

    /// Feed any key event. Returns the control newly pressed, if any.
    pub fn handle_event(&mut self, key: KeyEvent, now: Instant) -> Option<Control> {
        match key.kind {
            KeyEventKind::Press => self.handle_key_press(key, now),
            KeyEventKind::Repeat => {
                if let Some(control) = handle_key_event(key) {
                    self.last_seen[control.index()] = Some(now);
                }
                None
            }
            KeyEventKind::Release => {
                self.handle_key_release(key);
                None
            }
        }
    }

    /// Record a press. Auto-repeat of a key that is still held only refreshes
    /// its hold window and does not count as a new press.
    pub fn handle_key_press(&mut self, key: KeyEvent, now: Instant) -> Option<Control> {
        let control = handle_key_event(key)?;
        let was_held = self.is_held(control, now);
        self.last_seen[control.index()] = Some(now);
        if was_held {
            return None;
        }
        let _ = self.pressed.try_push(control);
        Some(control)
    }

    pub fn handle_key_release(&mut self, key: KeyEvent) {
        if let Some(control) = handle_key_event(key) {
            self.last_seen[control.index()] = None;
        }
    }

    fn is_held(&self, control: Control, now: Instant) -> bool {
        match self.last_seen[control.index()] {
            Some(seen) => {
                self.release_events || now.saturating_duration_since(seen) <= self.hold_timeout
            }
            None => false,
        }
    }

    /// Snapshot held controls at `now` and drain the presses seen so far.
    ///
    /// Controls pressed since the last snapshot count as held for this frame
    /// even if already released, so short taps still move the player.
    pub fn snapshot(&mut self, now: Instant) -> InputFrame {
        let mut held = ControlSet::EMPTY;
        for control in Control::ALL {
            if self.is_held(control, now) {
                held.insert(control);
            } else {
                self.last_seen[control.index()] = None;
            }
        }
        for &control in &self.pressed {
            held.insert(control);
        }

        InputFrame {
            held,
            pressed: std::mem::take(&mut self.pressed),
        }
    }
}

impl Default for KeyState {
    fn default() -> Self {
        Self::new()
    }
}
