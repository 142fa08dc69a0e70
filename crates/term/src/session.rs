//! Scoped terminal mode.
//!
//! [`TerminalSession::enter`] switches to raw mode and the alternate screen;
//! the terminal is restored on [`TerminalSession::exit`], on drop, and from a
//! panic hook so a crash never leaves the shell unusable.

use std::io::{self, Write};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{Attribute, ResetColor, SetAttribute},
    terminal, QueueableCommand,
};
use tracing::{debug, warn};

static SESSION_ACTIVE: AtomicBool = AtomicBool::new(false);
static KEYBOARD_ENHANCED: AtomicBool = AtomicBool::new(false);
static PANIC_HOOK: Once = Once::new();

/// Raw mode plus alternate screen for as long as this value lives.
pub struct TerminalSession {
    keyboard_enhanced: bool,
}

impl TerminalSession {
    pub fn enter() -> Result<Self> {
        install_panic_hook();

        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        SESSION_ACTIVE.store(true, Ordering::SeqCst);
        // From here on, Drop restores whatever was changed.
        let mut session = Self {
            keyboard_enhanced: false,
        };

        let mut buf = Vec::with_capacity(64);
        buf.queue(terminal::EnterAlternateScreen)?;
        buf.queue(cursor::Hide)?;
        buf.queue(terminal::DisableLineWrap)?;
        buf.queue(terminal::Clear(terminal::ClearType::All))?;
        write_stdout(&buf).context("failed to enter the alternate screen")?;

        if matches!(terminal::supports_keyboard_enhancement(), Ok(true)) {
            buf.clear();
            buf.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
            match write_stdout(&buf) {
                Ok(()) => {
                    session.keyboard_enhanced = true;
                    KEYBOARD_ENHANCED.store(true, Ordering::SeqCst);
                }
                Err(err) => warn!(%err, "keyboard enhancement unavailable"),
            }
        }

        debug!(
            keyboard_enhanced = session.keyboard_enhanced,
            "terminal session started"
        );
        Ok(session)
    }

    /// Whether the terminal reports key releases.
    pub fn reports_key_release(&self) -> bool {
        self.keyboard_enhanced
    }

    /// Restore the terminal, reporting failures instead of ignoring them.
    pub fn exit(self) -> Result<()> {
        restore_terminal()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

/// Undo everything `enter` did. Only the first call after `enter` acts.
fn restore_terminal() -> Result<()> {
    if !SESSION_ACTIVE.swap(false, Ordering::SeqCst) {
        return Ok(());
    }
    let mut buf = Vec::with_capacity(64);
    if KEYBOARD_ENHANCED.swap(false, Ordering::SeqCst) {
        buf.queue(PopKeyboardEnhancementFlags)?;
    }
    buf.queue(ResetColor)?;
    buf.queue(SetAttribute(Attribute::Reset))?;
    buf.queue(terminal::EnableLineWrap)?;
    buf.queue(cursor::Show)?;
    buf.queue(terminal::LeaveAlternateScreen)?;
    let written = write_stdout(&buf);
    terminal::disable_raw_mode().context("failed to disable raw mode")?;
    written.context("failed to leave the alternate screen")
}

fn write_stdout(buf: &[u8]) -> io::Result<()> {
    let mut stdout = io::stdout();
    stdout.write_all(buf)?;
    stdout.flush()
}

fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let _ = restore_terminal();
            previous(info);
        }));
    });
}
