//! Terminal-backed [`InputSource`] and [`Surface`].

use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::terminal;
use tracing::trace;

use crate::frame_loop::{InputSource, Surface};
use crate::input::{InputFrame, TerminalInput};
use crate::term::{FrameBuffer, TerminalRenderer, Viewport};

impl InputSource for TerminalInput {
    fn poll(&mut self) -> Result<InputFrame> {
        self.drain().context("failed to read terminal input")?;
        Ok(self.snapshot())
    }

    fn idle_until(&mut self, deadline: Instant) -> Result<()> {
        self.pump_until(deadline)
            .context("failed to read terminal input")
    }
}

/// Presents frames on the real terminal.
#[derive(Default)]
pub struct TerminalSurface {
    renderer: TerminalRenderer,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for TerminalSurface {
    fn viewport(&mut self) -> Result<Viewport> {
        let (width, height) = terminal::size().context("failed to query terminal size")?;
        Ok(Viewport::new(width, height))
    }

    fn present(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        let stats = self.renderer.draw_swap(fb)?;
        trace!(
            dirty = stats.dirty,
            runs = stats.runs,
            repaint = stats.repaint,
            bytes = stats.bytes,
            "frame presented"
        );
        Ok(())
    }
}
