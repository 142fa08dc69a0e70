//! The fixed-rate frame loop and the seams it runs against.

use std::time::Instant;

use anyhow::Result;
use tracing::{debug, info};

use crate::engine::{Engine, LoopState};
use crate::input::InputFrame;
use crate::term::{FrameBuffer, Viewport};

/// Where per-tick input comes from.
pub trait InputSource {
    /// Non-blocking snapshot of held controls and presses since the last call.
    fn poll(&mut self) -> Result<InputFrame>;

    /// Wait until `deadline`, collecting input as it arrives.
    fn idle_until(&mut self, deadline: Instant) -> Result<()>;
}

/// Where finished frames go.
pub trait Surface {
    fn viewport(&mut self) -> Result<Viewport>;

    /// Show `fb`. The surface may swap the buffer's contents; the engine
    /// redraws every cell each frame.
    fn present(&mut self, fb: &mut FrameBuffer) -> Result<()>;
}

/// What a finished run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub ticks: u64,
    pub frames: u64,
}

/// Drive `engine` until it terminates.
///
/// Each tick polls input, updates the player, renders and presents, then
/// idles until the next tick deadline. A quit observed during a tick ends
/// the loop before that tick renders.
pub fn run<I, S>(engine: &mut Engine, input: &mut I, surface: &mut S) -> Result<RunSummary>
where
    I: InputSource + ?Sized,
    S: Surface + ?Sized,
{
    engine.start();
    let interval = engine.config().tick;
    info!(tick_us = interval.as_micros() as u64, "frame loop started");

    let mut summary = RunSummary::default();
    let mut last = Instant::now();
    while engine.state() == LoopState::Running {
        let tick_start = Instant::now();

        let frame = input.poll()?;
        engine.update(&frame, tick_start.saturating_duration_since(last));
        last = tick_start;
        summary.ticks += 1;
        if engine.state() != LoopState::Running {
            break;
        }

        let viewport = surface.viewport()?;
        surface.present(engine.render(viewport))?;
        summary.frames += 1;

        input.idle_until(tick_start + interval)?;
    }

    let pos = engine.player().pos();
    debug!(x = pos.x, y = pos.y, "final position");
    info!(
        ticks = summary.ticks,
        frames = summary.frames,
        "frame loop finished"
    );
    Ok(summary)
}
