//! Runtime configuration gathered from the command line.

use std::time::Duration;

use crate::core::MovementTuning;
use crate::types::{Vec2, DEFAULT_FOV, TICK_MS};

/// Everything the engine needs besides the world itself.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Target interval between ticks.
    pub tick: Duration,
    /// Camera plane length, clamped to `[0, 1]` by the player.
    pub fov: f64,
    pub tuning: MovementTuning,
    /// Start position; the map's default spawn when `None`.
    pub spawn: Option<Vec2>,
    /// Initial heading in degrees, clockwise from east.
    pub heading_deg: f64,
    pub textures: bool,
    pub minimap: bool,
}

impl EngineConfig {
    /// Set the tick interval from a frame rate (at least 1 FPS).
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.tick = Duration::from_micros(1_000_000 / fps.max(1) as u64);
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(TICK_MS as u64),
            fov: DEFAULT_FOV,
            tuning: MovementTuning::default(),
            spawn: None,
            heading_deg: 0.0,
            textures: true,
            minimap: true,
        }
    }
}
