//! Player state: position, camera and jump arc.

use crate::types::{Vec2, JUMP_DURATION_MS, JUMP_HEIGHT};

/// The player doubles as the camera.
///
/// `dir` is kept unit length and `plane` perpendicular to it (pointing to
/// the player's right) with length equal to the field of view. Together they
/// span the view frustum: column rays are `dir + plane * camera_x` with
/// `camera_x` in `[-1, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pos: Vec2,
    dir: Vec2,
    plane: Vec2,
    fov: f64,
    jump_elapsed: Option<f64>,
    z: f64,
}

impl Player {
    /// Create a player at `pos` facing `theta` radians (0 = east).
    ///
    /// `fov` is clamped to `[0, 1]`.
    pub fn new(pos: Vec2, theta: f64, fov: f64) -> Self {
        let fov = if fov.is_finite() { fov.clamp(0.0, 1.0) } else { 0.0 };
        let dir = Vec2::from_angle(theta);
        Self {
            pos,
            dir,
            plane: dir.perp() * fov,
            fov,
            jump_elapsed: None,
            z: 0.0,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn dir(&self) -> Vec2 {
        self.dir
    }

    pub fn plane(&self) -> Vec2 {
        self.plane
    }

    pub fn fov(&self) -> f64 {
        self.fov
    }

    /// Facing angle in radians.
    pub fn theta(&self) -> f64 {
        self.dir.angle()
    }

    /// Vertical eye offset in wall-slice heights.
    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn is_jumping(&self) -> bool {
        self.jump_elapsed.is_some()
    }

    pub(crate) fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    /// Rotate the camera by `theta` radians (positive turns right).
    pub fn rotate(&mut self, theta: f64) {
        self.dir = self.dir.rotated(theta);
        self.plane = self.plane.rotated(theta);
    }

    /// Ray direction for `column` of a `width`-column view.
    #[inline]
    pub fn ray_dir(&self, column: usize, width: usize) -> Vec2 {
        let camera_x = 2.0 * column as f64 / width.max(1) as f64 - 1.0;
        self.dir + self.plane * camera_x
    }

    /// Start a jump; ignored while already airborne.
    pub fn jump(&mut self) -> bool {
        if self.jump_elapsed.is_some() {
            return false;
        }
        self.jump_elapsed = Some(0.0);
        true
    }

    /// Advance the jump arc by `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        let Some(elapsed) = self.jump_elapsed else {
            return;
        };
        let duration = JUMP_DURATION_MS as f64 / 1000.0;
        let elapsed = elapsed + dt.max(0.0);
        if elapsed >= duration {
            self.jump_elapsed = None;
            self.z = 0.0;
        } else {
            self.jump_elapsed = Some(elapsed);
            self.z = JUMP_HEIGHT * (std::f64::consts::PI * elapsed / duration).sin();
        }
    }
}
