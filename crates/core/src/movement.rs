//! Player movement with per-axis wall collision.

use crate::map::Map;
use crate::player::Player;
use crate::types::{Control, ControlSet, Vec2, DEFAULT_MOVE_SPEED, DEFAULT_TURN_SPEED};

/// Speeds applied to movement intents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementTuning {
    /// Cells per second.
    pub move_speed: f64,
    /// Radians per second.
    pub turn_speed: f64,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            move_speed: DEFAULT_MOVE_SPEED,
            turn_speed: DEFAULT_TURN_SPEED,
        }
    }
}

/// Desired motion for one update, each axis in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Intent {
    /// Positive is forward.
    pub forward: f64,
    /// Positive is to the right.
    pub strafe: f64,
    /// Positive turns right.
    pub turn: f64,
}

impl Intent {
    /// Build an intent from held controls. Opposing controls cancel out.
    pub fn from_controls(held: ControlSet) -> Self {
        Self {
            forward: axis(held, Control::Forward, Control::Backward),
            strafe: axis(held, Control::StrafeRight, Control::StrafeLeft),
            turn: axis(held, Control::TurnRight, Control::TurnLeft),
        }
    }

    pub fn translates(&self) -> bool {
        self.forward != 0.0 || self.strafe != 0.0
    }

    /// Same translation, no rotation.
    pub fn translation_only(self) -> Self {
        Self { turn: 0.0, ..self }
    }
}

fn axis(held: ControlSet, positive: Control, negative: Control) -> f64 {
    match (held.contains(positive), held.contains(negative)) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

/// Apply `intent` for `dt` seconds: rotate, then translate with sliding
/// collision against `map`.
pub fn apply_intent(player: &mut Player, map: &Map, intent: Intent, tuning: MovementTuning, dt: f64) {
    if !dt.is_finite() || dt <= 0.0 {
        return;
    }

    if intent.turn != 0.0 {
        player.rotate(intent.turn * tuning.turn_speed * dt);
    }
    if !intent.translates() {
        return;
    }

    let dir = player.dir();
    let mut heading = dir * intent.forward + dir.perp() * intent.strafe;
    let len = heading.length();
    if len <= f64::EPSILON {
        return;
    }
    // Forward and strafe are orthonormal, so a diagonal sums to length √2.
    if len > 1.0 {
        heading = heading * (1.0 / len);
    }

    let delta = heading * (tuning.move_speed * dt);
    player.set_pos(slide(map, player.pos(), delta));
}

/// Move from `from` by `delta`, resolving each axis independently.
///
/// The x move is tested against the current y; the y move against the
/// committed x. An axis whose move would enter (or pass through) a wall cell
/// keeps its value while the other still applies, which lets the player slide
/// along walls.
pub fn slide(map: &Map, from: Vec2, delta: Vec2) -> Vec2 {
    let mut pos = from;

    let next_x = pos.x + delta.x;
    if next_x.is_finite() && path_clear(map, pos.x, next_x, |x| map.is_wall_at(Vec2::new(x, pos.y))) {
        pos.x = next_x;
    }

    let next_y = pos.y + delta.y;
    if next_y.is_finite() && path_clear(map, pos.y, next_y, |y| map.is_wall_at(Vec2::new(pos.x, y))) {
        pos.y = next_y;
    }

    pos
}

/// Every cell boundary crossed between `from` and `to` (and `to` itself) is open.
fn path_clear(map: &Map, from: f64, to: f64, blocked: impl Fn(f64) -> bool) -> bool {
    let (start, end) = (from.floor() as i64, to.floor() as i64);
    let limit = (map.width().max(map.height()) + 2) as i64;
    if (end - start).abs() > limit {
        return false;
    }
    let step = if end >= start { 1 } else { -1 };
    let mut cell = start;
    while cell != end {
        cell += step;
        if blocked(cell as f64 + 0.5) {
            return false;
        }
    }
    !blocked(to)
}
