//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (map and ray math, input handling, terminal rendering).
//!
//! # Coordinates
//!
//! Map space uses screen orientation: `x` grows to the right (map column) and
//! `y` grows downward (map line). A positive rotation therefore turns the
//! camera clockwise on screen, i.e. to the player's right.
//!
//! # Timing and Tuning Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Target frame interval (~60 FPS) |
//! | `MAX_FRAME_DT_MS` | 100 | Longest step fed into movement |
//! | `DEFAULT_FOV` | 0.66 | Camera plane length |
//! | `DEFAULT_MOVE_SPEED` | 5.0 | Cells per second |
//! | `DEFAULT_TURN_SPEED` | 3.0 | Radians per second |
//! | `DEFAULT_HOLD_MS` | 200 | Key hold window without release events |
//! | `JUMP_DURATION_MS` | 600 | Length of a jump arc |
//!
//! # Examples
//!
//! ```
//! use term_dungeon_types::{Control, ControlSet, Vec2};
//!
//! let mut held = ControlSet::EMPTY;
//! held.insert(Control::Forward);
//! assert!(held.contains(Control::Forward));
//!
//! let facing = Vec2::new(1.0, 0.0);
//! let right = facing.perp();
//! assert_eq!(right, Vec2::new(0.0, 1.0));
//!
//! assert_eq!(Control::from_str("toggleTextures"), Some(Control::ToggleTextures));
//! ```

use std::ops::{Add, Mul, Sub};

/// Target frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Upper bound for the elapsed time fed into a single update.
///
/// Longer stalls (terminal suspended, slow flush) are treated as this long.
pub const MAX_FRAME_DT_MS: u32 = 100;

/// Default camera plane length. Somewhere between 0 and 1 is reasonable.
pub const DEFAULT_FOV: f64 = 0.66;

/// Default translation speed in cells per second.
pub const DEFAULT_MOVE_SPEED: f64 = 5.0;

/// Default rotation speed in radians per second.
pub const DEFAULT_TURN_SPEED: f64 = 3.0;

/// How long a key counts as held after its last press/repeat event on
/// terminals that never report key releases.
pub const DEFAULT_HOLD_MS: u32 = 200;

/// Length of a full jump arc.
pub const JUMP_DURATION_MS: u32 = 600;

/// Peak eye offset of a jump, in wall-slice heights.
pub const JUMP_HEIGHT: f64 = 0.25;

/// Texture id reported for queries outside the map.
pub const OUT_OF_BOUNDS_TEXTURE: TextureId = 1;

/// Wall texture identifier as stored in the map (`1..=9`).
///
/// Texture `n` selects the wall texture at index `n - 1`.
pub type TextureId = u8;

/// 2D vector in map space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing at `theta` radians (0 = east, π/2 = south).
    pub fn from_angle(theta: f64) -> Self {
        Self::new(theta.cos(), theta.sin())
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Rotate by `theta` radians (clockwise on screen).
    pub fn rotated(self, theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Quarter turn so the result points to the right of `self` on screen.
    pub fn perp(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Map cell containing this point (half-open cells: `[n, n + 1)`).
    pub fn cell(self) -> (i32, i32) {
        (self.x.floor() as i32, self.y.floor() as i32)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Which family of grid lines a ray crossed when it hit a wall.
///
/// - **X**: crossed a vertical line (east/west face)
/// - **Y**: crossed a horizontal line (north/south face)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallSide {
    X,
    Y,
}

/// Player controls, independent of the physical key that triggers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
    StrafeLeft,
    StrafeRight,
    Jump,
    ToggleTextures,
    Quit,
}

impl Control {
    pub const COUNT: usize = 9;

    pub const ALL: [Control; Control::COUNT] = [
        Control::Forward,
        Control::Backward,
        Control::TurnLeft,
        Control::TurnRight,
        Control::StrafeLeft,
        Control::StrafeRight,
        Control::Jump,
        Control::ToggleTextures,
        Control::Quit,
    ];

    /// Dense index in `0..Control::COUNT`.
    pub const fn index(self) -> usize {
        match self {
            Control::Forward => 0,
            Control::Backward => 1,
            Control::TurnLeft => 2,
            Control::TurnRight => 3,
            Control::StrafeLeft => 4,
            Control::StrafeRight => 5,
            Control::Jump => 6,
            Control::ToggleTextures => 7,
            Control::Quit => 8,
        }
    }

    /// Parse control from its camelCase name.
    ///
    /// # Examples
    ///
    /// ```
    /// use term_dungeon_types::Control;
    ///
    /// assert_eq!(Control::from_str("forward"), Some(Control::Forward));
    /// assert_eq!(Control::from_str("strafeLeft"), Some(Control::StrafeLeft));
    /// assert_eq!(Control::from_str("fly"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "forward" => Some(Control::Forward),
            "backward" => Some(Control::Backward),
            "turnLeft" => Some(Control::TurnLeft),
            "turnRight" => Some(Control::TurnRight),
            "strafeLeft" => Some(Control::StrafeLeft),
            "strafeRight" => Some(Control::StrafeRight),
            "jump" => Some(Control::Jump),
            "toggleTextures" => Some(Control::ToggleTextures),
            "quit" => Some(Control::Quit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Control::Forward => "forward",
            Control::Backward => "backward",
            Control::TurnLeft => "turnLeft",
            Control::TurnRight => "turnRight",
            Control::StrafeLeft => "strafeLeft",
            Control::StrafeRight => "strafeRight",
            Control::Jump => "jump",
            Control::ToggleTextures => "toggleTextures",
            Control::Quit => "quit",
        }
    }
}

/// Compact set of controls (one bit per [`Control`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ControlSet(u16);

impl ControlSet {
    pub const EMPTY: ControlSet = ControlSet(0);

    pub const fn contains(self, control: Control) -> bool {
        self.0 & (1 << control.index()) != 0
    }

    pub fn insert(&mut self, control: Control) {
        self.0 |= 1 << control.index();
    }

    pub fn remove(&mut self, control: Control) {
        self.0 &= !(1 << control.index());
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Control> {
        Control::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl FromIterator<Control> for ControlSet {
    fn from_iter<I: IntoIterator<Item = Control>>(iter: I) -> Self {
        let mut set = ControlSet::EMPTY;
        for control in iter {
            set.insert(control);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-12 && (a.y - b.y).abs() < 1e-12
    }

    #[test]
    fn tuning_defaults() {
        assert_eq!(TICK_MS, 16);
        assert!(DEFAULT_FOV > 0.0 && DEFAULT_FOV <= 1.0);
        assert!(MAX_FRAME_DT_MS >= TICK_MS);
        assert!(DEFAULT_HOLD_MS > 0);
    }

    #[test]
    fn quarter_turn_rotation_points_south() {
        let east = Vec2::new(1.0, 0.0);
        let turned = east.rotated(std::f64::consts::FRAC_PI_2);
        assert!(approx(turned, Vec2::new(0.0, 1.0)));
        assert!(approx(turned, east.perp()));
    }

    #[test]
    fn rotation_preserves_length() {
        let v = Vec2::new(3.0, -4.0);
        for i in 0..16 {
            let r = v.rotated(i as f64 * 0.37);
            assert!((r.length() - 5.0).abs() < 1e-12);
        }
    }

    #[test]
    fn cell_uses_half_open_semantics() {
        assert_eq!(Vec2::new(5.0, 5.0).cell(), (5, 5));
        assert_eq!(Vec2::new(4.999, 5.5).cell(), (4, 5));
        assert_eq!(Vec2::new(-0.5, 0.0).cell(), (-1, 0));
    }

    #[test]
    fn control_indices_are_dense_and_unique() {
        for (i, control) in Control::ALL.iter().enumerate() {
            assert_eq!(control.index(), i);
            assert_eq!(Control::from_str(control.as_str()), Some(*control));
        }
    }

    #[test]
    fn control_set_insert_remove() {
        let mut set = ControlSet::EMPTY;
        assert!(set.is_empty());
        set.insert(Control::TurnLeft);
        set.insert(Control::Quit);
        assert!(set.contains(Control::TurnLeft));
        assert!(!set.contains(Control::TurnRight));
        set.remove(Control::TurnLeft);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Control::Quit]);
    }
}
