//! DDA raycaster.
//!
//! One ray per screen column, stepped cell by cell across the grid until it
//! enters a wall. Distances are perpendicular to the camera plane, not
//! Euclidean, so flat walls stay flat.

use crate::map::Map;
use crate::player::Player;
use crate::types::{TextureId, Vec2, WallSide};

/// Direction components smaller than this are pushed away from zero.
const MIN_DIR_COMPONENT: f64 = 1e-9;

/// Result of one column's ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Perpendicular distance from the camera plane to the wall.
    pub distance: f64,
    pub side: WallSide,
    /// Position along the wall face in `[0, 1)`.
    pub texture_u: f64,
    pub cell: (i32, i32),
    pub texture: TextureId,
}

/// Cast a single ray from `origin` along `dir`.
///
/// Returns `None` only if the traversal bound is exhausted, which cannot
/// happen for an origin on the map since the border always stops the ray.
pub fn cast_ray(map: &Map, origin: Vec2, dir: Vec2) -> Option<RayHit> {
    if !origin.x.is_finite() || !origin.y.is_finite() {
        return None;
    }
    let dir = Vec2::new(away_from_zero(dir.x), away_from_zero(dir.y));
    let (mut cell_x, mut cell_y) = origin.cell();

    let delta_x = (1.0 / dir.x).abs();
    let delta_y = (1.0 / dir.y).abs();

    let (step_x, mut side_x) = if dir.x < 0.0 {
        (-1, (origin.x - cell_x as f64) * delta_x)
    } else {
        (1, (cell_x as f64 + 1.0 - origin.x) * delta_x)
    };
    let (step_y, mut side_y) = if dir.y < 0.0 {
        (-1, (origin.y - cell_y as f64) * delta_y)
    } else {
        (1, (cell_y as f64 + 1.0 - origin.y) * delta_y)
    };

    for _ in 0..map.max_ray_steps() {
        let side = if side_x < side_y {
            side_x += delta_x;
            cell_x += step_x;
            WallSide::X
        } else {
            side_y += delta_y;
            cell_y += step_y;
            WallSide::Y
        };

        if !map.is_wall(cell_x, cell_y) {
            continue;
        }

        let distance = match side {
            WallSide::X => side_x - delta_x,
            WallSide::Y => side_y - delta_y,
        }
        .max(0.0);

        let wall_pos = match side {
            WallSide::X => origin.y + distance * dir.y,
            WallSide::Y => origin.x + distance * dir.x,
        };
        let mut texture_u = wall_pos - wall_pos.floor();
        // Mirror faces seen from the far side so textures never read backwards.
        let mirrored = match side {
            WallSide::X => dir.x < 0.0,
            WallSide::Y => dir.y > 0.0,
        };
        if mirrored {
            texture_u = 1.0 - texture_u;
        }
        // A hit exactly on a cell corner mirrors to 1.0, which is the next texel.
        if texture_u >= 1.0 {
            texture_u = 0.0;
        }

        return Some(RayHit {
            distance,
            side,
            texture_u,
            cell: (cell_x, cell_y),
            texture: map.texture_at(cell_x, cell_y),
        });
    }

    None
}

#[inline]
fn away_from_zero(c: f64) -> f64 {
    if c.abs() < MIN_DIR_COMPONENT || !c.is_finite() {
        if c.is_sign_negative() {
            -MIN_DIR_COMPONENT
        } else {
            MIN_DIR_COMPONENT
        }
    } else {
        c
    }
}

/// Per-column ray buffer, reused across frames.
///
/// Also serves as the depth buffer when sprites are drawn.
#[derive(Debug, Clone, Default)]
pub struct Raycaster {
    hits: Vec<Option<RayHit>>,
}

impl Raycaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cast one ray per column of a `width`-column view.
    ///
    /// The buffer is only reallocated when `width` grows.
    pub fn cast(&mut self, map: &Map, player: &Player, width: usize) -> &[Option<RayHit>] {
        self.hits.resize(width, None);
        let origin = player.pos();
        for (column, slot) in self.hits.iter_mut().enumerate() {
            *slot = cast_ray(map, origin, player.ray_dir(column, width));
        }
        &self.hits
    }

    pub fn hits(&self) -> &[Option<RayHit>] {
        &self.hits
    }

    /// Wall distance for `column`; infinite when nothing was hit.
    pub fn depth(&self, column: usize) -> f64 {
        match self.hits.get(column) {
            Some(Some(hit)) => hit.distance,
            _ => f64::INFINITY,
        }
    }
}
