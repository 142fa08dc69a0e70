//! Billboard sprites and their projection onto the screen.

use serde::Deserialize;

use crate::player::Player;
use crate::types::Vec2;

/// A billboard placed on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub pos: Vec2,
    /// Index into the sprite texture list.
    pub texture: usize,
}

/// On-disk sprite record (`{"pos": [x, y], "texture_index": n}`).
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SpriteRecord {
    pos: [f64; 2],
    texture_index: usize,
}

impl From<SpriteRecord> for Sprite {
    fn from(record: SpriteRecord) -> Self {
        Self {
            pos: Vec2::new(record.pos[0], record.pos[1]),
            texture: record.texture_index,
        }
    }
}

/// Screen-space footprint of a sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteProjection {
    /// Distance along the facing direction, comparable with wall depths.
    pub depth: f64,
    /// Horizontal centre in columns.
    pub screen_x: f64,
    pub width: f64,
    pub height: f64,
}

/// Project `pos` through the player's camera onto a `width` x `height` view.
///
/// Returns `None` for sprites behind the camera or too small to draw.
pub fn project(player: &Player, pos: Vec2, width: usize, height: usize) -> Option<SpriteProjection> {
    let rel = pos - player.pos();
    let dir = player.dir();
    let plane = player.plane();

    // Inverse of the [plane dir] camera matrix.
    let det = plane.x * dir.y - dir.x * plane.y;
    if det.abs() < f64::EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;
    let cam_x = inv_det * (dir.y * rel.x - dir.x * rel.y);
    let depth = inv_det * (-plane.y * rel.x + plane.x * rel.y);
    if depth <= f64::EPSILON || !depth.is_finite() {
        return None;
    }

    let (w, h) = (width as f64, height as f64);
    let projected_h = h / depth;
    let projected_w = w / depth / 2.0;
    if projected_h < 1.0 || projected_w < 1.0 {
        return None;
    }

    Some(SpriteProjection {
        depth,
        screen_x: w / 2.0 * (1.0 + cam_x / depth),
        width: projected_w,
        height: projected_h,
    })
}
