//! SceneView: turns ray hits, sprites and the player into a framebuffer.
//!
//! This module is pure (no I/O). Output depends only on its inputs, so the
//! same frame rendered twice is identical cell for cell.

use std::f64::consts::FRAC_PI_4;

use crate::core::map::Cell as MapCell;
use crate::core::{project, Player, RayHit, SpriteProjection, WallTexture, World};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{TextureId, Vec2, WallSide};

/// Shading ramp, darkest to brightest.
pub const SHADE_RAMP: [char; 20] = [
    ' ', '.', ',', ':', ';', '<', '+', '*', 'L', 't', 'C', 'a', '4', 'U', '8', '0', 'd', 'Q', 'M',
    '@',
];

/// Brightest ramp index.
const SHADES: i32 = 19;
/// Extra shade for faces crossed on an x grid line.
const SIDE_SHADE: i32 = 4;
/// Slice heights above this all get the same base shade.
const SHADE_DIF: f64 = 15.0;

/// Floor of the distance fade.
pub const MIN_BRIGHTNESS: f64 = 0.18;
/// Distance at which brightness has halved.
const FADE_DISTANCE: f64 = 6.0;

const MINIMAP_WIDTH_PCT: u32 = 20;
const MINIMAP_HEIGHT_PCT: u32 = 30;

const CEILING: CellStyle = CellStyle::new(Rgb::new(40, 40, 52), Rgb::new(16, 16, 24));
const FLOOR_BG: Rgb = Rgb::new(22, 18, 14);
const FLOOR_DOT: Rgb = Rgb::new(150, 130, 100);
const WALL_BG: Rgb = Rgb::new(8, 8, 8);
const WALL_X: Rgb = Rgb::new(220, 210, 190);
const WALL_Y: Rgb = Rgb::new(160, 150, 135);

/// Tint per wall texture id (`1..=9`).
const WALL_TINTS: [Rgb; 9] = [
    Rgb::new(255, 170, 140),
    Rgb::new(200, 205, 215),
    Rgb::new(235, 190, 120),
    Rgb::new(150, 225, 150),
    Rgb::new(150, 180, 255),
    Rgb::new(230, 150, 230),
    Rgb::new(255, 240, 150),
    Rgb::new(150, 235, 235),
    Rgb::new(255, 255, 255),
];

const SPRITE_COLORS: [Rgb; 4] = [
    Rgb::new(110, 200, 90),
    Rgb::new(255, 210, 110),
    Rgb::new(220, 120, 120),
    Rgb::new(170, 170, 255),
];

const MINIMAP_BG: Rgb = Rgb::new(10, 10, 14);
const MINIMAP_FLOOR: Rgb = Rgb::new(60, 60, 70);
const MINIMAP_SPRITE: Rgb = Rgb::new(255, 210, 110);
const MINIMAP_PLAYER: Rgb = Rgb::new(255, 80, 80);

const HEADING_ARROWS: [char; 8] = ['→', '↘', '↓', '↙', '←', '↖', '↑', '↗'];

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Everything one frame is drawn from.
#[derive(Debug, Clone, Copy)]
pub struct SceneFrame<'a> {
    pub world: &'a World,
    pub player: &'a Player,
    /// One entry per column, as produced by the raycaster.
    pub hits: &'a [Option<RayHit>],
    pub textures: bool,
    pub minimap: bool,
}

/// Renders the first-person view.
///
/// Holds scratch space for sprite ordering so steady-state frames do not
/// allocate.
#[derive(Debug, Default)]
pub struct SceneView {
    sprite_order: Vec<(SpriteProjection, usize)>,
}

impl SceneView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render into an existing framebuffer, resizing it to `viewport`.
    ///
    /// This is the allocation-free hot path once the buffers have grown to
    /// the terminal size.
    pub fn render_into(&mut self, frame: &SceneFrame<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        if viewport.width == 0 || viewport.height == 0 {
            return;
        }

        for x in 0..viewport.width {
            let hit = frame.hits.get(x as usize).copied().flatten();
            draw_column(fb, frame, x, hit);
        }
        self.draw_sprites(fb, frame);
        if frame.minimap {
            draw_minimap(fb, frame);
        }
    }

    /// Render into a fresh framebuffer.
    pub fn render(&mut self, frame: &SceneFrame<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(frame, viewport, &mut fb);
        fb
    }

    fn draw_sprites(&mut self, fb: &mut FrameBuffer, frame: &SceneFrame<'_>) {
        let world = frame.world;
        let (w, h) = (fb.width() as usize, fb.height() as usize);

        self.sprite_order.clear();
        self.sprite_order.reserve(world.sprites.len());
        for (index, sprite) in world.sprites.iter().enumerate() {
            if let Some(projection) = project(frame.player, sprite.pos, w, h) {
                self.sprite_order.push((projection, index));
            }
        }
        // Far to near: nearer sprites overwrite farther ones.
        self.sprite_order
            .sort_unstable_by(|a, b| b.0.depth.total_cmp(&a.0.depth));

        for &(projection, index) in &self.sprite_order {
            let texture_index = world.sprites[index].texture;
            let Some(texture) = world.sprite_textures.get(texture_index) else {
                continue;
            };
            let fg = SPRITE_COLORS[texture_index % SPRITE_COLORS.len()]
                .scaled(distance_brightness(projection.depth));

            let left = projection.screen_x - projection.width / 2.0;
            let centre = h as f64 / 2.0 + frame.player.z() * projection.height;
            let top = centre - projection.height / 2.0;

            for sx in span(left, projection.width, w) {
                if projection.depth >= column_depth(frame.hits, sx) {
                    continue;
                }
                let u = (sx as f64 + 0.5 - left) / projection.width;
                for sy in span(top, projection.height, h) {
                    let v = (sy as f64 + 0.5 - top) / projection.height;
                    let Some(ch) = texture.sample(u, v) else {
                        continue;
                    };
                    let (x, y) = (sx as u16, sy as u16);
                    let bg = fb.get(x, y).map_or(Rgb::BLACK, |c| c.style.bg);
                    fb.set(x, y, CellStyle::new(fg, bg).into_cell(ch));
                }
            }
        }
    }
}

/// Brightness factor for a wall or sprite at `distance`.
///
/// Monotonically non-increasing in distance, clamped to `[MIN_BRIGHTNESS, 1]`.
pub fn distance_brightness(distance: f64) -> f64 {
    if distance.is_nan() {
        return MIN_BRIGHTNESS;
    }
    (FADE_DISTANCE / (FADE_DISTANCE + distance.max(0.0))).clamp(MIN_BRIGHTNESS, 1.0)
}

/// Screen cells whose centres fall inside `[start, start + len)`.
fn span(start: f64, len: f64, limit: usize) -> std::ops::Range<usize> {
    let first = (start - 0.5).ceil().max(0.0);
    let end = (start + len - 0.5).ceil().clamp(0.0, limit as f64);
    if !first.is_finite() || !end.is_finite() || first >= end {
        return 0..0;
    }
    first as usize..end as usize
}

fn column_depth(hits: &[Option<RayHit>], column: usize) -> f64 {
    match hits.get(column) {
        Some(Some(hit)) => hit.distance,
        _ => f64::INFINITY,
    }
}

fn draw_column(fb: &mut FrameBuffer, frame: &SceneFrame<'_>, x: u16, hit: Option<RayHit>) {
    let h = fb.height();
    let screen_h = h as f64;
    let horizon = screen_h / 2.0;

    let slice = hit.map(|hit| {
        let line_height = if hit.distance > 0.0 {
            (screen_h / hit.distance).min(screen_h * 1e3)
        } else {
            screen_h
        };
        let centre = horizon + frame.player.z() * line_height;
        (hit, centre - line_height / 2.0, line_height)
    });
    let (wall_start, wall_end) = match slice {
        Some((_, top, line_height)) => {
            let start = rows_above(top, h);
            (start, rows_above(top + line_height, h).max(start))
        }
        None => {
            let start = rows_above(horizon, h);
            (start, start)
        }
    };

    fb.fill_column(x, 0..wall_start, CEILING.into_cell(' '));
    if let Some((hit, top, line_height)) = slice {
        for y in wall_start..wall_end {
            let v = (y as f64 + 0.5 - top) / line_height;
            fb.set(x, y, wall_cell(frame, &hit, v, line_height));
        }
    }
    for y in wall_end..h {
        fb.set(x, y, floor_cell(x, y as f64 + 0.5, screen_h));
    }
}

/// Number of rows whose centre lies above `edge`, clamped to the screen.
fn rows_above(edge: f64, height: u16) -> u16 {
    let rows = (edge - 0.5).ceil();
    if rows.is_nan() {
        return 0;
    }
    rows.clamp(0.0, height as f64) as u16
}

fn wall_cell(frame: &SceneFrame<'_>, hit: &RayHit, v: f64, line_height: f64) -> Cell {
    let mut shade = line_height.min(SHADE_DIF) as i32;
    if hit.side == WallSide::X {
        shade += SIDE_SHADE;
    }

    let side_color = match hit.side {
        WallSide::X => WALL_X,
        WallSide::Y => WALL_Y,
    };
    let texture = if frame.textures {
        wall_texture(frame.world, hit.texture)
    } else {
        None
    };
    let fg = match texture {
        Some(texture) => {
            shade += 2 * texture.sample(hit.texture_u, v) as i32 - 12;
            side_color.tinted(wall_tint(hit.texture))
        }
        None => side_color,
    };

    let shade = shade.clamp(1, SHADES) as usize;
    CellStyle::new(fg.scaled(distance_brightness(hit.distance)), WALL_BG)
        .into_cell(SHADE_RAMP[shade])
}

fn floor_cell(x: u16, row: f64, screen_h: f64) -> Cell {
    let half = screen_h / 2.0;
    // 0 at the horizon, 1 at the bottom edge.
    let nearness = ((row - half) / half).clamp(0.0, 1.0);
    let ch = if x % 2 == 0 { '.' } else { ' ' };
    CellStyle::new(FLOOR_DOT.scaled(0.25 + 0.75 * nearness), FLOOR_BG).into_cell(ch)
}

fn wall_texture(world: &World, id: TextureId) -> Option<&WallTexture> {
    (id as usize)
        .checked_sub(1)
        .and_then(|i| world.wall_textures.get(i))
}

fn wall_tint(id: TextureId) -> Rgb {
    (id as usize)
        .checked_sub(1)
        .and_then(|i| WALL_TINTS.get(i))
        .copied()
        .unwrap_or(WALL_TINTS[0])
}

/// Arrow glyph closest to `dir`.
pub fn heading_arrow(dir: Vec2) -> char {
    let octant = (dir.angle() / FRAC_PI_4).round() as i32;
    HEADING_ARROWS[octant.rem_euclid(8) as usize]
}

fn draw_minimap(fb: &mut FrameBuffer, frame: &SceneFrame<'_>) {
    let (w, h) = (fb.width(), fb.height());
    let mw = (w as u32 * MINIMAP_WIDTH_PCT / 100) as u16;
    let mh = (h as u32 * MINIMAP_HEIGHT_PCT / 100) as u16;
    if mw < 3 || mh < 3 {
        return;
    }
    let (ox, oy) = (w - mw, h - mh);

    // The window follows the player, who sits in its centre cell.
    let (px, py) = frame.player.pos().cell();
    let (half_w, half_h) = ((mw / 2) as i32, (mh / 2) as i32);
    let to_map = |mx: u16, my: u16| (px - half_w + mx as i32, py - half_h + my as i32);

    let map = &frame.world.map;
    for my in 0..mh {
        for mx in 0..mw {
            let (cx, cy) = to_map(mx, my);
            let cell = match map.cell(cx, cy) {
                Some(MapCell::Wall(id)) => {
                    CellStyle::new(wall_tint(id), MINIMAP_BG).into_cell('#')
                }
                Some(MapCell::Empty) => CellStyle::new(MINIMAP_FLOOR, MINIMAP_BG).into_cell('·'),
                None => CellStyle::new(Rgb::BLACK, Rgb::BLACK).into_cell(' '),
            };
            fb.set(ox + mx, oy + my, cell);
        }
    }

    for sprite in &frame.world.sprites {
        let (sx, sy) = sprite.pos.cell();
        let (mx, my) = (sx - px + half_w, sy - py + half_h);
        if (0..mw as i32).contains(&mx) && (0..mh as i32).contains(&my) {
            let style = CellStyle::new(MINIMAP_SPRITE, MINIMAP_BG);
            fb.put_char(ox + mx as u16, oy + my as u16, '*', style);
        }
    }

    let mut style = CellStyle::new(MINIMAP_PLAYER, MINIMAP_BG);
    style.bold = true;
    fb.put_char(
        ox + half_w as u16,
        oy + half_h as u16,
        heading_arrow(frame.player.dir()),
        style,
    );
}
