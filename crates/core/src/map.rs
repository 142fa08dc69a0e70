//! Static tile map: the world geometry rays are cast against.

use crate::assets::AssetError;
use crate::types::{TextureId, Vec2, OUT_OF_BOUNDS_TEXTURE};

const EMBEDDED_MAP: &str = include_str!("../../../assets/maps/dungeon.txt");

/// A single map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Wall(TextureId),
}

impl Cell {
    pub fn is_wall(self) -> bool {
        matches!(self, Cell::Wall(_))
    }
}

/// Immutable 2D grid of cells.
///
/// Any query outside the grid reports a wall, so a ray leaving the map always
/// stops at its edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Map {
    /// Parse a map from digit rows: `0` is empty, `1`-`9` a wall with that
    /// texture id. Line index is `y`, character index is `x`.
    pub fn parse(text: &str) -> Result<Self, AssetError> {
        let mut rows: Vec<&str> = text.lines().map(str::trim_end).collect();
        while rows.last().is_some_and(|line| line.is_empty()) {
            rows.pop();
        }

        // A blank line inside the grid is a ragged row, not a separator.
        let Some(width) = rows
            .iter()
            .map(|row| row.chars().count())
            .find(|&len| len > 0)
        else {
            return Err(AssetError::Empty { what: "map" });
        };

        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(AssetError::Ragged {
                    what: "map",
                    line: y + 1,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let digit = ch.to_digit(10).ok_or(AssetError::InvalidDigit {
                    what: "map",
                    line: y + 1,
                    column: x + 1,
                    ch,
                })?;
                cells.push(match digit {
                    0 => Cell::Empty,
                    n => Cell::Wall(n as TextureId),
                });
            }
        }

        Ok(Self {
            width,
            height: rows.len(),
            cells,
        })
    }

    /// The built-in dungeon layout.
    pub fn embedded() -> Result<Self, AssetError> {
        Self::parse(EMBEDDED_MAP)
    }

    /// Build a `width` x `height` map with a solid border and an empty interior.
    pub fn bordered(width: usize, height: usize, texture: TextureId) -> Self {
        let mut cells = vec![Cell::Empty; width * height];
        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
                    cells[y * width + x] = Cell::Wall(texture);
                }
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// Cell at `(x, y)`, or `None` outside the grid.
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    #[inline]
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).map_or(true, Cell::is_wall)
    }

    /// Texture id of the wall at `(x, y)`; `0` for empty cells.
    pub fn texture_at(&self, x: i32, y: i32) -> TextureId {
        match self.cell(x, y) {
            Some(Cell::Wall(id)) => id,
            Some(Cell::Empty) => 0,
            None => OUT_OF_BOUNDS_TEXTURE,
        }
    }

    /// Whether the cell containing `pos` is a wall.
    pub fn is_wall_at(&self, pos: Vec2) -> bool {
        if !pos.x.is_finite() || !pos.y.is_finite() {
            return true;
        }
        let (x, y) = pos.cell();
        self.is_wall(x, y)
    }

    /// Upper bound on DDA steps: a ray crosses at most every column and row
    /// once before leaving the grid.
    pub fn max_ray_steps(&self) -> usize {
        self.width + self.height + 2
    }

    /// Highest texture id referenced by any wall.
    pub fn max_texture_id(&self) -> TextureId {
        self.cells
            .iter()
            .filter_map(|c| match c {
                Cell::Wall(id) => Some(*id),
                Cell::Empty => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// Spawn point: centre of the middle cell when it is empty, otherwise the
    /// centre of the first empty cell in row-major order.
    pub fn default_spawn(&self) -> Option<Vec2> {
        let (cx, cy) = ((self.width / 2) as i32, (self.height / 2) as i32);
        if !self.is_wall(cx, cy) {
            return Some(cell_centre(cx, cy));
        }
        self.cells
            .iter()
            .position(|c| !c.is_wall())
            .map(|i| cell_centre((i % self.width) as i32, (i / self.width) as i32))
    }
}

fn cell_centre(x: i32, y: i32) -> Vec2 {
    Vec2::new(x as f64 + 0.5, y as f64 + 0.5)
}
