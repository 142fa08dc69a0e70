//! Framebuffer and style types for terminal rendering.

use std::ops::Range;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Multiply every channel by `factor`, clamped to `[0, 1]`.
    pub fn scaled(self, factor: f64) -> Self {
        let f = if factor.is_finite() {
            factor.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let channel = |c: u8| (c as f64 * f).round() as u8;
        Self::new(channel(self.r), channel(self.g), channel(self.b))
    }

    /// Channel-wise product, treating `tint` as a filter.
    pub fn tinted(self, tint: Rgb) -> Self {
        let channel = |a: u8, b: u8| ((a as u16 * b as u16 + 127) / 255) as u8;
        Self::new(
            channel(self.r, tint.r),
            channel(self.g, tint.g),
            channel(self.b, tint.b),
        )
    }
}

/// Per-cell colours. Shading is carried by the colours themselves; `bold`
/// only marks overlay glyphs such as the minimap arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
        }
    }

    pub const fn into_cell(self, ch: char) -> Cell {
        Cell { ch, style: self }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::BLACK)
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        CellStyle::default().into_cell(' ')
    }
}

/// Screen-sized grid of styled cells, stored row-major.
///
/// Walls are drawn a column at a time and flushed a row at a time, so both
/// access patterns are provided. Writes outside the grid are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize to `width` x `height`, blanking every cell.
    ///
    /// The allocation is kept, so shrinking and growing back is free.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells
            .resize(width as usize * height as usize, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        let range = self.row_range(y)?;
        Some(&self.cells[range])
    }

    pub fn row_mut(&mut self, y: u16) -> Option<&mut [Cell]> {
        let range = self.row_range(y)?;
        Some(&mut self.cells[range])
    }

    fn row_range(&self, y: u16) -> Option<Range<usize>> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        Some(start..start + self.width as usize)
    }

    #[inline]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, style.into_cell(ch));
    }

    /// Fill `rows` of column `x`, clipped to the grid.
    pub fn fill_column(&mut self, x: u16, rows: Range<u16>, cell: Cell) {
        if x >= self.width {
            return;
        }
        let stride = self.width as usize;
        let end = rows.end.min(self.height);
        for y in rows.start..end {
            self.cells[y as usize * stride + x as usize] = cell;
        }
    }

    /// Fill a `w` x `h` rectangle at `(x, y)`, clipped to the grid.
    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, cell: Cell) {
        let x_end = x.saturating_add(w).min(self.width);
        if x >= x_end {
            return;
        }
        for row in y..y.saturating_add(h).min(self.height) {
            if let Some(cells) = self.row_mut(row) {
                cells[x as usize..x_end as usize].fill(cell);
            }
        }
    }
}
