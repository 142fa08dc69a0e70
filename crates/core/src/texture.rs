//! Wall and sprite textures.
//!
//! Wall textures are grids of digits `0`-`9` describing brightness (low is
//! darker). Sprite textures are ASCII art where `0` marks a transparent texel.

use crate::assets::AssetError;

/// Transparent texel in sprite textures.
pub const TRANSPARENT: char = '0';

/// Neutral wall texel: neither darkens nor brightens the base shade.
pub const NEUTRAL_TEXEL: u8 = 6;

/// Brightness grid sampled by wall slices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallTexture {
    width: usize,
    height: usize,
    texels: Vec<u8>,
}

impl WallTexture {
    pub fn parse(text: &str) -> Result<Self, AssetError> {
        let rows = non_empty_rows(text);
        let Some(first) = rows.first() else {
            return Err(AssetError::Empty {
                what: "wall texture",
            });
        };
        let width = first.chars().count();

        let mut texels = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(AssetError::Ragged {
                    what: "wall texture",
                    line: y + 1,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let digit = ch.to_digit(10).ok_or(AssetError::InvalidDigit {
                    what: "wall texture",
                    line: y + 1,
                    column: x + 1,
                    ch,
                })?;
                texels.push(digit as u8);
            }
        }

        Ok(Self {
            width,
            height: rows.len(),
            texels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Nearest texel at `(u, v)` in `[0, 1)`; out-of-range and non-finite
    /// coordinates are clamped to the texture edge.
    pub fn sample(&self, u: f64, v: f64) -> u8 {
        let x = texel_index(u, self.width);
        let y = texel_index(v, self.height);
        self.texels
            .get(y * self.width + x)
            .copied()
            .unwrap_or(NEUTRAL_TEXEL)
    }
}

/// ASCII-art billboard texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteTexture {
    width: usize,
    height: usize,
    chars: Vec<char>,
}

impl SpriteTexture {
    /// Rows may differ in length; short rows are padded with transparency.
    pub fn parse(text: &str) -> Result<Self, AssetError> {
        let rows: Vec<&str> = text.lines().map(str::trim_end).collect();
        let rows = trim_blank_edges(&rows);
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        if width == 0 {
            return Err(AssetError::Empty {
                what: "sprite texture",
            });
        }

        let mut chars = Vec::with_capacity(width * rows.len());
        for row in rows {
            let start = chars.len();
            chars.extend(row.chars().map(|c| if c == ' ' { TRANSPARENT } else { c }));
            chars.resize(start + width, TRANSPARENT);
        }

        Ok(Self {
            width,
            height: rows.len(),
            chars,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Character at `(u, v)`, or `None` when the texel is transparent.
    pub fn sample(&self, u: f64, v: f64) -> Option<char> {
        let x = texel_index(u, self.width);
        let y = texel_index(v, self.height);
        match self.chars.get(y * self.width + x) {
            Some(&c) if c != TRANSPARENT => Some(c),
            _ => None,
        }
    }
}

fn texel_index(t: f64, len: usize) -> usize {
    if len == 0 || !t.is_finite() || t <= 0.0 {
        return 0;
    }
    ((t * len as f64) as usize).min(len - 1)
}

fn non_empty_rows(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect()
}

fn trim_blank_edges<'a, 'b>(rows: &'b [&'a str]) -> &'b [&'a str] {
    let start = rows.iter().position(|r| !r.trim().is_empty()).unwrap_or(rows.len());
    let end = rows
        .iter()
        .rposition(|r| !r.trim().is_empty())
        .map_or(start, |i| i + 1);
    &rows[start..end]
}
