//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! A walking player changes most of the screen every frame while a standing
//! one changes nothing, so each frame is encoded either as a row-by-row
//! repaint or as a list of changed runs, whichever the dirty share favours.
//! Entering and leaving the terminal modes is handled by
//! [`TerminalSession`](crate::session::TerminalSession).

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, FrameBuffer, Rgb};

/// Unchanged gaps shorter than this are reprinted rather than skipped with a
/// cursor move, which costs about as many bytes.
pub const MERGE_GAP: u16 = 4;

/// Share of dirty cells above which a frame is repainted row by row.
pub const REPAINT_RATIO: f64 = 0.6;

/// A horizontal span of cells to reprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

/// What one presented frame cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawStats {
    /// Cells that differ from the previous frame.
    pub dirty: usize,
    /// Cursor jumps emitted.
    pub runs: usize,
    pub repaint: bool,
    pub bytes: usize,
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    runs: Vec<Run>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            runs: Vec::new(),
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    /// Draw `fb`, then swap it into internal state.
    ///
    /// On return `fb` holds the previous frame; callers redraw every cell
    /// before the next call, so no clone is needed to keep a diff base.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<DrawStats> {
        let prev = self
            .last
            .take()
            .filter(|prev| prev.width() == fb.width() && prev.height() == fb.height());

        self.buf.clear();
        let mut stats = encode_frame_into(prev.as_ref(), fb, &mut self.runs, &mut self.buf)?;
        stats.bytes = self.buf.len();
        if !self.buf.is_empty() {
            self.stdout.write_all(&self.buf)?;
            self.stdout.flush()?;
        }

        let mut prev = prev.unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(stats)
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode `next` into `out` given what the terminal currently shows.
///
/// `prev` of `None` (first frame, resize) clears the screen first. `runs` is
/// scratch space reused between frames.
pub fn encode_frame_into(
    prev: Option<&FrameBuffer>,
    next: &FrameBuffer,
    runs: &mut Vec<Run>,
    out: &mut Vec<u8>,
) -> Result<DrawStats> {
    let area = next.width() as usize * next.height() as usize;
    let Some(prev) = prev else {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
        encode_rows(next, out)?;
        return Ok(DrawStats {
            dirty: area,
            runs: next.height() as usize,
            repaint: true,
            bytes: 0,
        });
    };

    let dirty = collect_runs(prev, next, runs);
    if dirty == 0 {
        return Ok(DrawStats::default());
    }
    if dirty as f64 > area as f64 * REPAINT_RATIO {
        encode_rows(next, out)?;
        return Ok(DrawStats {
            dirty,
            runs: next.height() as usize,
            repaint: true,
            bytes: 0,
        });
    }

    let mut pen = Pen::default();
    for run in runs.iter() {
        let Some(row) = next.row(run.y) else {
            continue;
        };
        out.queue(cursor::MoveTo(run.x, run.y))?;
        for cell in &row[run.x as usize..(run.x + run.len) as usize] {
            pen.print(out, cell)?;
        }
    }
    pen.finish(out)?;
    Ok(DrawStats {
        dirty,
        runs: runs.len(),
        repaint: false,
        bytes: 0,
    })
}

fn encode_rows(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::default();
    for y in 0..fb.height() {
        let Some(row) = fb.row(y) else {
            break;
        };
        out.queue(cursor::MoveTo(0, y))?;
        for cell in row {
            pen.print(out, cell)?;
        }
    }
    pen.finish(out)
}

/// Fill `runs` with the changed spans of `next`, merging spans separated by
/// fewer than `MERGE_GAP` clean cells. Returns the number of dirty cells.
pub fn collect_runs(prev: &FrameBuffer, next: &FrameBuffer, runs: &mut Vec<Run>) -> usize {
    runs.clear();
    let width = next.width() as usize;
    if width == 0 || prev.cells().len() != next.cells().len() {
        return 0;
    }

    let mut dirty = 0;
    let rows = prev
        .cells()
        .chunks_exact(width)
        .zip(next.cells().chunks_exact(width));
    for (y, (old, new)) in rows.enumerate() {
        let y = y as u16;
        let mut x = 0;
        while x < width {
            if old[x] == new[x] {
                x += 1;
                continue;
            }
            let start = x;
            while x < width && old[x] != new[x] {
                x += 1;
            }
            dirty += x - start;

            let (start, end) = (start as u16, x as u16);
            match runs.last_mut() {
                Some(run) if run.y == y && start - (run.x + run.len) < MERGE_GAP => {
                    run.len = end - run.x;
                }
                _ => runs.push(Run {
                    x: start,
                    y,
                    len: end - start,
                }),
            }
        }
    }
    dirty
}

/// Terminal colour state, so colours are only sent when they change.
#[derive(Debug, Default)]
struct Pen {
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    bold: bool,
}

impl Pen {
    fn print(&mut self, out: &mut Vec<u8>, cell: &Cell) -> Result<()> {
        let style = cell.style;
        if style.bold != self.bold {
            let attr = if style.bold {
                Attribute::Bold
            } else {
                Attribute::NormalIntensity
            };
            out.queue(SetAttribute(attr))?;
            self.bold = style.bold;
        }
        if self.fg != Some(style.fg) {
            out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
            self.fg = Some(style.fg);
        }
        if self.bg != Some(style.bg) {
            out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
            self.bg = Some(style.bg);
        }
        out.queue(Print(cell.ch))?;
        Ok(())
    }

    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
