//! Renderers for game state snapshots.
//!
//! A frame is drawn by clearing the previous one and filling one rectangle per
//! entity at `center - size / 2`, sized `size`.

use std::io::{self, Write};

use log::trace;

use invaders_core::state::GameStateSnapshot;
use invaders_core::types::Playfield;

/// Playfield pixels covered by one terminal column.
pub const CELL_WIDTH: f64 = 5.0;

/// Playfield pixels covered by one terminal row. Terminal cells are about twice
/// as tall as they are wide.
pub const CELL_HEIGHT: f64 = 10.0;

/// Drawing surface the frame driver renders into.
pub trait Renderer {
    /// Wipe everything drawn for the previous frame.
    fn clear(&mut self);
    /// Fill an axis-aligned rectangle given by its top-left corner and size.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    /// Make the finished frame visible.
    fn present(&mut self) -> io::Result<()>;
}

/// Draw one snapshot: clear, fill a rectangle per entity, present.
pub fn draw_frame(renderer: &mut dyn Renderer, snapshot: &GameStateSnapshot) -> io::Result<()> {
    renderer.clear();
    for entity in &snapshot.entities {
        let corner = entity.top_left();
        renderer.fill_rect(corner.x, corner.y, entity.size.x, entity.size.y);
    }
    renderer.present()
}

/// Character-grid renderer writing ANSI frames to a terminal.
pub struct TerminalRenderer<W: Write> {
    out: W,
    columns: usize,
    rows: usize,
    cells: Vec<bool>,
}

impl<W: Write> TerminalRenderer<W> {
    /// Grid sized so the whole playfield fits at `CELL_WIDTH × CELL_HEIGHT` pixels per cell.
    pub fn new(out: W, playfield: Playfield) -> Self {
        let columns = (playfield.width / CELL_WIDTH).ceil().max(1.0) as usize;
        let rows = (playfield.height / CELL_HEIGHT).ceil().max(1.0) as usize;
        Self {
            out,
            columns,
            rows,
            cells: vec![false; columns * rows],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn is_filled(&self, column: usize, row: usize) -> bool {
        column < self.columns && row < self.rows && self.cells[row * self.columns + column]
    }

    pub fn filled_cells(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Cell range `[first, last]` covering `[start, start + len)` pixels, clamped to `limit`.
    fn span(start: f64, len: f64, cell: f64, limit: usize) -> Option<(usize, usize)> {
        let first = (start / cell).floor();
        let last = ((start + len) / cell).ceil() - 1.0;
        let last = last.max(first);
        if !(first.is_finite() && last.is_finite()) || last < 0.0 || first >= limit as f64 {
            return None;
        }
        Some((first.max(0.0) as usize, (last as usize).min(limit - 1)))
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn clear(&mut self) {
        self.cells.fill(false);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let Some((col_start, col_end)) = Self::span(x, width, CELL_WIDTH, self.columns) else {
            return;
        };
        let Some((row_start, row_end)) = Self::span(y, height, CELL_HEIGHT, self.rows) else {
            return;
        };
        for row in row_start..=row_end {
            let base = row * self.columns;
            self.cells[base + col_start..=base + col_end].fill(true);
        }
    }

    fn present(&mut self) -> io::Result<()> {
        let mut frame = String::with_capacity((self.columns + 2) * self.rows + 8);
        // Home the cursor and clear so stale cells from the last frame vanish.
        frame.push_str("\x1b[H\x1b[2J");
        for row in self.cells.chunks(self.columns) {
            frame.extend(row.iter().map(|&filled| if filled { '#' } else { ' ' }));
            // Raw mode does not translate a bare newline into a carriage return.
            frame.push_str("\r\n");
        }
        self.out.write_all(frame.as_bytes())?;
        self.out.flush()
    }
}

/// Renderer that draws nothing; used for headless runs.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    frames: u64,
    rects: usize,
}

impl HeadlessRenderer {
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for HeadlessRenderer {
    fn clear(&mut self) {
        self.rects = 0;
    }

    fn fill_rect(&mut self, _x: f64, _y: f64, _width: f64, _height: f64) {
        self.rects += 1;
    }

    fn present(&mut self) -> io::Result<()> {
        self.frames += 1;
        trace!("frame {} with {} rects", self.frames, self.rects);
        Ok(())
    }
}
