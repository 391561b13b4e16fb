//! Fixed-size occupancy grid.
//!
//! The board only answers one question for decision logic: *is this cell
//! blocked right now?*  The orchestrator rebuilds it from actor positions at
//! the end of every round.  Each cell also carries an optional glyph so that
//! [`Board::render`] can show what is blocking it; the glyph never influences
//! a decision.

use std::fmt;

use wh_core::Vector;

use crate::{SpatialError, SpatialResult};

/// Glyph rendered for a free cell.
const FREE_GLYPH: char = '·';

/// Glyph rendered for a blocked cell that has no glyph of its own.
const BLOCKED_GLYPH: char = '#';

/// One grid cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub blocked: bool,
    /// Display hint only.
    pub glyph: Option<char>,
}

impl Cell {
    fn glyph(&self) -> char {
        match (self.blocked, self.glyph) {
            (false, _)          => FREE_GLYPH,
            (true, Some(glyph)) => glyph,
            (true, None)        => BLOCKED_GLYPH,
        }
    }
}

/// A `width × height` grid of [`Cell`]s stored row-major.
///
/// Valid coordinates satisfy `0 ≤ x < width` and `0 ≤ y < height`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    width:  u32,
    height: u32,
    cells:  Vec<Cell>,
}

impl Board {
    /// A board with every cell free.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `true` if `(x, y)` lies on the board.
    #[inline]
    pub fn is_in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    pub fn contains(&self, pos: Vector) -> bool {
        self.is_in_bounds(pos.x, pos.y)
    }

    /// `true` if `pos` lies on the outer ring of the board.
    pub fn is_on_boundary(&self, pos: Vector) -> bool {
        self.contains(pos)
            && (pos.x == 0
                || pos.y == 0
                || pos.x as u32 == self.width - 1
                || pos.y as u32 == self.height - 1)
    }

    #[inline]
    fn offset(&self, pos: Vector) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    /// Mutable access to the cell at `(x, y)`.
    pub fn at(&mut self, x: i32, y: i32) -> SpatialResult<&mut Cell> {
        self.cell_mut(Vector::new(x, y))
            .ok_or(SpatialError::OutOfBounds(Vector::new(x, y)))
    }

    pub fn cell(&self, pos: Vector) -> Option<&Cell> {
        self.offset(pos).map(|i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, pos: Vector) -> Option<&mut Cell> {
        self.offset(pos).map(move |i| &mut self.cells[i])
    }

    /// `true` if `pos` is blocked.  Off-board positions count as blocked.
    #[inline]
    pub fn is_blocked(&self, pos: Vector) -> bool {
        self.cell(pos).is_none_or(|cell| cell.blocked)
    }

    /// Mark `pos` as blocked by something drawn as `glyph`.
    pub fn occupy(&mut self, pos: Vector, glyph: char) -> SpatialResult<()> {
        let cell = self.cell_mut(pos).ok_or(SpatialError::OutOfBounds(pos))?;
        cell.blocked = true;
        cell.glyph   = Some(glyph);
        Ok(())
    }

    /// Free `pos`.
    pub fn vacate(&mut self, pos: Vector) -> SpatialResult<()> {
        let cell = self.cell_mut(pos).ok_or(SpatialError::OutOfBounds(pos))?;
        *cell = Cell::default();
        Ok(())
    }

    /// Reset every cell to free.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Number of blocked cells.
    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|c| c.blocked).count()
    }

    /// Human-readable grid: one glyph per cell followed by a space, one line
    /// per row.  Diagnostics only.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() * 3 + self.height as usize);
        for row in self.cells.chunks(self.width.max(1) as usize) {
            for cell in row {
                out.push(cell.glyph());
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
