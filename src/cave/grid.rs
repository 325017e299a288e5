//! Double-buffered cave grid with a one-way border overlay.
//!
//! All reads go through the authoritative (read) buffer. While a pass is
//! open, writes land in the other buffer so a full sweep sees a stable
//! prior state; `end_pass` commits the sweep by swapping the two.
//!
//! Applying the border is the last step before meshing. Afterwards reads use
//! padded coordinates (anything outside the interior reads as wall) and every
//! write is rejected.

use crate::cave::cell::Cell;
use crate::error::{CaveError, Result};
use crate::tilemap::Tilemap;

#[derive(Clone, Debug)]
pub struct GridBuffer {
    buffers: [Tilemap<Cell>; 2],
    read: usize,
    write: usize,
    border: Option<usize>,
}

impl GridBuffer {
    /// Create an unbordered grid with every cell open.
    pub fn new(width: usize, height: usize) -> Self {
        Self::new_with(width, height, Cell::Open)
    }

    pub fn new_with(width: usize, height: usize, cell: Cell) -> Self {
        Self {
            buffers: [
                Tilemap::new_with(width, height, cell),
                Tilemap::new_with(width, height, cell),
            ],
            read: 0,
            write: 0,
            border: None,
        }
    }

    /// Build a grid from rows of text, top row first: `#` is wall, anything
    /// else is open. Handy for tests and fixtures.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut grid = Self::new(width, height);
        for (row, line) in rows.iter().enumerate() {
            let y = height - 1 - row;
            for (x, ch) in line.chars().enumerate() {
                if ch == '#' {
                    for buffer in grid.buffers.iter_mut() {
                        buffer.set(x, y, Cell::Wall);
                    }
                }
            }
        }
        grid
    }

    pub fn interior_width(&self) -> usize {
        self.buffers[self.read].width
    }

    pub fn interior_height(&self) -> usize {
        self.buffers[self.read].height
    }

    /// Border size, or 0 while the grid is still writable.
    pub fn border(&self) -> usize {
        self.border.unwrap_or(0)
    }

    pub fn is_bordered(&self) -> bool {
        self.border.is_some()
    }

    /// Addressable width, including the border on both sides.
    pub fn width(&self) -> usize {
        self.interior_width() + 2 * self.border()
    }

    /// Addressable height, including the border on both sides.
    pub fn height(&self) -> usize {
        self.interior_height() + 2 * self.border()
    }

    pub fn in_range(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height()
    }

    /// Read a cell in addressable coordinates. Border cells and anything
    /// outside the grid read as wall.
    pub fn get(&self, x: i32, y: i32) -> Cell {
        let b = self.border() as i32;
        self.buffers[self.read]
            .try_get(x - b, y - b)
            .copied()
            .unwrap_or(Cell::Wall)
    }

    /// Write a cell in interior coordinates.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> Result<()> {
        if self.is_bordered() {
            log::error!("rejected write to ({}, {}) on a bordered grid", x, y);
            return Err(CaveError::BorderedWrite { x, y });
        }
        let target = &mut self.buffers[self.write];
        if !target.contains(x, y) {
            return Err(CaveError::OutOfBounds {
                x,
                y,
                width: target.width,
                height: target.height,
            });
        }
        target.set(x as usize, y as usize, cell);
        Ok(())
    }

    /// Redirect writes to the back buffer until `end_pass`.
    pub fn begin_pass(&mut self) {
        self.write = 1 - self.read;
    }

    /// Commit the pass: the back buffer becomes authoritative.
    pub fn end_pass(&mut self) {
        if self.in_pass() {
            self.read = self.write;
        }
    }

    pub fn in_pass(&self) -> bool {
        self.read != self.write
    }

    /// Exchange the authoritative buffer without touching pass state.
    pub fn swap(&mut self) {
        let in_pass = self.in_pass();
        self.read = 1 - self.read;
        self.write = if in_pass { 1 - self.read } else { self.read };
    }

    /// Pad the grid with a wall border. Irreversible: the grid is read-only
    /// from here on.
    pub fn set_border(&mut self, size: usize) -> Result<()> {
        if self.in_pass() {
            log::error!("border requested while a pass is open");
            return Err(CaveError::PassInProgress);
        }
        if self.is_bordered() {
            log::error!("border requested twice");
            return Err(CaveError::AlreadyBordered);
        }
        self.border = Some(size);
        Ok(())
    }

    /// The authoritative interior, without border padding.
    pub fn interior(&self) -> &Tilemap<Cell> {
        &self.buffers[self.read]
    }

    /// Every addressable cell (border included), row by row from y = 0.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        let width = self.width() as i32;
        let height = self.height() as i32;
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y, self.get(x, y))))
    }

    /// Number of interior cells matching a predicate.
    pub fn count(&self, pred: impl Fn(Cell) -> bool) -> usize {
        self.interior().iter().filter(|(_, _, c)| pred(**c)).count()
    }
}
