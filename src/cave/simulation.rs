//! Cellular automaton that turns random noise into cave shapes.
//!
//! `random_fill` seeds the grid with walls at the configured density,
//! `smooth` then runs majority-vote passes over the double buffer.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::cave::cell::Cell;
use crate::cave::grid::GridBuffer;
use crate::config::{EntryPocket, Neighborhood};
use crate::error::Result;
use crate::tilemap::Tilemap;

/// Moore rule: walls above this count win, below it open up.
const MOORE_MAJORITY: i32 = 4;

/// Half-width of the window rule (5x5).
const WINDOW_RADIUS: i32 = 2;

pub struct CaveSimulator {
    neighborhood: Neighborhood,
    fill_percent: u32,
    wall_rim: bool,
    entry_pocket: Option<EntryPocket>,
    protected: Tilemap<bool>,
}

impl CaveSimulator {
    pub fn new(
        width: usize,
        height: usize,
        neighborhood: Neighborhood,
        fill_percent: u32,
        wall_rim: bool,
        entry_pocket: Option<EntryPocket>,
    ) -> Self {
        let mut protected = Tilemap::new_with(width, height, false);
        if let Some(pocket) = entry_pocket {
            for (x, y, cell) in protected.iter_mut() {
                *cell = pocket.contains(x, y);
            }
        }
        Self {
            neighborhood,
            fill_percent,
            wall_rim,
            entry_pocket,
            protected,
        }
    }

    /// Cells that smoothing must leave alone.
    pub fn is_protected(&self, x: usize, y: usize) -> bool {
        *self.protected.get(x, y)
    }

    /// Fill every interior cell with wall or open. The rim (if enabled) is
    /// forced to wall and the entry pocket is forced open on top of that.
    pub fn random_fill(&self, grid: &mut GridBuffer, rng: &mut ChaCha8Rng) -> Result<()> {
        let width = grid.interior_width();
        let height = grid.interior_height();

        for y in 0..height {
            for x in 0..width {
                let on_rim = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                // Always draw so the sequence does not depend on the rim setting
                let roll = rng.gen_range(0..100);
                let cell = if self.entry_pocket.is_some_and(|p| p.contains(x, y)) {
                    Cell::Open
                } else if self.wall_rim && on_rim {
                    Cell::Wall
                } else if roll < self.fill_percent {
                    Cell::Wall
                } else {
                    Cell::Open
                };
                grid.set(x as i32, y as i32, cell)?;
            }
        }

        log::debug!(
            "random fill: {} of {} cells are wall",
            grid.count(|c| c.is_wall()),
            width * height
        );
        Ok(())
    }

    /// Run `iterations` smoothing passes, each committed as a whole.
    pub fn smooth(&self, grid: &mut GridBuffer, iterations: usize) -> Result<()> {
        for iteration in 0..iterations {
            grid.begin_pass();
            let result = self.smooth_pass(grid);
            grid.end_pass();
            result?;
            log::debug!(
                "smoothing pass {}: {} wall cells",
                iteration + 1,
                grid.count(|c| c.is_wall())
            );
        }
        Ok(())
    }

    fn smooth_pass(&self, grid: &mut GridBuffer) -> Result<()> {
        let width = grid.interior_width();
        let height = grid.interior_height();

        for y in 0..height {
            for x in 0..width {
                let current = grid.get(x as i32, y as i32);
                let next = if self.is_protected(x, y) {
                    current
                } else {
                    match self.vote(grid, x as i32, y as i32) {
                        Some(true) => Cell::Wall,
                        Some(false) => Cell::Open,
                        None => current,
                    }
                };
                grid.set(x as i32, y as i32, next)?;
            }
        }
        Ok(())
    }

    /// `Some(true)` for wall, `Some(false)` for open, `None` to keep the cell.
    fn vote(&self, grid: &GridBuffer, x: i32, y: i32) -> Option<bool> {
        match self.neighborhood {
            Neighborhood::Moore => {
                let walls = moore_wall_count(grid, x, y);
                if walls > MOORE_MAJORITY {
                    Some(true)
                } else if walls < MOORE_MAJORITY {
                    Some(false)
                } else {
                    None
                }
            }
            Neighborhood::Window { lower, upper, edge_penalty } => {
                let fraction = window_wall_fraction(grid, x, y, edge_penalty);
                if fraction > upper {
                    Some(true)
                } else if fraction < lower {
                    Some(false)
                } else {
                    None
                }
            }
        }
    }
}

/// Walls among the in-grid 8 neighbours, plus one for cells on the map edge.
pub fn moore_wall_count(grid: &GridBuffer, x: i32, y: i32) -> i32 {
    let width = grid.interior_width() as i32;
    let height = grid.interior_height() as i32;

    let mut count = 0;
    if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
        count += 1;
    }
    for ny in (y - 1).max(0)..(y + 2).min(height) {
        for nx in (x - 1).max(0)..(x + 2).min(width) {
            if (nx, ny) != (x, y) && grid.get(nx, ny).is_wall() {
                count += 1;
            }
        }
    }
    count
}

/// Wall fraction of the 5x5 window around a cell, centre excluded.
pub fn window_wall_fraction(grid: &GridBuffer, x: i32, y: i32, edge_penalty: f32) -> f32 {
    let width = grid.interior_width() as i32;
    let height = grid.interior_height() as i32;

    let mut total = 0.0;
    let mut samples = 0;
    for dy in -WINDOW_RADIUS..=WINDOW_RADIUS {
        for dx in -WINDOW_RADIUS..=WINDOW_RADIUS {
            if dx == 0 && dy == 0 {
                continue;
            }
            samples += 1;
            let (nx, ny) = (x + dx, y + dy);
            if nx < 0 || ny < 0 || nx >= width || ny >= height {
                total += edge_penalty;
            } else if grid.get(nx, ny).is_wall() {
                total += 1.0;
            }
        }
    }
    total / samples as f32
}
