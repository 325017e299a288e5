//! Region segmentation
//!
//! Splits the grid into maximal 4-connected components, removes wall specks
//! and undersized rooms, and labels the surviving rooms `Region(1..=N)` in
//! discovery order.

use std::collections::VecDeque;

use crate::cave::cell::{Cell, Tile};
use crate::cave::grid::GridBuffer;
use crate::error::Result;
use crate::tilemap::Tilemap;

/// A connected set of same-kind cells.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    /// Region index once labelled; 0 while unassigned.
    pub index: u32,
    /// Member tiles in discovery order.
    pub tiles: Vec<Tile>,
    /// Members with at least one neighbour of the other kind.
    pub edge_tiles: Vec<Tile>,
    /// True if the region contains the grid origin.
    pub is_entry: bool,
}

impl Region {
    pub fn size(&self) -> usize {
        self.tiles.len()
    }
}

/// Result of a segmentation run.
#[derive(Clone, Debug, Default)]
pub struct Segmentation {
    /// Surviving rooms; `regions[i].index == i + 1`.
    pub regions: Vec<Region>,
    /// Wall pockets that were opened up.
    pub dissolved_walls: usize,
    /// Rooms that were filled in.
    pub discarded_rooms: usize,
}

/// Breadth-first fill from `start` over 4-connected cells of the same kind
/// (wall or open). Marks members in `visited`; never writes the grid.
pub fn flood_fill(grid: &GridBuffer, visited: &mut Tilemap<bool>, start: Tile) -> Region {
    let target = grid.get(start.x, start.y).is_wall();
    let mut region = Region {
        index: 0,
        tiles: Vec::new(),
        edge_tiles: Vec::new(),
        is_entry: false,
    };

    let mut queue = VecDeque::new();
    visited.set(start.x as usize, start.y as usize, true);
    queue.push_back(start);

    while let Some(tile) = queue.pop_front() {
        region.tiles.push(tile);
        if tile.x == 0 && tile.y == 0 {
            region.is_entry = true;
        }

        let mut is_edge = false;
        for n in tile.neighbors() {
            // Off-grid neighbours read as wall
            if grid.get(n.x, n.y).is_wall() != target {
                is_edge = true;
                continue;
            }
            if visited.try_get(n.x, n.y) == Some(&false) {
                visited.set(n.x as usize, n.y as usize, true);
                queue.push_back(n);
            }
        }
        if is_edge {
            region.edge_tiles.push(tile);
        }
    }

    region
}

/// Two-pass segmentation. Wall pockets smaller than `wall_threshold` become
/// open; rooms smaller than `room_threshold` become wall unless they hold
/// the entrance. Every interior cell ends up `Wall` or `Region(_)`.
pub fn segment(grid: &mut GridBuffer, wall_threshold: usize, room_threshold: usize) -> Result<Segmentation> {
    let width = grid.interior_width();
    let height = grid.interior_height();
    let mut result = Segmentation::default();

    let mut visited = Tilemap::new_with(width, height, false);
    for x in 0..width {
        for y in 0..height {
            if *visited.get(x, y) || !grid.get(x as i32, y as i32).is_wall() {
                continue;
            }
            let pocket = flood_fill(grid, &mut visited, Tile::new(x as i32, y as i32));
            if pocket.size() < wall_threshold {
                relabel(grid, &pocket.tiles, Cell::Open)?;
                result.dissolved_walls += 1;
            }
        }
    }

    visited.fill(false);
    for x in 0..width {
        for y in 0..height {
            if *visited.get(x, y) || grid.get(x as i32, y as i32).is_wall() {
                continue;
            }
            let mut room = flood_fill(grid, &mut visited, Tile::new(x as i32, y as i32));
            if room.size() < room_threshold && !room.is_entry {
                relabel(grid, &room.tiles, Cell::Wall)?;
                result.discarded_rooms += 1;
            } else {
                room.index = result.regions.len() as u32 + 1;
                relabel(grid, &room.tiles, Cell::Region(room.index))?;
                result.regions.push(room);
            }
        }
    }

    log::debug!(
        "segmentation: {} regions kept, {} rooms discarded, {} wall pockets opened",
        result.regions.len(),
        result.discarded_rooms,
        result.dissolved_walls
    );
    Ok(result)
}

fn relabel(grid: &mut GridBuffer, tiles: &[Tile], cell: Cell) -> Result<()> {
    for tile in tiles {
        grid.set(tile.x, tile.y, cell)?;
    }
    Ok(())
}
