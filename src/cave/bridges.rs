//! Bridge carving
//!
//! Each accepted link is rasterised as an integer line between its two edge
//! tiles and widened by stamping a disc of bridge cells on every sample.
//! Carving writes raw cells, so it has to happen before the border.

use crate::cave::cell::{Cell, Tile};
use crate::cave::connectivity::BridgeNode;
use crate::cave::grid::GridBuffer;
use crate::error::Result;

/// Digital line from `from` to `to`, both ends included. The dominant axis
/// advances every sample; the other axis advances whenever the accumulated
/// error reaches the dominant delta.
pub fn line_tiles(from: Tile, to: Tile) -> Vec<Tile> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;

    let mut step = dx.signum();
    let mut gradient_step = dy.signum();
    let mut longest = dx.abs();
    let mut shortest = dy.abs();

    let inverted = longest < shortest;
    if inverted {
        std::mem::swap(&mut longest, &mut shortest);
        std::mem::swap(&mut step, &mut gradient_step);
    }

    let mut line = Vec::with_capacity(longest as usize + 1);
    let (mut x, mut y) = (from.x, from.y);
    let mut error = longest / 2;
    for _ in 0..=longest {
        line.push(Tile::new(x, y));

        if inverted {
            y += step;
        } else {
            x += step;
        }

        error += shortest;
        if error >= longest {
            if inverted {
                x += gradient_step;
            } else {
                y += gradient_step;
            }
            error -= longest;
        }
    }
    line
}

/// Set every in-range cell strictly within `radius` of `center` to a bridge.
/// Returns how many cells changed.
pub fn stamp_disc(grid: &mut GridBuffer, center: Tile, radius: i32) -> Result<usize> {
    let r = radius.max(0) as i64;
    let (cx, cy) = (center.x as i64, center.y as i64);
    // Only the part of the disc's bounding box that overlaps the grid
    let x_range = (cx - r).max(0)..=(cx + r).min(grid.width() as i64 - 1);
    let y_range = (cy - r).max(0)..=(cy + r).min(grid.height() as i64 - 1);

    let mut changed = 0;
    for y in y_range {
        for x in x_range.clone() {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy >= r * r {
                continue;
            }
            let (x, y) = (x as i32, y as i32);
            if grid.get(x, y) != Cell::Bridge {
                grid.set(x, y, Cell::Bridge)?;
                changed += 1;
            }
        }
    }
    Ok(changed)
}

/// Carve one corridor between two tiles.
pub fn carve_bridge(grid: &mut GridBuffer, from: Tile, to: Tile, radius: i32) -> Result<usize> {
    let mut changed = 0;
    for tile in line_tiles(from, to) {
        changed += stamp_disc(grid, tile, radius)?;
    }
    Ok(changed)
}

/// Carve every link of the spanning tree. Returns the number of cells turned
/// into bridge.
pub fn carve_bridges(grid: &mut GridBuffer, bridges: &[BridgeNode], radius: i32) -> Result<usize> {
    let mut changed = 0;
    for bridge in bridges {
        changed += carve_bridge(grid, bridge.tile_a, bridge.tile_b, radius)?;
    }
    log::debug!("carved {} bridges over {} cells", bridges.len(), changed);
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cave::connectivity::build_mst;
    use crate::cave::regions::segment;
    use crate::error::CaveError;
    use crate::tilemap::Tilemap;
    use std::collections::VecDeque;

    #[test]
    fn test_line_shallow() {
        let line = line_tiles(Tile::new(0, 0), Tile::new(4, 2));
        let expected: Vec<Tile> = [(0, 0), (1, 1), (2, 1), (3, 2), (4, 2)]
            .iter()
            .map(|&(x, y)| Tile::new(x, y))
            .collect();
        assert_eq!(line, expected);
    }

    #[test]
    fn test_line_steep_and_reversed() {
        let line = line_tiles(Tile::new(3, 7), Tile::new(1, 0));
        assert_eq!(line.len(), 8);
        assert_eq!(line[0], Tile::new(3, 7));
        assert_eq!(*line.last().unwrap(), Tile::new(1, 0));
        // One sample per row along the dominant axis
        for (i, tile) in line.iter().enumerate() {
            assert_eq!(tile.y, 7 - i as i32);
        }
    }

    #[test]
    fn test_line_single_point() {
        assert_eq!(line_tiles(Tile::new(2, 2), Tile::new(2, 2)), vec![Tile::new(2, 2)]);
    }

    #[test]
    fn test_disc_is_strict() {
        let mut grid = GridBuffer::new_with(9, 9, Cell::Wall);
        let changed = stamp_disc(&mut grid, Tile::new(4, 4), 2).unwrap();

        // dx^2 + dy^2 < 4 is the 3x3 block
        assert_eq!(changed, 9);
        assert_eq!(grid.get(5, 5), Cell::Bridge);
        assert_eq!(grid.get(6, 4), Cell::Wall);
    }

    #[test]
    fn test_disc_clips_at_edges() {
        let mut grid = GridBuffer::new_with(4, 4, Cell::Wall);
        let changed = stamp_disc(&mut grid, Tile::new(0, 0), 2).unwrap();
        assert_eq!(changed, 4);
    }

    #[test]
    fn test_huge_disc_covers_grid() {
        let mut grid = GridBuffer::new_with(5, 4, Cell::Wall);
        let changed = stamp_disc(&mut grid, Tile::new(2, 2), 50_000).unwrap();
        assert_eq!(changed, 20);

        let changed = stamp_disc(&mut grid, Tile::new(i32::MAX, i32::MIN), i32::MAX).unwrap();
        assert_eq!(changed, 0);
    }

    #[test]
    fn test_carving_after_border_fails() {
        let mut grid = GridBuffer::new_with(6, 6, Cell::Wall);
        grid.set_border(1).unwrap();
        let result = carve_bridge(&mut grid, Tile::new(1, 1), Tile::new(3, 1), 1);
        assert!(matches!(result, Err(CaveError::BorderedWrite { .. })));
    }

    fn open_path_exists(grid: &GridBuffer, from: Tile, to: Tile) -> bool {
        let mut seen = Tilemap::new_with(grid.width(), grid.height(), false);
        let mut queue = VecDeque::from([from]);
        seen.set(from.x as usize, from.y as usize, true);
        while let Some(tile) = queue.pop_front() {
            if tile == to {
                return true;
            }
            for n in tile.neighbors() {
                if grid.get(n.x, n.y).is_open() && seen.try_get(n.x, n.y) == Some(&false) {
                    seen.set(n.x as usize, n.y as usize, true);
                    queue.push_back(n);
                }
            }
        }
        false
    }

    #[test]
    fn test_two_rooms_get_one_bridge() {
        let mut grid = GridBuffer::from_rows(&[
            "...#...",
            "...#...",
            "...#...",
            "...#...",
        ]);
        let seg = segment(&mut grid, 0, 0).unwrap();
        assert_eq!(seg.regions.len(), 2);
        assert_eq!(seg.regions[0].size(), seg.regions[1].size());

        let bridges = build_mst(&seg.regions);
        assert_eq!(bridges.len(), 1);
        assert_eq!(bridges[0].distance_sq, 4);

        let from = Tile::new(0, 0);
        let to = Tile::new(6, 3);
        assert!(!open_path_exists(&grid, from, to));

        carve_bridges(&mut grid, &bridges, 1).unwrap();
        assert!(open_path_exists(&grid, from, to));
        assert_eq!(grid.count(|c| c == Cell::Bridge), 3);
    }
}
