//! Cell states of the cave grid.

use serde::{Deserialize, Serialize};

/// Code returned by integer lookups that fall outside the bordered grid.
pub const OUTSIDE_CODE: i32 = -2;

/// Code of a wall cell in the integer domain.
pub const WALL_CODE: i32 = -1;

/// Code of an open cell that has not been assigned to a region.
pub const OPEN_CODE: i32 = 0;

/// State of one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Solid rock. Everything outside the grid reads as wall.
    Wall,
    /// Open floor not (yet) claimed by a region.
    #[default]
    Open,
    /// Open floor belonging to a surviving region, indexed from 1.
    Region(u32),
    /// Open floor carved by a bridge between regions.
    Bridge,
}

impl Cell {
    /// Solid cells are the "active" corners for contouring.
    pub fn is_wall(&self) -> bool {
        matches!(self, Cell::Wall)
    }

    pub fn is_open(&self) -> bool {
        !self.is_wall()
    }

    /// Integer code: wall = -1, open = 0, region i = i, bridge = N + 1.
    pub fn code(&self, region_count: u32) -> i32 {
        match self {
            Cell::Wall => WALL_CODE,
            Cell::Open => OPEN_CODE,
            Cell::Region(index) => *index as i32,
            Cell::Bridge => region_count as i32 + 1,
        }
    }
}

/// A grid coordinate. Signed so that neighbour and disc offsets can step
/// past the edges before being range checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
}

impl Tile {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance_sq(&self, other: &Tile) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    /// The four orthogonal neighbours, in left, right, down, up order.
    pub fn neighbors(&self) -> [Tile; 4] {
        [
            Tile::new(self.x - 1, self.y),
            Tile::new(self.x + 1, self.y),
            Tile::new(self.x, self.y - 1),
            Tile::new(self.x, self.y + 1),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(Cell::Wall.code(3), -1);
        assert_eq!(Cell::Open.code(3), 0);
        assert_eq!(Cell::Region(2).code(3), 2);
        assert_eq!(Cell::Bridge.code(3), 4);
    }

    #[test]
    fn test_only_wall_is_active() {
        assert!(Cell::Wall.is_wall());
        assert!(!Cell::Open.is_wall());
        assert!(!Cell::Region(1).is_wall());
        assert!(!Cell::Bridge.is_wall());
    }

    #[test]
    fn test_distance_sq() {
        assert_eq!(Tile::new(1, 2).distance_sq(&Tile::new(4, 6)), 25);
    }
}
