//! Marching-squares lattice: node keys and per-square configuration.
//!
//! Nodes live on a doubled lattice. Control node (x, y) has key (2x, 2y);
//! the midpoint to its right is (2x + 1, 2y) and the one above (2x, 2y + 1).
//! Adjacent squares compute the same key for a shared midpoint, which is what
//! lets the mesher reuse vertices.

use crate::cave::cell::Tile;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
    pub x: u32,
    pub y: u32,
}

impl NodeKey {
    pub fn control(x: u32, y: u32) -> Self {
        Self { x: 2 * x, y: 2 * y }
    }

    pub fn right_of(x: u32, y: u32) -> Self {
        Self { x: 2 * x + 1, y: 2 * y }
    }

    pub fn above(x: u32, y: u32) -> Self {
        Self { x: 2 * x, y: 2 * y + 1 }
    }

    pub fn is_control(&self) -> bool {
        self.x % 2 == 0 && self.y % 2 == 0
    }

    /// The grid tiles this node sits between: the same tile twice for a
    /// control node, the two ends of the edge for a midpoint.
    pub fn corner_tiles(&self) -> (Tile, Tile) {
        let base = Tile::new((self.x / 2) as i32, (self.y / 2) as i32);
        let other = Tile::new(base.x + (self.x % 2) as i32, base.y + (self.y % 2) as i32);
        (base, other)
    }
}

/// Corner and midpoint slots of one square.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Point {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
    CenterTop,
    CenterRight,
    CenterBottom,
    CenterLeft,
}

/// The square whose bottom-left control node is (x, y).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Square {
    pub x: u32,
    pub y: u32,
    /// Bit per active corner: top-left 8, top-right 4, bottom-right 2, bottom-left 1.
    pub configuration: u8,
}

impl Square {
    pub fn new(x: u32, y: u32, active: impl Fn(u32, u32) -> bool) -> Self {
        let mut configuration = 0;
        if active(x, y + 1) {
            configuration |= 8;
        }
        if active(x + 1, y + 1) {
            configuration |= 4;
        }
        if active(x + 1, y) {
            configuration |= 2;
        }
        if active(x, y) {
            configuration |= 1;
        }
        Self { x, y, configuration }
    }

    pub fn key(&self, point: Point) -> NodeKey {
        let (x, y) = (self.x, self.y);
        match point {
            Point::TopLeft => NodeKey::control(x, y + 1),
            Point::TopRight => NodeKey::control(x + 1, y + 1),
            Point::BottomRight => NodeKey::control(x + 1, y),
            Point::BottomLeft => NodeKey::control(x, y),
            Point::CenterTop => NodeKey::right_of(x, y + 1),
            Point::CenterRight => NodeKey::above(x + 1, y),
            Point::CenterBottom => NodeKey::right_of(x, y),
            Point::CenterLeft => NodeKey::above(x, y),
        }
    }
}
