//! Grid <-> world coordinate mapping.
//!
//! The mesh is centred on the world origin in the XZ plane with Y up. Control
//! node (x, y) of the bordered grid sits at the centre of its square.

use serde::{Deserialize, Serialize};

use super::squares::NodeKey;
use crate::cave::grid::GridBuffer;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridTransform {
    /// Bordered grid width in cells.
    pub width: usize,
    /// Bordered grid height in cells.
    pub height: usize,
    pub border: usize,
    pub square_size: f32,
}

impl GridTransform {
    pub fn new(grid: &GridBuffer, square_size: f32) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            border: grid.border(),
            square_size,
        }
    }

    fn half_extent(&self) -> (f32, f32) {
        (
            self.width as f32 * self.square_size / 2.0,
            self.height as f32 * self.square_size / 2.0,
        )
    }

    /// World position of a lattice node at the given elevation.
    pub fn node_position(&self, key: NodeKey, elevation: f32) -> [f32; 3] {
        let (half_w, half_h) = self.half_extent();
        let half_square = self.square_size / 2.0;
        [
            -half_w + (key.x as f32 + 1.0) * half_square,
            elevation,
            -half_h + (key.y as f32 + 1.0) * half_square,
        ]
    }

    /// Centre of a grid cell at ground level.
    pub fn grid_to_world(&self, x: i32, y: i32) -> [f32; 3] {
        let (half_w, half_h) = self.half_extent();
        [
            -half_w + (x as f32 + 0.5) * self.square_size,
            0.0,
            -half_h + (y as f32 + 0.5) * self.square_size,
        ]
    }

    /// Cell whose centre is nearest to a world position (elevation ignored).
    /// May fall outside the grid.
    pub fn world_to_grid(&self, position: [f32; 3]) -> (i32, i32) {
        let (half_w, half_h) = self.half_extent();
        (
            ((position[0] + half_w) / self.square_size).floor() as i32,
            ((position[2] + half_h) / self.square_size).floor() as i32,
        )
    }

    /// Bordered grid coordinates to interior (unpadded) coordinates.
    pub fn to_interior(&self, x: i32, y: i32) -> (i32, i32) {
        (x - self.border as i32, y - self.border as i32)
    }
}
