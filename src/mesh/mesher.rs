//! Marching-squares contour mesher.
//!
//! Control nodes are the cells of the finished (bordered) grid. Each 2x2
//! block of nodes is one square; its configuration picks a template from
//! `cases`. Vertices are deduplicated by lattice key so neighbouring squares
//! share their edge midpoints.

use std::collections::HashMap;

use super::cases::{fan, polygons, Saddle};
use super::edges::BoundaryEdges;
use super::squares::{NodeKey, Square};
use super::transform::GridTransform;
use super::types::{Mesh, MeshKind, MeshSet};
use super::walls::extrude_walls;
use crate::cave::grid::GridBuffer;

/// A triangulated surface plus the silhouette of its triangles.
#[derive(Clone, Debug)]
pub struct Surface {
    pub mesh: Mesh,
    pub boundary: BoundaryEdges,
}

pub struct ContourMesher<'a> {
    grid: &'a GridBuffer,
    transform: GridTransform,
    region_count: u32,
    wall_height: f32,
}

impl<'a> ContourMesher<'a> {
    pub fn new(grid: &'a GridBuffer, square_size: f32, wall_height: f32, region_count: u32) -> Self {
        Self {
            grid,
            transform: GridTransform::new(grid, square_size),
            region_count,
            wall_height,
        }
    }

    pub fn transform(&self) -> GridTransform {
        self.transform
    }

    /// Floor, walls and (optionally) the interior surface.
    pub fn build(&self, interior: bool) -> MeshSet {
        let floor = self.triangulate(MeshKind::Floor);
        let walls = extrude_walls(&floor.mesh, &floor.boundary, self.wall_height);
        let interior = interior.then(|| self.triangulate(MeshKind::Interior).mesh);

        log::debug!(
            "contours: {} floor triangles, {} boundary edges, {} interior triangles",
            floor.mesh.triangle_count(),
            floor.boundary.len(),
            interior.as_ref().map_or(0, |m| m.triangle_count())
        );

        MeshSet {
            floor: floor.mesh,
            walls,
            interior,
        }
    }

    /// Triangulate one surface. `Wall` yields the extruded skirt together
    /// with the floor silhouette it was built from.
    pub fn triangulate(&self, kind: MeshKind) -> Surface {
        match kind {
            MeshKind::Floor | MeshKind::Interior => self.march(kind),
            MeshKind::Wall => {
                let floor = self.march(MeshKind::Floor);
                Surface {
                    mesh: extrude_walls(&floor.mesh, &floor.boundary, self.wall_height),
                    boundary: floor.boundary,
                }
            }
        }
    }

    fn march(&self, kind: MeshKind) -> Surface {
        let interior = kind == MeshKind::Interior;
        let mut builder = SurfaceBuilder {
            mesh: Mesh::new(kind),
            boundary: BoundaryEdges::new(),
            lookup: HashMap::new(),
            track_edges: !interior,
            elevation: if interior { 0.0 } else { self.wall_height },
        };
        let saddle = if interior { Saddle::Split } else { Saddle::Connect };
        let active = |x: u32, y: u32| self.grid.get(x as i32, y as i32).is_wall() != interior;

        let squares_x = self.transform.width.saturating_sub(1) as u32;
        let squares_y = self.transform.height.saturating_sub(1) as u32;
        for x in 0..squares_x {
            for y in 0..squares_y {
                let square = Square::new(x, y, &active);
                for polygon in polygons(square.configuration, saddle) {
                    let keys: Vec<NodeKey> = polygon.iter().map(|&p| square.key(p)).collect();
                    let indices: Vec<u32> = keys
                        .iter()
                        .map(|&key| builder.vertex(key, &self.transform, || self.shade(key)))
                        .collect();
                    for [a, b, c] in fan(&indices) {
                        builder.triangle(a, b, c);
                    }
                }
            }
        }

        Surface {
            mesh: builder.mesh,
            boundary: builder.boundary,
        }
    }

    /// Texture coordinate for an interior vertex: the larger region code of
    /// the tiles it sits between, over the region count.
    fn shade(&self, key: NodeKey) -> f32 {
        if self.region_count == 0 {
            return 0.0;
        }
        let (a, b) = key.corner_tiles();
        let code_a = self.grid.get(a.x, a.y).code(self.region_count);
        let code_b = self.grid.get(b.x, b.y).code(self.region_count);
        let code = code_a.max(code_b).max(0);
        (code as f32 / self.region_count as f32).min(1.0)
    }
}

struct SurfaceBuilder {
    mesh: Mesh,
    boundary: BoundaryEdges,
    lookup: HashMap<NodeKey, u32>,
    track_edges: bool,
    elevation: f32,
}

impl SurfaceBuilder {
    fn vertex(&mut self, key: NodeKey, transform: &GridTransform, shade: impl FnOnce() -> f32) -> u32 {
        if let Some(&index) = self.lookup.get(&key) {
            return index;
        }
        let index = self.mesh.vertices.len() as u32;
        self.mesh.vertices.push(transform.node_position(key, self.elevation));
        if self.mesh.kind == MeshKind::Interior {
            self.mesh.uvs.push(shade());
        }
        self.lookup.insert(key, index);
        index
    }

    fn triangle(&mut self, a: u32, b: u32, c: u32) {
        self.mesh.triangles.extend_from_slice(&[a, b, c]);
        if self.track_edges {
            self.boundary.add_triangle(a, b, c);
        }
    }
}
