//! Wall skirt extrusion.

use super::edges::BoundaryEdges;
use super::types::{Mesh, MeshKind};

/// Drop every boundary edge of `floor` by `height` into a vertical quad:
/// top-left, top-right, bottom-right, bottom-left.
pub fn extrude_walls(floor: &Mesh, boundary: &BoundaryEdges, height: f32) -> Mesh {
    let mut walls = Mesh::new(MeshKind::Wall);
    walls.vertices.reserve(boundary.len() * 4);
    walls.triangles.reserve(boundary.len() * 6);

    for (a, b) in boundary.iter() {
        let top_left = floor.vertices[a as usize];
        let top_right = floor.vertices[b as usize];
        let lowered = |v: [f32; 3]| [v[0], v[1] - height, v[2]];

        let start = walls.vertices.len() as u32;
        walls.vertices.push(top_left);
        walls.vertices.push(top_right);
        walls.vertices.push(lowered(top_right));
        walls.vertices.push(lowered(top_left));

        walls.triangles.extend_from_slice(&[start, start + 1, start + 2]);
        walls.triangles.extend_from_slice(&[start + 2, start + 3, start]);
    }

    walls
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_quad_per_edge() {
        let mut floor = Mesh::new(MeshKind::Floor);
        floor.vertices = vec![[0.0, 5.0, 0.0], [1.0, 5.0, 0.0], [1.0, 5.0, 1.0]];
        floor.triangles = vec![0, 1, 2];
        let mut boundary = BoundaryEdges::new();
        boundary.add_triangle(0, 1, 2);

        let walls = extrude_walls(&floor, &boundary, 5.0);

        assert_eq!(walls.kind, MeshKind::Wall);
        assert_eq!(walls.vertex_count(), 12);
        assert_eq!(walls.triangle_count(), 6);
        // First edge in key order is (0, 1), stored as 1 -> 0
        assert_eq!(walls.vertices[0], [1.0, 5.0, 0.0]);
        assert_eq!(walls.vertices[1], [0.0, 5.0, 0.0]);
        assert_eq!(walls.vertices[2], [0.0, 0.0, 0.0]);
        assert_eq!(walls.vertices[3], [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_no_edges_no_walls() {
        let walls = extrude_walls(&Mesh::new(MeshKind::Floor), &BoundaryEdges::new(), 3.0);
        assert!(walls.is_empty());
        assert_eq!(walls.vertex_count(), 0);
    }
}
