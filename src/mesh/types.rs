//! Mesh buffers produced by the contour mesher.

use serde::{Deserialize, Serialize};

/// Which surface a mesh represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeshKind {
    /// Cap over solid rock at wall height.
    Floor,
    /// Vertical skirt along the cave outline.
    Wall,
    /// Ground of the open cave, shaded by region.
    Interior,
}

impl MeshKind {
    pub fn name(&self) -> &'static str {
        match self {
            MeshKind::Floor => "floor",
            MeshKind::Wall => "walls",
            MeshKind::Interior => "interior",
        }
    }
}

/// Indexed triangle mesh.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub kind: MeshKind,
    pub vertices: Vec<[f32; 3]>,
    /// Three indices per triangle.
    pub triangles: Vec<u32>,
    /// One texture coordinate per vertex; empty unless the mesh is shaded.
    pub uvs: Vec<f32>,
}

impl Mesh {
    pub fn new(kind: MeshKind) -> Self {
        Self {
            kind,
            vertices: Vec::new(),
            triangles: Vec::new(),
            uvs: Vec::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Triangles as index triples.
    pub fn faces(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.triangles.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Raw vertex data for uploading to a vertex buffer.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index data for uploading to an index buffer.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }
}

/// Everything the mesher produces for one cave.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeshSet {
    pub floor: Mesh,
    pub walls: Mesh,
    pub interior: Option<Mesh>,
}

impl MeshSet {
    pub fn meshes(&self) -> impl Iterator<Item = &Mesh> {
        [&self.floor, &self.walls].into_iter().chain(self.interior.as_ref())
    }
}
