//! Boundary edge tracking.
//!
//! Every triangle edge is toggled into the set: an edge shared by two
//! triangles is inserted by the first and removed by the second, so only the
//! silhouette survives. Surviving edges keep the orientation opposite to the
//! triangle that inserted them, which makes extruded walls face into the
//! open cave.

use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoundaryEdges {
    // Keyed by (min, max) so both orientations collide; ordered so that wall
    // generation is deterministic.
    edges: BTreeMap<(u32, u32), (u32, u32)>,
}

impl BoundaryEdges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the triangle edge `a -> b`.
    pub fn toggle(&mut self, a: u32, b: u32) {
        let key = (a.min(b), a.max(b));
        if self.edges.remove(&key).is_none() {
            self.edges.insert(key, (b, a));
        }
    }

    /// Register all three edges of a triangle.
    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.toggle(a, b);
        self.toggle(b, c);
        self.toggle(c, a);
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn contains(&self, a: u32, b: u32) -> bool {
        self.edges.contains_key(&(a.min(b), a.max(b)))
    }

    /// Oriented boundary edges.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.edges.values().copied()
    }
}
