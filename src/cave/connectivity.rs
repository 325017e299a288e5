//! Region connectivity graph
//!
//! Every pair of rooms is linked by the closest pair of their edge tiles.
//! Kruskal's algorithm keeps the cheapest links that join all rooms, which
//! become the bridges to carve.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::cave::cell::Tile;
use crate::cave::regions::Region;
use crate::cave::union_find::UnionFind;

/// A candidate (or accepted) link between two regions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeNode {
    pub region_a: u32,
    pub region_b: u32,
    /// Squared distance between `tile_a` and `tile_b`.
    pub distance_sq: i64,
    pub tile_a: Tile,
    pub tile_b: Tile,
}

/// Closest pair of edge tiles between two regions. The first pair found
/// wins ties. `None` if either region has no edge tiles.
pub fn closest_edge_pair(a: &Region, b: &Region) -> Option<(i64, Tile, Tile)> {
    let mut best: Option<(i64, Tile, Tile)> = None;
    for ta in &a.edge_tiles {
        for tb in &b.edge_tiles {
            let d = ta.distance_sq(tb);
            if best.map_or(true, |(bd, _, _)| d < bd) {
                best = Some((d, *ta, *tb));
            }
        }
    }
    best
}

/// The complete graph over `regions`, in pair generation order.
pub fn all_pairs(regions: &[Region]) -> Vec<BridgeNode> {
    let mut edges = Vec::with_capacity(regions.len() * regions.len().saturating_sub(1) / 2);
    for (i, a) in regions.iter().enumerate() {
        for b in &regions[i + 1..] {
            match closest_edge_pair(a, b) {
                Some((distance_sq, tile_a, tile_b)) => edges.push(BridgeNode {
                    region_a: a.index,
                    region_b: b.index,
                    distance_sq,
                    tile_a,
                    tile_b,
                }),
                None => log::warn!(
                    "regions {} and {} cannot be linked: no edge tiles",
                    a.index,
                    b.index
                ),
            }
        }
    }
    edges
}

/// Minimum spanning tree over the region graph. Yields `regions.len() - 1`
/// links when every pair can be linked, and nothing for fewer than two
/// regions.
pub fn build_mst(regions: &[Region]) -> Vec<BridgeNode> {
    if regions.len() < 2 {
        return Vec::new();
    }

    let mut edges = all_pairs(regions);
    // Stable sort: equal distances keep pair generation order
    edges.sort_by_key(|e| e.distance_sq);

    let slots: HashMap<u32, usize> = regions.iter().enumerate().map(|(i, r)| (r.index, i)).collect();

    let target = regions.len() - 1;
    let mut sets = UnionFind::new(regions.len());
    let mut tree = Vec::with_capacity(target);
    for edge in edges {
        if sets.union(slots[&edge.region_a], slots[&edge.region_b]) {
            tree.push(edge);
            if tree.len() == target {
                break;
            }
        }
    }

    if tree.len() < target {
        log::warn!("connectivity graph is incomplete: {} of {} links", tree.len(), target);
    }
    log::debug!(
        "spanning tree: {} links, total squared length {}",
        tree.len(),
        tree.iter().map(|e| e.distance_sq).sum::<i64>()
    );
    tree
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(index: u32, edge_tiles: &[(i32, i32)]) -> Region {
        let tiles: Vec<Tile> = edge_tiles.iter().map(|&(x, y)| Tile::new(x, y)).collect();
        Region {
            index,
            tiles: tiles.clone(),
            edge_tiles: tiles,
            is_entry: false,
        }
    }

    #[test]
    fn test_closest_pair() {
        let a = region(1, &[(0, 0), (2, 0)]);
        let b = region(2, &[(5, 0), (5, 3)]);
        assert_eq!(closest_edge_pair(&a, &b), Some((9, Tile::new(2, 0), Tile::new(5, 0))));
    }

    #[test]
    fn test_first_pair_wins_ties() {
        let a = region(1, &[(0, 0), (0, 2)]);
        let b = region(2, &[(3, 0), (3, 2)]);
        let (_, ta, tb) = closest_edge_pair(&a, &b).unwrap();
        assert_eq!((ta, tb), (Tile::new(0, 0), Tile::new(3, 0)));
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(build_mst(&[]).is_empty());
        assert!(build_mst(&[region(1, &[(0, 0)])]).is_empty());
    }

    #[test]
    fn test_spanning_tree_properties() {
        // Four rooms on a line plus one off to the side
        let regions = vec![
            region(1, &[(0, 0)]),
            region(2, &[(10, 0)]),
            region(3, &[(20, 0)]),
            region(4, &[(30, 0)]),
            region(5, &[(10, 7)]),
        ];
        let tree = build_mst(&regions);

        assert_eq!(tree.len(), regions.len() - 1);

        // Acyclic and connected: a union-find over the tree merges everything
        let mut sets = UnionFind::new(regions.len() + 1);
        for e in &tree {
            assert!(sets.union(e.region_a as usize, e.region_b as usize), "cycle at {:?}", e);
        }
        for r in 2..=5 {
            assert!(sets.connected(1, r));
        }

        // The side room hangs off its nearest neighbour
        assert!(tree
            .iter()
            .any(|e| (e.region_a, e.region_b) == (2, 5) && e.distance_sq == 49));
        // The long 1-3 link is never needed
        assert!(!tree.iter().any(|e| (e.region_a, e.region_b) == (1, 3)));
    }

    #[test]
    fn test_unlinkable_region_is_skipped() {
        let mut lonely = region(3, &[]);
        lonely.tiles.push(Tile::new(50, 50));
        let regions = vec![region(1, &[(0, 0)]), region(2, &[(4, 0)]), lonely];

        let tree = build_mst(&regions);
        assert_eq!(tree.len(), 1);
        assert_eq!((tree[0].region_a, tree[0].region_b), (1, 2));
    }
}
