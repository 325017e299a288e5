//! Cave grid simulation and connectivity
//!
//! - `grid`: double-buffered cell storage with the final border overlay
//! - `simulation`: random fill and cellular-automaton smoothing
//! - `regions`: flood-fill segmentation and size filtering
//! - `connectivity`: nearest-edge region graph reduced to a spanning tree
//! - `bridges`: corridor carving along the spanning tree

pub mod bridges;
pub mod cell;
pub mod connectivity;
pub mod grid;
pub mod regions;
pub mod simulation;
pub mod union_find;

pub use bridges::{carve_bridge, carve_bridges, line_tiles, stamp_disc};
pub use cell::{Cell, Tile, OPEN_CODE, OUTSIDE_CODE, WALL_CODE};
pub use connectivity::{all_pairs, build_mst, closest_edge_pair, BridgeNode};
pub use grid::GridBuffer;
pub use regions::{flood_fill, segment, Region, Segmentation};
pub use simulation::CaveSimulator;
pub use union_find::UnionFind;
