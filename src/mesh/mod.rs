//! Contour meshing of the finished cave grid
//!
//! Marching squares over the bordered grid produces the floor cap, the set
//! of silhouette edges that is extruded into the wall skirt, and optionally
//! an interior surface over the open cells.

mod cases;
mod edges;
mod mesher;
mod squares;
mod transform;
mod types;
mod walls;

pub use cases::{fan, polygons, Saddle};
pub use edges::BoundaryEdges;
pub use mesher::{ContourMesher, Surface};
pub use squares::{NodeKey, Point, Square};
pub use transform::GridTransform;
pub use types::{Mesh, MeshKind, MeshSet};
pub use walls::extrude_walls;
