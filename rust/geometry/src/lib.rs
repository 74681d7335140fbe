//! School-Check Geometry
//!
//! Placement transform composition and 2D footprint construction for
//! building models, using nalgebra for math and i_overlay for planar
//! boolean operations.

pub mod bool2d;
pub mod footprint;
pub mod transform;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};

pub use bool2d::{convex_hull, point_in_ring, point_on_ring, ring_area, signed_area, union_rings};
pub use footprint::{build_footprint, ElevationBand, Footprint, Shape2D};
pub use transform::{compose_chain, link_matrix, world_point};
