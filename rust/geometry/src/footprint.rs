// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Footprint construction from triangulated meshes
//!
//! A room's world-space mesh is projected onto the horizontal plane,
//! degenerate triangles are dropped, and the remainder is merged into a
//! single footprint polygon. When the planar union comes back empty the
//! builder falls back to the convex hull of the surviving triangle
//! vertices, trading boundary precision for robustness. The elevation
//! band spans all mesh vertices, not just the surviving triangles.

use crate::bool2d::{
    convex_hull, point_in_ring, point_on_ring, ring_area, union_rings, BOUNDARY_EPSILON,
    MIN_AREA_THRESHOLD,
};
use nalgebra::Point2;
use school_check_core::TriangleMesh;

/// Vertical extent of a room's geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationBand {
    /// Lowest vertex elevation
    pub min: f64,
    /// Highest vertex elevation
    pub max: f64,
}

impl ElevationBand {
    /// Reference elevation used for vertical assignment tolerance
    #[inline]
    pub fn reference(&self) -> f64 {
        self.min
    }
}

/// One merged region of a footprint: an outer ring plus holes
#[derive(Debug, Clone, PartialEq)]
pub struct Shape2D {
    pub outer: Vec<Point2<f64>>,
    pub holes: Vec<Vec<Point2<f64>>>,
}

impl Shape2D {
    fn area(&self) -> f64 {
        let holes: f64 = self.holes.iter().map(|h| ring_area(h)).sum();
        (ring_area(&self.outer) - holes).max(0.0)
    }

    fn contains(&self, point: &Point2<f64>) -> bool {
        if point_on_ring(point, &self.outer, BOUNDARY_EPSILON) {
            return true;
        }
        if !point_in_ring(point, &self.outer) {
            return false;
        }
        for hole in &self.holes {
            // A point on a hole's boundary is still on the room boundary
            if point_on_ring(point, hole, BOUNDARY_EPSILON) {
                return true;
            }
            if point_in_ring(point, hole) {
                return false;
            }
        }
        true
    }
}

/// Merged 2D footprint polygon of one room
///
/// May consist of several disjoint shapes when the source geometry is
/// disconnected. Area is always >= 0 and derived solely from the
/// room's own triangles.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Footprint {
    pub shapes: Vec<Shape2D>,
}

impl Footprint {
    /// Total footprint area in squared source units
    pub fn area(&self) -> f64 {
        self.shapes.iter().map(Shape2D::area).sum()
    }

    /// Boundary-inclusive containment test
    ///
    /// Points exactly on a wall line still count as inside, so
    /// furnishings placed on a boundary are assignable.
    pub fn contains(&self, point: &Point2<f64>) -> bool {
        self.shapes.iter().any(|s| s.contains(point))
    }

    /// True when no shape carries usable area
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// Build the footprint and elevation band of a triangulated mesh
///
/// Returns `None` when the mesh carries no projectable area at all; a
/// degenerate planar union falls back to the convex hull of the
/// surviving triangle vertices instead of failing.
pub fn build_footprint(mesh: &TriangleMesh) -> Option<(Footprint, ElevationBand)> {
    if mesh.is_empty() {
        return None;
    }

    // Elevation reflects true geometric extent even if projection
    // drops footprint area, so scan every vertex
    let mut z_min = f64::MAX;
    let mut z_max = f64::MIN;
    for chunk in mesh.positions.chunks_exact(3) {
        if chunk[2].is_finite() {
            z_min = z_min.min(chunk[2]);
            z_max = z_max.max(chunk[2]);
        }
    }
    if z_min > z_max {
        return None;
    }

    let triangles = project_triangles(mesh);
    if triangles.is_empty() {
        return None;
    }

    let shapes = union_rings(&triangles);
    let footprint = if shapes.is_empty() {
        hull_fallback(&triangles)?
    } else {
        let shapes = shapes
            .into_iter()
            .filter(|contours| !contours.is_empty())
            .map(|mut contours| {
                let outer = contours.remove(0);
                let holes = contours
                    .into_iter()
                    .filter(|h| ring_area(h) > MIN_AREA_THRESHOLD)
                    .collect();
                Shape2D { outer, holes }
            })
            .collect::<Vec<_>>();
        if shapes.is_empty() {
            hull_fallback(&triangles)?
        } else {
            Footprint { shapes }
        }
    };

    Some((
        footprint,
        ElevationBand {
            min: z_min,
            max: z_max,
        },
    ))
}

/// Project mesh triangles to (x, y), dropping degenerate ones
fn project_triangles(mesh: &TriangleMesh) -> Vec<Vec<Point2<f64>>> {
    let mut triangles = Vec::with_capacity(mesh.triangle_count());
    for tri in mesh.indices.chunks_exact(3) {
        let (Some(a), Some(b), Some(c)) = (
            mesh.vertex(tri[0] as usize),
            mesh.vertex(tri[1] as usize),
            mesh.vertex(tri[2] as usize),
        ) else {
            continue;
        };
        let ring = vec![
            Point2::new(a[0], a[1]),
            Point2::new(b[0], b[1]),
            Point2::new(c[0], c[1]),
        ];
        if ring.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            continue;
        }
        if ring_area(&ring) > MIN_AREA_THRESHOLD {
            triangles.push(ring);
        }
    }
    triangles
}

/// Convex hull of the surviving triangle vertices
fn hull_fallback(triangles: &[Vec<Point2<f64>>]) -> Option<Footprint> {
    let points: Vec<Point2<f64>> = triangles.iter().flatten().cloned().collect();
    let hull = convex_hull(&points);
    if hull.len() < 3 || ring_area(&hull) <= MIN_AREA_THRESHOLD {
        return None;
    }
    Some(Footprint {
        shapes: vec![Shape2D {
            outer: hull,
            holes: Vec::new(),
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Unit square floor slab at the given elevation, two triangles
    fn unit_square_mesh(elevation: f64) -> TriangleMesh {
        TriangleMesh::new(
            vec![
                0.0, 0.0, elevation,
                1.0, 0.0, elevation,
                1.0, 1.0, elevation,
                0.0, 1.0, elevation,
            ],
            vec![0, 1, 2, 0, 2, 3],
        )
    }

    #[test]
    fn unit_square_has_area_one() {
        let (footprint, band) = build_footprint(&unit_square_mesh(0.0)).unwrap();
        assert_relative_eq!(footprint.area(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(band.reference(), 0.0);
    }

    #[test]
    fn elevation_band_spans_all_vertices() {
        // Floor at z=0 plus a ceiling at z=3 that projects onto the
        // same square
        let mut mesh = unit_square_mesh(0.0);
        let ceiling = unit_square_mesh(3.0);
        let offset = mesh.vertex_count() as u32;
        mesh.positions.extend_from_slice(&ceiling.positions);
        mesh.indices.extend(ceiling.indices.iter().map(|i| i + offset));

        let (footprint, band) = build_footprint(&mesh).unwrap();
        assert_relative_eq!(footprint.area(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(band.min, 0.0);
        assert_relative_eq!(band.max, 3.0);
    }

    #[test]
    fn containment_is_boundary_inclusive() {
        let (footprint, _) = build_footprint(&unit_square_mesh(0.0)).unwrap();
        assert!(footprint.contains(&Point2::new(0.5, 0.5)));
        assert!(footprint.contains(&Point2::new(1.0, 0.5)));
        assert!(!footprint.contains(&Point2::new(1.5, 0.5)));
    }

    #[test]
    fn vertical_walls_contribute_no_area() {
        // A wall quad standing in the XZ plane projects to a line
        let mesh = TriangleMesh::new(
            vec![
                0.0, 0.0, 0.0,
                1.0, 0.0, 0.0,
                1.0, 0.0, 2.0,
                0.0, 0.0, 2.0,
            ],
            vec![0, 1, 2, 0, 2, 3],
        );
        assert!(build_footprint(&mesh).is_none());
    }

    #[test]
    fn empty_mesh_has_no_footprint() {
        assert!(build_footprint(&TriangleMesh::default()).is_none());
    }

    #[test]
    fn hull_fallback_produces_a_footprint() {
        let triangles = vec![vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(0.0, 2.0),
        ]];
        let footprint = hull_fallback(&triangles).unwrap();
        assert_relative_eq!(footprint.area(), 2.0, epsilon = 1e-6);
    }

    #[test]
    fn disjoint_slabs_merge_into_two_shapes() {
        let mut mesh = unit_square_mesh(0.0);
        let far = TriangleMesh::new(
            vec![
                5.0, 5.0, 0.0,
                6.0, 5.0, 0.0,
                6.0, 6.0, 0.0,
                5.0, 6.0, 0.0,
            ],
            vec![0, 1, 2, 0, 2, 3],
        );
        let offset = mesh.vertex_count() as u32;
        mesh.positions.extend_from_slice(&far.positions);
        mesh.indices.extend(far.indices.iter().map(|i| i + offset));

        let (footprint, _) = build_footprint(&mesh).unwrap();
        assert_eq!(footprint.shapes.len(), 2);
        assert_relative_eq!(footprint.area(), 2.0, epsilon = 1e-6);
        assert!(footprint.contains(&Point2::new(5.5, 5.5)));
    }
}
