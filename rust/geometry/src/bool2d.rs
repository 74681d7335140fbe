// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D polygon operations
//!
//! Ring primitives (signed area, winding, containment) plus the planar
//! union used to merge projected room triangles, built on the i_overlay
//! crate, and a Graham-scan convex hull used as the union's robustness
//! fallback.

use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;
use nalgebra::Point2;

/// Epsilon for boundary-inclusive containment tests
pub const BOUNDARY_EPSILON: f64 = 1e-9;

/// Minimum area threshold - rings smaller than this are degenerate
pub const MIN_AREA_THRESHOLD: f64 = 1e-12;

/// Signed area of a 2D ring
/// Positive = counter-clockwise, Negative = clockwise
pub fn signed_area(ring: &[Point2<f64>]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    let n = ring.len();
    for i in 0..n {
        let j = (i + 1) % n;
        area += ring[i].x * ring[j].y;
        area -= ring[j].x * ring[i].y;
    }
    area * 0.5
}

/// Absolute area of a 2D ring
#[inline]
pub fn ring_area(ring: &[Point2<f64>]) -> f64 {
    signed_area(ring).abs()
}

/// Ensure counter-clockwise winding (positive signed area)
pub fn ensure_ccw(ring: &[Point2<f64>]) -> Vec<Point2<f64>> {
    if signed_area(ring) < 0.0 {
        ring.iter().rev().cloned().collect()
    } else {
        ring.to_vec()
    }
}

/// Strict interior test using ray casting
pub fn point_in_ring(point: &Point2<f64>, ring: &[Point2<f64>]) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let n = ring.len();
    let mut j = n - 1;
    for i in 0..n {
        let pi = &ring[i];
        let pj = &ring[j];
        if ((pi.y > point.y) != (pj.y > point.y))
            && (point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Squared distance from a point to a segment
fn point_segment_distance_sq(p: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    let ab = b - a;
    let ap = p - a;
    let len_sq = ab.norm_squared();
    let t = if len_sq > 0.0 {
        (ap.dot(&ab) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let closest = a + ab * t;
    (p - closest).norm_squared()
}

/// True when the point lies on the ring's boundary within `epsilon`
pub fn point_on_ring(point: &Point2<f64>, ring: &[Point2<f64>], epsilon: f64) -> bool {
    if ring.len() < 2 {
        return false;
    }
    let eps_sq = epsilon * epsilon;
    let n = ring.len();
    for i in 0..n {
        let j = (i + 1) % n;
        if point_segment_distance_sq(point, &ring[i], &ring[j]) <= eps_sq {
            return true;
        }
    }
    false
}

/// Planar union of a set of rings
///
/// All rings are normalized to counter-clockwise winding and resolved
/// with a non-zero fill rule, so overlapping coverage (e.g. floor and
/// ceiling triangles projecting onto the same region) merges instead of
/// cancelling. Returns shapes as contour lists: the first contour of a
/// shape is its outer boundary, the rest are holes. An empty result
/// signals a degenerate input set.
pub fn union_rings(rings: &[Vec<Point2<f64>>]) -> Vec<Vec<Vec<Point2<f64>>>> {
    let subject: Vec<Vec<[f64; 2]>> = rings
        .iter()
        .filter(|r| r.len() >= 3)
        .map(|r| ensure_ccw(r).iter().map(|p| [p.x, p.y]).collect())
        .collect();
    if subject.is_empty() {
        return Vec::new();
    }

    let clip: Vec<Vec<[f64; 2]>> = Vec::new();
    let merged = subject.overlay(&clip, OverlayRule::Subject, FillRule::NonZero);

    merged
        .into_iter()
        .map(|shape| {
            shape
                .into_iter()
                .map(|contour| {
                    contour
                        .into_iter()
                        .map(|p| Point2::new(p[0], p[1]))
                        .collect()
                })
                .collect()
        })
        .collect()
}

/// Convex hull of 2D points using a Graham scan
///
/// Returns the hull counter-clockwise. Never fails: fewer than three
/// input points (or a fully collinear set) simply yield a degenerate
/// hull, which callers detect by length.
pub fn convex_hull(points: &[Point2<f64>]) -> Vec<Point2<f64>> {
    if points.len() < 3 {
        return points.to_vec();
    }

    // Bottom-most point (lowest Y, then leftmost X) anchors the scan
    let mut start_idx = 0;
    for (i, p) in points.iter().enumerate() {
        if p.y < points[start_idx].y || (p.y == points[start_idx].y && p.x < points[start_idx].x) {
            start_idx = i;
        }
    }
    let start = points[start_idx];

    let mut sorted: Vec<Point2<f64>> = points.iter().filter(|p| **p != start).cloned().collect();
    sorted.sort_by(|a, b| {
        let angle_a = (a.y - start.y).atan2(a.x - start.x);
        let angle_b = (b.y - start.y).atan2(b.x - start.x);
        angle_a.total_cmp(&angle_b)
    });

    let mut hull = vec![start];
    for p in sorted {
        while hull.len() > 1 {
            let top = hull[hull.len() - 1];
            let second = hull[hull.len() - 2];
            let cross =
                (top.x - second.x) * (p.y - second.y) - (top.y - second.y) * (p.x - second.x);
            if cross <= 0.0 {
                hull.pop();
            } else {
                break;
            }
        }
        hull.push(p);
    }

    hull
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<Point2<f64>> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn test_signed_area_ccw() {
        assert!((signed_area(&unit_square()) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_signed_area_cw() {
        let cw: Vec<_> = unit_square().into_iter().rev().collect();
        assert!((signed_area(&cw) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ensure_ccw() {
        let cw: Vec<_> = unit_square().into_iter().rev().collect();
        assert!(signed_area(&ensure_ccw(&cw)) > 0.0);
    }

    #[test]
    fn test_point_in_ring() {
        let square = unit_square();
        assert!(point_in_ring(&Point2::new(0.5, 0.5), &square));
        assert!(!point_in_ring(&Point2::new(1.5, 0.5), &square));
        assert!(!point_in_ring(&Point2::new(-0.1, 0.5), &square));
    }

    #[test]
    fn test_point_on_ring() {
        let square = unit_square();
        assert!(point_on_ring(&Point2::new(1.0, 0.5), &square, BOUNDARY_EPSILON));
        assert!(point_on_ring(&Point2::new(0.0, 0.0), &square, BOUNDARY_EPSILON));
        assert!(!point_on_ring(&Point2::new(0.5, 0.5), &square, BOUNDARY_EPSILON));
    }

    #[test]
    fn test_union_adjoining_triangles() {
        // Two triangles tiling the unit square
        let rings = vec![
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(1.0, 1.0),
            ],
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(0.0, 1.0),
            ],
        ];
        let shapes = union_rings(&rings);
        assert_eq!(shapes.len(), 1);
        let total: f64 = shapes[0].iter().map(|c| ring_area(c)).sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_union_overlapping_coverage_does_not_cancel() {
        // The same triangle twice, as floor and ceiling projections
        let tri = vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(0.0, 2.0),
        ];
        let shapes = union_rings(&[tri.clone(), tri]);
        assert_eq!(shapes.len(), 1);
        let area = ring_area(&shapes[0][0]);
        assert!((area - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_union_of_degenerate_input_is_empty() {
        let sliver = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
        ];
        assert!(union_rings(&[sliver]).is_empty());
        assert!(union_rings(&[]).is_empty());
    }

    #[test]
    fn test_convex_hull_square_with_interior_points() {
        let mut points = unit_square();
        points.push(Point2::new(0.5, 0.5));
        points.push(Point2::new(0.2, 0.7));
        let hull = convex_hull(&points);
        assert_eq!(hull.len(), 4);
        assert!((signed_area(&hull) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_convex_hull_collinear_degenerates() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        ];
        let hull = convex_hull(&points);
        assert!(hull.len() < 3 || ring_area(&hull) < MIN_AREA_THRESHOLD);
    }
}
