// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placement chain composition
//!
//! Each placement link carries a local origin plus optional axis and
//! reference directions. A link becomes one 4x4 affine matrix; the full
//! chain composes outermost-parent inward, so a point query is the
//! translation column of the composed matrix. Missing directional data
//! uses the identity axes and never fails.

use nalgebra::{Matrix4, Point3, Vector3};
use school_check_core::PlacementLink;

/// Transformation matrix of a single placement link
///
/// Rotation columns: Z = declared axis (default (0,0,1)), X = declared
/// reference direction (default (1,0,0)), Y = Z x X (right-handed).
/// Translation = declared origin.
pub fn link_matrix(link: &PlacementLink) -> Matrix4<f64> {
    let z_axis = link
        .axis
        .map(Vector3::from)
        .unwrap_or_else(|| Vector3::new(0.0, 0.0, 1.0));
    let x_axis = link
        .ref_direction
        .map(Vector3::from)
        .unwrap_or_else(|| Vector3::new(1.0, 0.0, 0.0));

    // Y axis is cross product of Z and X (right-hand rule: Y = Z x X)
    let y_axis = z_axis.cross(&x_axis);
    let [ox, oy, oz] = link.origin;

    // Column-major constructor takes row-major arguments
    Matrix4::new(
        x_axis.x, y_axis.x, z_axis.x, ox,
        x_axis.y, y_axis.y, z_axis.y, oy,
        x_axis.z, y_axis.z, z_axis.z, oz,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Compose a placement chain into one local-to-world matrix
///
/// The chain is ordered entity-outward; the outermost parent is applied
/// last. The same world point comes out regardless of how deeply the
/// chain is nested.
pub fn compose_chain(chain: &[PlacementLink]) -> Matrix4<f64> {
    let mut world = Matrix4::identity();
    for link in chain.iter().rev() {
        world *= link_matrix(link);
    }
    world
}

/// World-space position of the chain's local origin
pub fn world_point(chain: &[PlacementLink]) -> Point3<f64> {
    let m = compose_chain(chain);
    Point3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identity_chain_yields_innermost_origin() {
        let chain = vec![
            PlacementLink::at(2.5, -1.0, 0.75),
            PlacementLink::at(0.0, 0.0, 0.0),
            PlacementLink::at(0.0, 0.0, 0.0),
        ];
        let p = world_point(&chain);
        assert_relative_eq!(p.x, 2.5);
        assert_relative_eq!(p.y, -1.0);
        assert_relative_eq!(p.z, 0.75);
    }

    #[test]
    fn translations_accumulate_through_parents() {
        let chain = vec![
            PlacementLink::at(1.0, 0.0, 0.0),
            PlacementLink::at(0.0, 2.0, 0.0),
            PlacementLink::at(0.0, 0.0, 3.0),
        ];
        let p = world_point(&chain);
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 2.0);
        assert_relative_eq!(p.z, 3.0);
    }

    #[test]
    fn rotated_parent_rotates_child_origin() {
        // Parent rotated 90 degrees about Z: local X maps to world Y
        let parent = PlacementLink {
            origin: [10.0, 0.0, 0.0],
            axis: Some([0.0, 0.0, 1.0]),
            ref_direction: Some([0.0, 1.0, 0.0]),
        };
        let child = PlacementLink::at(1.0, 0.0, 0.0);
        let p = world_point(&[child, parent]);
        assert_relative_eq!(p.x, 10.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn chain_depth_does_not_change_the_point() {
        let flat = vec![PlacementLink::at(4.0, 5.0, 6.0)];
        let nested = vec![
            PlacementLink::at(4.0, 5.0, 6.0),
            PlacementLink::at(0.0, 0.0, 0.0),
            PlacementLink::at(0.0, 0.0, 0.0),
            PlacementLink::at(0.0, 0.0, 0.0),
        ];
        assert_relative_eq!(world_point(&flat), world_point(&nested));
    }

    #[test]
    fn empty_chain_is_the_origin() {
        let p = world_point(&[]);
        assert_relative_eq!(p, Point3::new(0.0, 0.0, 0.0));
    }
}
