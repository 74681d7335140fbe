// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spatial assignment of furnishings to rooms
//!
//! First-match-wins: furnishings are processed in extraction order and
//! rooms are scanned in the caller-provided order, so the same inputs
//! always produce the same assignment. A furnishing lands in at most
//! one room; footprint overlaps resolve to whichever qualifying room
//! comes first in the scan order.

use crate::extract::{FurnishingPoint, RoomFootprint};
use school_check_geometry::Point2;

/// Default vertical tolerance between a furnishing and a room's
/// reference elevation, in meters
pub const DEFAULT_Z_TOLERANCE_M: f64 = 1.0;

/// Assign each furnishing to the first qualifying room
///
/// A room qualifies when the furnishing's elevation is within
/// `z_tolerance_m` of the room's reference elevation and its 2D point
/// lies inside or on the boundary of the room's footprint. Previous
/// assignments on the rooms are cleared first.
pub fn assign_furnishings(
    rooms: &mut [RoomFootprint],
    furnishings: &[FurnishingPoint],
    z_tolerance_m: f64,
) {
    for room in rooms.iter_mut() {
        room.furnishings.clear();
    }

    let mut assigned = 0usize;
    for furnishing in furnishings {
        let point = Point2::new(furnishing.position.x, furnishing.position.y);
        for room in rooms.iter_mut() {
            if (furnishing.position.z - room.elevation.reference()).abs() > z_tolerance_m {
                continue;
            }
            if room.footprint.contains(&point) {
                room.furnishings.push(furnishing.id);
                assigned += 1;
                break;
            }
        }
    }

    tracing::debug!(
        assigned,
        total = furnishings.len(),
        "furnishing assignment complete"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use school_check_core::{EntityId, TriangleMesh};
    use school_check_geometry::footprint::build_footprint;
    use school_check_geometry::Point3;

    fn square_room(id: u32, name: &str, elevation: f64) -> RoomFootprint {
        let mesh = TriangleMesh::new(
            vec![
                0.0, 0.0, elevation,
                1.0, 0.0, elevation,
                1.0, 1.0, elevation,
                0.0, 1.0, elevation,
            ],
            vec![0, 1, 2, 0, 2, 3],
        );
        let (footprint, band) = build_footprint(&mesh).unwrap();
        RoomFootprint {
            id: EntityId(id),
            name: None,
            display_name: name.to_string(),
            area_m2: footprint.area(),
            footprint,
            elevation: band,
            furnishings: Vec::new(),
        }
    }

    fn chair(id: u32, x: f64, y: f64, z: f64) -> FurnishingPoint {
        FurnishingPoint {
            id: EntityId(id),
            name: Some("student chair".to_string()),
            object_type: None,
            type_name: None,
            position: Point3::new(x, y, z),
        }
    }

    #[test]
    fn inside_point_assigns_outside_point_does_not() {
        let mut rooms = vec![square_room(1, "Classroom", 0.0)];
        let furnishings = vec![chair(10, 0.5, 0.5, 0.4), chair(11, 1.5, 0.5, 0.4)];
        assign_furnishings(&mut rooms, &furnishings, DEFAULT_Z_TOLERANCE_M);
        assert_eq!(rooms[0].furnishings, vec![EntityId(10)]);
    }

    #[test]
    fn boundary_point_still_counts() {
        let mut rooms = vec![square_room(1, "Classroom", 0.0)];
        let furnishings = vec![chair(10, 1.0, 0.5, 0.0)];
        assign_furnishings(&mut rooms, &furnishings, DEFAULT_Z_TOLERANCE_M);
        assert_eq!(rooms[0].furnishings.len(), 1);
    }

    #[test]
    fn vertical_tolerance_picks_the_right_floor() {
        // Identical footprints stacked on two storeys; only the upper
        // one is within tolerance of the chair
        let mut rooms = vec![square_room(1, "A", 0.0), square_room(2, "B", 3.0)];
        let furnishings = vec![chair(10, 0.5, 0.5, 3.2)];
        assign_furnishings(&mut rooms, &furnishings, DEFAULT_Z_TOLERANCE_M);
        assert!(rooms[0].furnishings.is_empty());
        assert_eq!(rooms[1].furnishings, vec![EntityId(10)]);

        // Scan order must not matter when only one room is in tolerance
        let mut reversed = vec![square_room(2, "B", 3.0), square_room(1, "A", 0.0)];
        assign_furnishings(&mut reversed, &furnishings, DEFAULT_Z_TOLERANCE_M);
        assert_eq!(reversed[0].furnishings, vec![EntityId(10)]);
        assert!(reversed[1].furnishings.is_empty());
    }

    #[test]
    fn a_furnishing_lands_in_at_most_one_room() {
        // Overlapping rooms on the same storey: first in scan order wins
        let mut rooms = vec![square_room(1, "A", 0.0), square_room(2, "B", 0.0)];
        let furnishings = vec![chair(10, 0.5, 0.5, 0.0)];
        assign_furnishings(&mut rooms, &furnishings, DEFAULT_Z_TOLERANCE_M);
        assert_eq!(rooms[0].furnishings, vec![EntityId(10)]);
        assert!(rooms[1].furnishings.is_empty());
    }

    #[test]
    fn reassignment_clears_previous_lists() {
        let mut rooms = vec![square_room(1, "A", 0.0)];
        let furnishings = vec![chair(10, 0.5, 0.5, 0.0)];
        assign_furnishings(&mut rooms, &furnishings, DEFAULT_Z_TOLERANCE_M);
        assign_furnishings(&mut rooms, &furnishings, DEFAULT_Z_TOLERANCE_M);
        assert_eq!(rooms[0].furnishings.len(), 1);
    }
}
