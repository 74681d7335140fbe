// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-room capacity checks
//!
//! The aggregate evaluator answers "is there enough of X overall";
//! capacity checks answer "does any single room hold too many". Rooms
//! are matched by exact canonical label and judged by the number of
//! assigned furnishings matching the configured chair label.

use crate::config::CapacityRule;
use crate::context::EvaluationContext;
use crate::error::Result;
use crate::evaluate::CheckStatus;
use crate::extract::RoomFootprint;
use school_check_core::{canonicalize, EntityId};
use serde::{Deserialize, Serialize};

/// Occupancy verdict for one room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomOccupancy {
    pub space_id: EntityId,
    pub room_name: String,
    /// Numeric room number when the space's raw name is purely numeric
    pub room_number: Option<u32>,
    /// Assigned furnishings matching the rule's chair label
    pub count: usize,
    pub limit: u32,
    pub status: CheckStatus,
}

/// Check every matching room against the capacity rule
///
/// Results come back in the context's stable room order (display name,
/// then entity id). No matching rooms yields an empty list, not an
/// error; when a fallback label is configured it is consulted only if
/// the primary label matches nothing.
pub fn check_room_capacity(
    ctx: &EvaluationContext,
    rule: &CapacityRule,
) -> Result<Vec<RoomOccupancy>> {
    rule.validate()?;

    let mut rooms = matching_rooms(&ctx.rooms, &rule.room_label);
    if rooms.is_empty() {
        if let Some(fallback) = &rule.fallback_room_label {
            rooms = matching_rooms(&ctx.rooms, fallback);
        }
    }

    let results = rooms
        .into_iter()
        .map(|room| {
            let count = room
                .furnishings
                .iter()
                .filter(|&&id| {
                    ctx.furnishing(id)
                        .is_some_and(|f| f.matches_label(&rule.furnishing_label))
                })
                .count();
            let status = if count <= rule.max_per_room as usize {
                CheckStatus::Ok
            } else {
                CheckStatus::NotOk
            };
            RoomOccupancy {
                space_id: room.id,
                room_name: room.display_name.clone(),
                room_number: room.room_number(),
                count,
                limit: rule.max_per_room,
                status,
            }
        })
        .collect();

    Ok(results)
}

fn matching_rooms<'a>(rooms: &'a [RoomFootprint], label: &str) -> Vec<&'a RoomFootprint> {
    let canonical = canonicalize(label);
    if canonical.is_empty() {
        return Vec::new();
    }
    rooms
        .iter()
        .filter(|room| room.matches_canonical(&canonical))
        .collect()
}
