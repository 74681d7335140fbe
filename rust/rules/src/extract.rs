// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room and furnishing extraction
//!
//! Walks the model once per evaluation run and converts it into owned,
//! meter-normalized pipeline records: a [`RoomFootprint`] per space with
//! usable geometry and a [`FurnishingPoint`] per furnishing with a
//! resolvable placement. Spaces without meshes and furnishings without
//! placements are skipped, never errors.

use rayon::prelude::*;
use school_check_core::{
    canonicalize, first_attribute, parse_room_number, AttributeKind, BuildingModel, EntityId,
    EntityKind, UnitScale, SPACE_LABEL_ATTRS,
};
use school_check_geometry::footprint::{build_footprint, ElevationBand, Footprint};
use school_check_geometry::transform::world_point;
use school_check_geometry::Point3;

/// One room detected in the model, with merged footprint and elevation
///
/// Coordinates and areas are in meters. The `furnishings` list is
/// filled by the spatial assigner, in assignment order, and lives only
/// for the duration of one evaluation run.
#[derive(Debug, Clone)]
pub struct RoomFootprint {
    pub id: EntityId,
    /// Raw `Name` attribute, kept for room-number extraction
    pub name: Option<String>,
    /// LongName, else Name, else a synthesized `Space_<id>`
    pub display_name: String,
    pub footprint: Footprint,
    pub elevation: ElevationBand,
    /// Footprint area in square meters
    pub area_m2: f64,
    /// Furnishings assigned to this room, insertion order
    pub furnishings: Vec<EntityId>,
}

impl RoomFootprint {
    /// Room number when the raw name is purely numeric
    pub fn room_number(&self) -> Option<u32> {
        self.name.as_deref().and_then(parse_room_number)
    }

    /// True when the room's display name or raw name canonicalizes to
    /// the given canonical label
    pub fn matches_canonical(&self, canonical_label: &str) -> bool {
        canonicalize(&self.display_name) == canonical_label
            || self
                .name
                .as_deref()
                .is_some_and(|n| canonicalize(n) == canonical_label)
    }
}

/// One furnishing with a resolved world position, in meters
#[derive(Debug, Clone)]
pub struct FurnishingPoint {
    pub id: EntityId,
    pub name: Option<String>,
    pub object_type: Option<String>,
    /// Name of the defining type, when the instance is typed
    pub type_name: Option<String>,
    pub position: Point3<f64>,
}

impl FurnishingPoint {
    /// Case-insensitive "contains" match over name, object type and
    /// defining-type name
    pub fn matches_label(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return false;
        }
        [&self.name, &self.object_type, &self.type_name]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&q))
    }
}

/// Build footprints for every space with usable geometry
///
/// Rooms are built in parallel (each space is independent) and the
/// result is sorted by (display name, entity id) so the assigner scans
/// them in a stable order.
pub fn build_footprints(model: &dyn BuildingModel) -> Vec<RoomFootprint> {
    let scale = UnitScale::from_units(&model.declared_units());
    let spaces = model.entities(EntityKind::Space);

    let mut rooms: Vec<RoomFootprint> = spaces
        .par_iter()
        .filter_map(|&id| {
            let Some(mesh) = model.world_mesh(id) else {
                tracing::debug!(space = %id, "space has no mesh, skipping footprint");
                return None;
            };
            let mesh = if scale.length != 1.0 {
                mesh.scaled(scale.length)
            } else {
                mesh
            };
            let Some((footprint, elevation)) = build_footprint(&mesh) else {
                tracing::debug!(space = %id, "space mesh projects to no area, skipping footprint");
                return None;
            };
            let name = model
                .attribute(id, AttributeKind::Name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty());
            let display_name = first_attribute(model, id, SPACE_LABEL_ATTRS)
                .unwrap_or_else(|| format!("Space_{}", id.0));
            Some(RoomFootprint {
                id,
                name,
                display_name,
                area_m2: footprint.area(),
                footprint,
                elevation,
                furnishings: Vec::new(),
            })
        })
        .collect();

    rooms.sort_by(|a, b| {
        a.display_name
            .cmp(&b.display_name)
            .then(a.id.cmp(&b.id))
    });
    rooms
}

/// Extract world points for every furnishing with a resolvable placement
///
/// Model order is preserved so assignment is deterministic.
pub fn extract_furnishings(model: &dyn BuildingModel) -> Vec<FurnishingPoint> {
    let scale = UnitScale::from_units(&model.declared_units());

    model
        .entities(EntityKind::Furnishing)
        .into_iter()
        .filter_map(|id| {
            let Some(chain) = model.placement_chain(id) else {
                tracing::debug!(furnishing = %id, "furnishing has no placement, skipping");
                return None;
            };
            let p = world_point(&chain);
            if !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()) {
                tracing::debug!(furnishing = %id, "furnishing placement is not finite, skipping");
                return None;
            }
            Some(FurnishingPoint {
                id,
                name: model.attribute(id, AttributeKind::Name),
                object_type: model.attribute(id, AttributeKind::ObjectType),
                type_name: first_attribute(
                    model,
                    id,
                    &[AttributeKind::TypeName, AttributeKind::TypeElementType],
                ),
                position: Point3::new(
                    p.x * scale.length,
                    p.y * scale.length,
                    p.z * scale.length,
                ),
            })
        })
        .collect()
}
