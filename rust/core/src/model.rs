// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read-only model abstraction
//!
//! The check pipeline never parses building files itself. An external
//! parser implements [`BuildingModel`] and the pipeline reads entities,
//! attributes, placement chains and triangulated meshes through it.

use crate::units::DeclaredUnit;

/// Stable identifier of an entity in the parsed model
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind tag of a model entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    /// A room/area boundary (IfcSpace and friends)
    Space,
    /// A movable or fixed furniture item
    Furnishing,
    /// The project root entity
    Project,
    /// A unit declaration
    Unit,
}

/// Typed attribute accessors on loosely-typed entities
///
/// Fallback chains ("LongName else Name else synthesized id") are
/// expressed as ordered slices of these accessors, never as
/// reflection-style field probing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Name,
    LongName,
    ObjectType,
    Tag,
    /// Name of the defining type, when the instance is typed
    TypeName,
    /// ElementType of the defining type
    TypeElementType,
    /// Tag of the defining type
    TypeTag,
}

/// Attribute fallback order for space display labels
pub const SPACE_LABEL_ATTRS: &[AttributeKind] = &[AttributeKind::LongName, AttributeKind::Name];

/// Attribute fallback order for furnishing aggregation labels
pub const FURNISHING_LABEL_ATTRS: &[AttributeKind] = &[
    AttributeKind::Name,
    AttributeKind::ObjectType,
    AttributeKind::TypeName,
    AttributeKind::TypeElementType,
    AttributeKind::Tag,
];

/// One link of a placement chain, ordered entity-outward
///
/// Missing directional data falls back to the identity axes:
/// Z = (0, 0, 1), X = (1, 0, 0).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacementLink {
    /// Local origin relative to the parent link
    pub origin: [f64; 3],
    /// Local Z axis direction, if declared
    pub axis: Option<[f64; 3]>,
    /// Local X axis direction, if declared
    pub ref_direction: Option<[f64; 3]>,
}

impl PlacementLink {
    /// Translation-only link
    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self {
            origin: [x, y, z],
            axis: None,
            ref_direction: None,
        }
    }
}

/// Triangulated surface mesh in world coordinates, model length units
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions as x, y, z triplets
    pub positions: Vec<f64>,
    /// Triangle vertex indices as i0, i1, i2 triplets
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Create a mesh from raw position and index buffers
    pub fn new(positions: Vec<f64>, indices: Vec<u32>) -> Self {
        Self { positions, indices }
    }

    /// Number of vertices
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of triangles
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// True when the mesh carries no usable geometry
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.indices.is_empty()
    }

    /// Vertex position by index, or `None` when out of range
    #[inline]
    pub fn vertex(&self, index: usize) -> Option<[f64; 3]> {
        let base = index.checked_mul(3)?;
        if base + 2 < self.positions.len() {
            Some([
                self.positions[base],
                self.positions[base + 1],
                self.positions[base + 2],
            ])
        } else {
            None
        }
    }

    /// Copy of the mesh with all coordinates multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            positions: self.positions.iter().map(|c| c * factor).collect(),
            indices: self.indices.clone(),
        }
    }
}

/// Read-only access to a parsed building model
///
/// Implementations are owned by the external parser. The pipeline only
/// reads through this trait and never mutates the underlying graph, so
/// concurrent evaluation runs over distinct models are safe.
pub trait BuildingModel: Send + Sync {
    /// Unit declarations of the project, in declaration order
    fn declared_units(&self) -> Vec<DeclaredUnit>;

    /// Entity ids of the given kind, in stable model order
    fn entities(&self, kind: EntityKind) -> Vec<EntityId>;

    /// A single attribute value, `None` when absent or not a string
    fn attribute(&self, id: EntityId, attr: AttributeKind) -> Option<String>;

    /// Placement chain from the entity outward to the placement root,
    /// or `None` when the entity has no resolvable placement
    fn placement_chain(&self, id: EntityId) -> Option<Vec<PlacementLink>>;

    /// Triangulated world-coordinate mesh for the entity, or `None`
    /// when the geometry generator cannot produce one
    fn world_mesh(&self, id: EntityId) -> Option<TriangleMesh>;
}

/// First non-empty attribute from an ordered fallback chain
///
/// Values are trimmed; whitespace-only values are skipped.
pub fn first_attribute(
    model: &dyn BuildingModel,
    id: EntityId,
    order: &[AttributeKind],
) -> Option<String> {
    order.iter().find_map(|attr| {
        model
            .attribute(id, *attr)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_counts_and_vertices() {
        let mesh = TriangleMesh::new(vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], vec![0, 1, 2]);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.vertex(1), Some([1.0, 0.0, 0.0]));
        assert_eq!(mesh.vertex(3), None);
        assert!(!mesh.is_empty());
    }

    #[test]
    fn mesh_scaling() {
        let mesh = TriangleMesh::new(vec![1000.0, 2000.0, 0.0], vec![]);
        let scaled = mesh.scaled(0.001);
        assert_eq!(scaled.positions, vec![1.0, 2.0, 0.0]);
    }
}
