// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Owned in-memory model snapshot
//!
//! Parser adapters fill a [`MemoryModel`] from their own entity graph;
//! the test suites use it as a fixture. Lookups are linear scans, which
//! is adequate at building scale.

use crate::model::{
    AttributeKind, BuildingModel, EntityId, EntityKind, PlacementLink, TriangleMesh,
};
use crate::units::DeclaredUnit;

/// One entity of an in-memory model
#[derive(Debug, Clone, Default)]
pub struct MemoryEntity {
    pub id: u32,
    pub kind: Option<EntityKind>,
    pub name: Option<String>,
    pub long_name: Option<String>,
    pub object_type: Option<String>,
    pub tag: Option<String>,
    pub type_name: Option<String>,
    pub type_element_type: Option<String>,
    pub type_tag: Option<String>,
    pub placement: Option<Vec<PlacementLink>>,
    pub mesh: Option<TriangleMesh>,
}

impl MemoryEntity {
    /// New entity of the given kind
    pub fn new(id: u32, kind: EntityKind) -> Self {
        Self {
            id,
            kind: Some(kind),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_long_name(mut self, long_name: &str) -> Self {
        self.long_name = Some(long_name.to_string());
        self
    }

    pub fn with_object_type(mut self, object_type: &str) -> Self {
        self.object_type = Some(object_type.to_string());
        self
    }

    pub fn with_type_name(mut self, type_name: &str) -> Self {
        self.type_name = Some(type_name.to_string());
        self
    }

    pub fn with_placement(mut self, chain: Vec<PlacementLink>) -> Self {
        self.placement = Some(chain);
        self
    }

    pub fn with_mesh(mut self, mesh: TriangleMesh) -> Self {
        self.mesh = Some(mesh);
        self
    }

    fn attribute(&self, attr: AttributeKind) -> Option<&str> {
        match attr {
            AttributeKind::Name => self.name.as_deref(),
            AttributeKind::LongName => self.long_name.as_deref(),
            AttributeKind::ObjectType => self.object_type.as_deref(),
            AttributeKind::Tag => self.tag.as_deref(),
            AttributeKind::TypeName => self.type_name.as_deref(),
            AttributeKind::TypeElementType => self.type_element_type.as_deref(),
            AttributeKind::TypeTag => self.type_tag.as_deref(),
        }
    }
}

/// Owned model snapshot implementing [`BuildingModel`]
#[derive(Debug, Clone, Default)]
pub struct MemoryModel {
    entities: Vec<MemoryEntity>,
    units: Vec<DeclaredUnit>,
}

impl MemoryModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity, keeping insertion order as the model order
    pub fn push(&mut self, entity: MemoryEntity) -> EntityId {
        let id = EntityId(entity.id);
        self.entities.push(entity);
        id
    }

    /// Declare a unit
    pub fn push_unit(&mut self, unit: DeclaredUnit) {
        self.units.push(unit);
    }

    fn find(&self, id: EntityId) -> Option<&MemoryEntity> {
        self.entities.iter().find(|e| e.id == id.0)
    }
}

impl BuildingModel for MemoryModel {
    fn declared_units(&self) -> Vec<DeclaredUnit> {
        self.units.clone()
    }

    fn entities(&self, kind: EntityKind) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|e| e.kind == Some(kind))
            .map(|e| EntityId(e.id))
            .collect()
    }

    fn attribute(&self, id: EntityId, attr: AttributeKind) -> Option<String> {
        self.find(id)?.attribute(attr).map(str::to_string)
    }

    fn placement_chain(&self, id: EntityId) -> Option<Vec<PlacementLink>> {
        self.find(id)?.placement.clone()
    }

    fn world_mesh(&self, id: EntityId) -> Option<TriangleMesh> {
        self.find(id)?.mesh.clone()
    }
}
