// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # School-Check Core
//!
//! Model abstraction and shared primitives for building-code checks.
//!
//! This crate defines the read-only [`BuildingModel`] boundary that an
//! external parser implements, plus the two pieces of shared machinery
//! every check needs:
//!
//! - **Unit scaling**: length/area scale factors derived from the
//!   model's declared units ([`units`])
//! - **Label canonicalization**: numbering-robust grouping keys for
//!   free-text room and furnishing names ([`labels`])
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use school_check_core::{BuildingModel, EntityKind, UnitScale, canonicalize};
//!
//! let model = adapter.load(path)?;
//! let scale = UnitScale::from_units(&model.declared_units());
//! for id in model.entities(EntityKind::Space) {
//!     // read attributes, placement chains and meshes through the trait
//! }
//! assert_eq!(canonicalize("Classroom 12"), "classroom");
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: enable serialization support for ids and unit types

pub mod labels;
pub mod memory;
pub mod model;
pub mod units;

pub use labels::{canonicalize, display_label, parse_room_number};
pub use memory::{MemoryEntity, MemoryModel};
pub use model::{
    first_attribute, AttributeKind, BuildingModel, EntityId, EntityKind, PlacementLink,
    TriangleMesh, FURNISHING_LABEL_ATTRS, SPACE_LABEL_ATTRS,
};
pub use units::{length_scale, si_prefix_multiplier, DeclaredUnit, UnitDef, UnitKind, UnitScale};
