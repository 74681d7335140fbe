// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # School-Check Rules
//!
//! Extraction pipeline and building-code rule evaluation over parsed
//! building models.
//!
//! One evaluation run is a pure function of (model snapshot, rule
//! configuration, tolerances): the model is read through the
//! [`BuildingModel`] trait and never mutated, all intermediate state
//! lives in a run-scoped [`EvaluationContext`], and running twice on
//! the same snapshot produces identical results.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use school_check_rules::{evaluate_model, RuleSet, SchoolType};
//!
//! let set = RuleSet::school_standard(SchoolType::EbtedaeiDore1);
//! for result in evaluate_model(&model, &set)? {
//!     println!("{}: {:?} (required {:.2}, available {:.2})",
//!         result.rule_id, result.status, result.required, result.available);
//! }
//! ```
//!
//! Lower-level entry points ([`build_footprints`],
//! [`extract_furnishings`], [`EvaluationContext::build`]) expose the
//! pipeline stages individually for callers needing finer control.

pub mod aggregate;
pub mod assign;
pub mod capacity;
pub mod config;
pub mod context;
pub mod error;
pub mod evaluate;
pub mod extract;

pub use aggregate::{
    contains_match_count, exact_match_count, furnishing_label_groups, group_labels,
    space_label_groups, total_area_by_label, unique_room_labels, CanonicalGroup, LabelFilter,
};
pub use assign::{assign_furnishings, DEFAULT_Z_TOLERANCE_M};
pub use capacity::{check_room_capacity, RoomOccupancy};
pub use config::{
    coefficients, meeting_room_seats, CapacityRule, CheckRule, CoefficientTable, ComparisonPolicy,
    QuantitySource, Requirement, RuleSet, SchoolType, DEFAULT_MAX_CAPACITY, STANDARD_STUDENT_CHAIR,
};
pub use context::{evaluate_model, EvaluationContext, ExtractOptions};
pub use error::{Error, Result};
pub use evaluate::{evaluate_rule, CheckResult, CheckStatus};
pub use extract::{build_footprints, extract_furnishings, FurnishingPoint, RoomFootprint};

// Re-export the canonicalizer: rule labels and model labels must agree
// on one normalization
pub use school_check_core::{canonicalize, display_label, BuildingModel};
