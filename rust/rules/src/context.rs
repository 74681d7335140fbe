// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Run-scoped evaluation context
//!
//! One context is built per evaluation run and passed by reference to
//! every check. It owns all intermediate state (footprints, furnishing
//! points, label groups), so there is no process-wide cache and
//! concurrent runs over distinct models cannot interfere.

use crate::aggregate::{
    contains_match_count, exact_match_count, furnishing_label_groups, space_label_groups,
    total_area_by_label, CanonicalGroup,
};
use crate::assign::{assign_furnishings, DEFAULT_Z_TOLERANCE_M};
use crate::config::{QuantitySource, RuleSet, STANDARD_STUDENT_CHAIR};
use crate::error::Result;
use crate::evaluate::{evaluate_rule, CheckResult};
use crate::extract::{build_footprints, extract_furnishings, FurnishingPoint, RoomFootprint};
use rustc_hash::FxHashMap;
use school_check_core::{BuildingModel, EntityId, UnitScale};

/// Tunable extraction parameters
#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    /// Vertical assignment tolerance in meters
    pub z_tolerance_m: f64,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            z_tolerance_m: DEFAULT_Z_TOLERANCE_M,
        }
    }
}

/// Everything one evaluation run derives from the model
#[derive(Debug, Clone)]
pub struct EvaluationContext {
    pub unit_scale: UnitScale,
    /// Rooms with footprints, sorted by (display name, entity id),
    /// furnishings already assigned
    pub rooms: Vec<RoomFootprint>,
    /// Furnishings with resolved world points, model order
    pub furnishings: Vec<FurnishingPoint>,
    /// Canonical label groups over all furnishing instances
    pub furnishing_groups: FxHashMap<String, CanonicalGroup>,
    /// Canonical label groups over all spaces (geometry not required)
    pub space_groups: FxHashMap<String, CanonicalGroup>,
}

impl EvaluationContext {
    /// Extract, assign and aggregate one model snapshot
    pub fn build(model: &dyn BuildingModel, options: &ExtractOptions) -> Self {
        let unit_scale = UnitScale::from_units(&model.declared_units());
        let mut rooms = build_footprints(model);
        let furnishings = extract_furnishings(model);
        assign_furnishings(&mut rooms, &furnishings, options.z_tolerance_m);
        let furnishing_groups = furnishing_label_groups(model);
        let space_groups = space_label_groups(model);

        tracing::info!(
            rooms = rooms.len(),
            furnishings = furnishings.len(),
            furnishing_groups = furnishing_groups.len(),
            length_scale = unit_scale.length,
            "evaluation context built"
        );

        Self {
            unit_scale,
            rooms,
            furnishings,
            furnishing_groups,
            space_groups,
        }
    }

    /// Occupant count auto-derived from detected student chairs
    pub fn occupant_count(&self) -> u32 {
        contains_match_count(&self.furnishing_groups, STANDARD_STUDENT_CHAIR) as u32
    }

    /// Quantity the model provides for a rule source
    pub fn available(&self, source: &QuantitySource) -> f64 {
        match source {
            QuantitySource::RoomArea { label } => total_area_by_label(&self.rooms, label),
            QuantitySource::RoomCount { label } => {
                exact_match_count(&self.space_groups, label) as f64
            }
            QuantitySource::FurnishingCount { label } => {
                contains_match_count(&self.furnishing_groups, label) as f64
            }
        }
    }

    /// Furnishing point by entity id
    pub fn furnishing(&self, id: EntityId) -> Option<&FurnishingPoint> {
        self.furnishings.iter().find(|f| f.id == id)
    }

    /// Evaluate a validated rule set against this context
    pub fn evaluate(&self, set: &RuleSet) -> Vec<CheckResult> {
        let occupants = set.occupant_override.unwrap_or_else(|| self.occupant_count());
        tracing::debug!(
            occupants,
            school_type = set.school_type.label(),
            rules = set.rules.len(),
            "evaluating rule set"
        );
        set.rules
            .iter()
            .map(|rule| evaluate_rule(rule, set.school_type, occupants, |s| self.available(s)))
            .collect()
    }
}

/// Validate the configuration, then run the full pipeline
///
/// One structured record per rule; configuration errors surface before
/// any model work begins.
pub fn evaluate_model(model: &dyn BuildingModel, set: &RuleSet) -> Result<Vec<CheckResult>> {
    set.validate()?;
    let ctx = EvaluationContext::build(model, &ExtractOptions::default());
    Ok(ctx.evaluate(set))
}
