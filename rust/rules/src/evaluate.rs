// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rule evaluation
//!
//! Turns one declarative rule plus the run's aggregates into a
//! [`CheckResult`]. Absence of model data is a status, never an error:
//! a positive requirement against a zero quantity reports `NO_SOURCE`,
//! and a zero coefficient for the active school type reports
//! `NOT_REQUIRED` while still carrying the available value. All
//! comparisons are non-strict and computed at full float precision;
//! rounding for display is the caller's concern.

use crate::config::{CheckRule, ComparisonPolicy, QuantitySource, Requirement, SchoolType};
use serde::{Deserialize, Serialize};

/// Outcome of one check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckStatus {
    /// Requirement satisfied
    Ok,
    /// Requirement missed; see shortfall
    NotOk,
    /// The referenced room or fixture does not exist in the model
    NoSource,
    /// The rule is intentionally inapplicable for the school type
    NotRequired,
}

/// Structured result of one check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub rule_id: String,
    /// The standardized label the rule's source matched against
    pub label: String,
    pub school_type: SchoolType,
    /// Occupant count that entered the requirement, when one did
    pub occupants_used: Option<u32>,
    pub required: f64,
    pub available: f64,
    pub status: CheckStatus,
    /// `max(0, required - available)` under an at-least policy,
    /// `max(0, available - required)` under at-most
    pub shortfall: f64,
}

/// Evaluate a single rule against quantities supplied by `available_of`
///
/// The closure decouples evaluation from the extraction pipeline: the
/// run context passes its aggregate lookups, tests pass constants.
pub fn evaluate_rule<F>(
    rule: &CheckRule,
    school_type: SchoolType,
    occupants: u32,
    available_of: F,
) -> CheckResult
where
    F: Fn(&QuantitySource) -> f64,
{
    let available = available_of(&rule.source);

    let mut occupants_used = None;
    let required = match &rule.requirement {
        Requirement::PerOccupant { coefficients } => {
            let coefficient = coefficients.get(&school_type).copied().unwrap_or(0.0);
            if coefficient == 0.0 {
                return not_required(rule, school_type, available);
            }
            occupants_used = Some(occupants);
            f64::from(occupants) * coefficient
        }
        Requirement::PerOccupantFixed {
            coefficients,
            occupants: fixed,
        } => {
            let coefficient = coefficients.get(&school_type).copied().unwrap_or(0.0);
            if coefficient == 0.0 {
                return not_required(rule, school_type, available);
            }
            occupants_used = Some(*fixed);
            f64::from(*fixed) * coefficient
        }
        Requirement::RatioOf { source, per } => (available_of(source) / per).ceil(),
        Requirement::Fixed { minimum } => *minimum,
    };

    let (status, shortfall) = match rule.policy {
        ComparisonPolicy::AtLeast => {
            if required > 0.0 && available <= 0.0 {
                (CheckStatus::NoSource, required)
            } else if available >= required {
                (CheckStatus::Ok, 0.0)
            } else {
                (CheckStatus::NotOk, required - available)
            }
        }
        ComparisonPolicy::AtMost => {
            if available <= required {
                (CheckStatus::Ok, 0.0)
            } else {
                (CheckStatus::NotOk, available - required)
            }
        }
    };

    CheckResult {
        rule_id: rule.id.clone(),
        label: rule.source.label().to_string(),
        school_type,
        occupants_used,
        required,
        available,
        status,
        shortfall,
    }
}

fn not_required(rule: &CheckRule, school_type: SchoolType, available: f64) -> CheckResult {
    CheckResult {
        rule_id: rule.id.clone(),
        label: rule.source.label().to_string(),
        school_type,
        occupants_used: None,
        required: 0.0,
        available,
        status: CheckStatus::NotRequired,
        shortfall: 0.0,
    }
}
