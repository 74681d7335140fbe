// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rule configuration
//!
//! Checks are declarative: a requirement (how much is needed), a
//! quantity source (what the model provides) and a comparison policy.
//! Coefficient tables are keyed by an explicit [`SchoolType`] enum
//! instead of positional arrays, so a table row can never silently
//! shift against its school-type column.
//!
//! Configurations are caller-supplied (JSON-loadable) and validated
//! before any model is processed; [`RuleSet::school_standard`] builds
//! the standard school battery.

use crate::error::{Error, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Standardized furnishing label used to auto-derive occupant counts
pub const STANDARD_STUDENT_CHAIR: &str = "student chair";

/// Default per-room seat capacity for classroom-style checks
pub const DEFAULT_MAX_CAPACITY: u32 = 24;

/// School type selecting which coefficient applies to every rule in a
/// run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchoolType {
    EbtedaeiDore1,
    EbtedaeiDore2,
    MotevaseteDore1,
    MotevaseteDore2,
}

impl SchoolType {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            SchoolType::EbtedaeiDore1 => "ebtedaei dore 1",
            SchoolType::EbtedaeiDore2 => "ebtedaei dore 2",
            SchoolType::MotevaseteDore1 => "motevasete dore 1",
            SchoolType::MotevaseteDore2 => "motevasete dore 2",
        }
    }

    /// All school types, in the conventional order
    pub const ALL: [SchoolType; 4] = [
        SchoolType::EbtedaeiDore1,
        SchoolType::EbtedaeiDore2,
        SchoolType::MotevaseteDore1,
        SchoolType::MotevaseteDore2,
    ];
}

/// Per-school-type coefficient record
pub type CoefficientTable = FxHashMap<SchoolType, f64>;

/// Build a coefficient table from (school type, value) pairs
pub fn coefficients(entries: &[(SchoolType, f64)]) -> CoefficientTable {
    entries.iter().copied().collect()
}

/// Coefficient table covering all four school types, in [`SchoolType::ALL`] order
fn full_table(values: [f64; 4]) -> CoefficientTable {
    SchoolType::ALL.iter().copied().zip(values).collect()
}

/// What the model provides for a rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantitySource {
    /// Summed footprint area (m²) of rooms matching the label exactly
    /// (canonicalized)
    RoomArea { label: String },
    /// Number of spaces matching the label exactly (canonicalized);
    /// geometry not required
    RoomCount { label: String },
    /// Number of furnishings whose display label contains the phrase
    FurnishingCount { label: String },
}

impl QuantitySource {
    /// The standardized label the source matches against
    pub fn label(&self) -> &str {
        match self {
            QuantitySource::RoomArea { label }
            | QuantitySource::RoomCount { label }
            | QuantitySource::FurnishingCount { label } => label,
        }
    }
}

/// How much a rule requires
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    /// Coefficient for the active school type × detected occupant count.
    /// A coefficient of exactly 0.0 marks the rule intentionally
    /// inapplicable for that school type.
    PerOccupant { coefficients: CoefficientTable },
    /// Coefficient × a fixed population, regardless of detected
    /// occupants (library sizing)
    PerOccupantFixed {
        coefficients: CoefficientTable,
        occupants: u32,
    },
    /// One required per `per` units of another quantity, rounded up
    /// (staff WC sizing)
    RatioOf { source: QuantitySource, per: f64 },
    /// Fixed minimum
    Fixed { minimum: f64 },
}

/// Direction of the requirement comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonPolicy {
    /// Available must reach the required value (non-strict)
    #[default]
    AtLeast,
    /// Available must not exceed the required value (non-strict)
    AtMost,
}

/// One declarative check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckRule {
    pub id: String,
    pub requirement: Requirement,
    pub source: QuantitySource,
    #[serde(default)]
    pub policy: ComparisonPolicy,
}

/// A full rule configuration for one evaluation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub school_type: SchoolType,
    /// Explicit occupant count; when absent the count is auto-derived
    /// from detected student chairs
    #[serde(default)]
    pub occupant_override: Option<u32>,
    pub rules: Vec<CheckRule>,
}

impl RuleSet {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let set: RuleSet = serde_json::from_str(json)?;
        set.validate()?;
        Ok(set)
    }

    /// Validate the configuration without touching a model
    ///
    /// Structural problems (empty labels, missing coefficients,
    /// non-finite quantities, duplicate ids) fail here, loudly, before
    /// any evaluation work starts.
    pub fn validate(&self) -> Result<()> {
        let mut seen_ids: Vec<&str> = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            if seen_ids.contains(&rule.id.as_str()) {
                return Err(Error::DuplicateRuleId {
                    id: rule.id.clone(),
                });
            }
            seen_ids.push(&rule.id);

            validate_source(&rule.id, &rule.source)?;
            match &rule.requirement {
                Requirement::PerOccupant { coefficients }
                | Requirement::PerOccupantFixed { coefficients, .. } => {
                    let Some(coefficient) = coefficients.get(&self.school_type) else {
                        return Err(Error::MissingCoefficient {
                            rule: rule.id.clone(),
                            school_type: self.school_type,
                        });
                    };
                    if !coefficient.is_finite() || *coefficient < 0.0 {
                        return Err(Error::InvalidQuantity {
                            rule: rule.id.clone(),
                            detail: format!("coefficient {coefficient} is not a finite non-negative number"),
                        });
                    }
                }
                Requirement::RatioOf { source, per } => {
                    validate_source(&rule.id, source)?;
                    if !per.is_finite() || *per <= 0.0 {
                        return Err(Error::InvalidQuantity {
                            rule: rule.id.clone(),
                            detail: format!("ratio divisor {per} must be finite and positive"),
                        });
                    }
                }
                Requirement::Fixed { minimum } => {
                    if !minimum.is_finite() || *minimum < 0.0 {
                        return Err(Error::InvalidQuantity {
                            rule: rule.id.clone(),
                            detail: format!("minimum {minimum} is not a finite non-negative number"),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// The standard school battery: per-capita areas for the six
    /// standardized room names plus the WC count rules
    pub fn school_standard(school_type: SchoolType) -> Self {
        let rules = vec![
            CheckRule {
                id: "2-2-1-classroom".to_string(),
                requirement: Requirement::PerOccupant {
                    coefficients: full_table([1.7, 1.85, 1.8, 2.0]),
                },
                source: QuantitySource::RoomArea {
                    label: "classroom".to_string(),
                },
                policy: ComparisonPolicy::AtLeast,
            },
            CheckRule {
                id: "2-2-1-workshop".to_string(),
                requirement: Requirement::PerOccupant {
                    coefficients: full_table([2.5, 2.7, 3.0, 0.0]),
                },
                source: QuantitySource::RoomArea {
                    label: "workshop".to_string(),
                },
                policy: ComparisonPolicy::AtLeast,
            },
            CheckRule {
                id: "2-2-1-laboratory".to_string(),
                requirement: Requirement::PerOccupant {
                    coefficients: full_table([2.02, 2.02, 3.2, 3.2]),
                },
                source: QuantitySource::RoomArea {
                    label: "laboratory".to_string(),
                },
                policy: ComparisonPolicy::AtLeast,
            },
            CheckRule {
                id: "2-2-1-computer-site".to_string(),
                requirement: Requirement::PerOccupant {
                    coefficients: full_table([2.02, 2.02, 2.55, 2.55]),
                },
                source: QuantitySource::RoomArea {
                    label: "computer site".to_string(),
                },
                policy: ComparisonPolicy::AtLeast,
            },
            CheckRule {
                id: "2-1-3-2-praying-room".to_string(),
                requirement: Requirement::PerOccupant {
                    coefficients: full_table([0.8, 0.8, 0.9, 0.9]),
                },
                source: QuantitySource::RoomArea {
                    label: "praying room".to_string(),
                },
                policy: ComparisonPolicy::AtLeast,
            },
            // Library sizing always assumes 24 students, whatever the
            // detected occupant count
            CheckRule {
                id: "2-2-1-library".to_string(),
                requirement: Requirement::PerOccupantFixed {
                    coefficients: full_table([1.6, 1.8, 2.0, 2.0]),
                    occupants: 24,
                },
                source: QuantitySource::RoomArea {
                    label: "library".to_string(),
                },
                policy: ComparisonPolicy::AtLeast,
            },
            // One WC per classroom
            CheckRule {
                id: "2-1-4-wc".to_string(),
                requirement: Requirement::RatioOf {
                    source: QuantitySource::RoomCount {
                        label: "classroom".to_string(),
                    },
                    per: 1.0,
                },
                source: QuantitySource::RoomCount {
                    label: "wc".to_string(),
                },
                policy: ComparisonPolicy::AtLeast,
            },
            // One staff WC per six classrooms, rounded up
            CheckRule {
                id: "2-1-5-staff-wc".to_string(),
                requirement: Requirement::RatioOf {
                    source: QuantitySource::RoomCount {
                        label: "classroom".to_string(),
                    },
                    per: 6.0,
                },
                source: QuantitySource::RoomCount {
                    label: "staff wc".to_string(),
                },
                policy: ComparisonPolicy::AtLeast,
            },
            CheckRule {
                id: "2-1-6-disabled-wc".to_string(),
                requirement: Requirement::Fixed { minimum: 1.0 },
                source: QuantitySource::RoomCount {
                    label: "wc for disabled".to_string(),
                },
                policy: ComparisonPolicy::AtLeast,
            },
        ];

        Self {
            school_type,
            occupant_override: None,
            rules,
        }
    }
}

/// Meeting-room seat rule with a caller-chosen minimum
///
/// The minimum depends on a school-type scheme of its own, so callers
/// resolve it before building the rule.
pub fn meeting_room_seats(minimum: u32) -> CheckRule {
    CheckRule {
        id: "2-1-3-3-meeting-room".to_string(),
        requirement: Requirement::Fixed {
            minimum: f64::from(minimum),
        },
        source: QuantitySource::FurnishingCount {
            label: "meeting room chair".to_string(),
        },
        policy: ComparisonPolicy::AtLeast,
    }
}

fn validate_source(rule_id: &str, source: &QuantitySource) -> Result<()> {
    if source.label().trim().is_empty() {
        return Err(Error::EmptyLabel {
            rule: rule_id.to_string(),
        });
    }
    Ok(())
}

/// Per-room capacity check configuration
///
/// Rooms matching `room_label` must each hold at most `max_per_room`
/// furnishings matching `furnishing_label`. When no room matches and a
/// fallback label is given, rooms matching the fallback are checked
/// instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityRule {
    pub room_label: String,
    #[serde(default)]
    pub fallback_room_label: Option<String>,
    pub furnishing_label: String,
    pub max_per_room: u32,
}

impl CapacityRule {
    /// Classroom capacity: student chairs per classroom
    pub fn classroom(max_per_room: u32) -> Self {
        Self {
            room_label: "classroom".to_string(),
            fallback_room_label: None,
            furnishing_label: STANDARD_STUDENT_CHAIR.to_string(),
            max_per_room,
        }
    }

    /// Laboratory capacity: laboratory chairs per laboratory, falling
    /// back to generic "room" spaces when no laboratory is modeled
    pub fn laboratory(max_per_room: u32) -> Self {
        Self {
            room_label: "laboratory".to_string(),
            fallback_room_label: Some("room".to_string()),
            furnishing_label: "laboratory chair".to_string(),
            max_per_room,
        }
    }

    /// Validate labels and capacity
    pub fn validate(&self) -> Result<()> {
        let rule = format!("capacity:{}", self.room_label);
        if self.room_label.trim().is_empty() || self.furnishing_label.trim().is_empty() {
            return Err(Error::EmptyLabel { rule });
        }
        if self.max_per_room == 0 {
            return Err(Error::InvalidQuantity {
                rule,
                detail: "max_per_room must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_set_validates_for_every_school_type() {
        for school_type in SchoolType::ALL {
            RuleSet::school_standard(school_type).validate().unwrap();
        }
    }

    #[test]
    fn json_round_trip() {
        let set = RuleSet::school_standard(SchoolType::MotevaseteDore1);
        let json = serde_json::to_string(&set).unwrap();
        let parsed = RuleSet::from_json(&json).unwrap();
        assert_eq!(parsed, set);
    }

    #[test]
    fn missing_coefficient_is_rejected() {
        let set = RuleSet {
            school_type: SchoolType::MotevaseteDore2,
            occupant_override: None,
            rules: vec![CheckRule {
                id: "partial".to_string(),
                requirement: Requirement::PerOccupant {
                    coefficients: coefficients(&[(SchoolType::EbtedaeiDore1, 1.7)]),
                },
                source: QuantitySource::RoomArea {
                    label: "classroom".to_string(),
                },
                policy: ComparisonPolicy::AtLeast,
            }],
        };
        assert!(matches!(
            set.validate(),
            Err(Error::MissingCoefficient { .. })
        ));
    }

    #[test]
    fn empty_label_is_rejected() {
        let set = RuleSet {
            school_type: SchoolType::EbtedaeiDore1,
            occupant_override: None,
            rules: vec![CheckRule {
                id: "blank".to_string(),
                requirement: Requirement::Fixed { minimum: 1.0 },
                source: QuantitySource::RoomCount {
                    label: "  ".to_string(),
                },
                policy: ComparisonPolicy::AtLeast,
            }],
        };
        assert!(matches!(set.validate(), Err(Error::EmptyLabel { .. })));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut set = RuleSet::school_standard(SchoolType::EbtedaeiDore1);
        let dup = set.rules[0].clone();
        set.rules.push(dup);
        assert!(matches!(set.validate(), Err(Error::DuplicateRuleId { .. })));
    }

    #[test]
    fn zero_ratio_divisor_is_rejected() {
        let set = RuleSet {
            school_type: SchoolType::EbtedaeiDore1,
            occupant_override: None,
            rules: vec![CheckRule {
                id: "ratio".to_string(),
                requirement: Requirement::RatioOf {
                    source: QuantitySource::RoomCount {
                        label: "classroom".to_string(),
                    },
                    per: 0.0,
                },
                source: QuantitySource::RoomCount {
                    label: "wc".to_string(),
                },
                policy: ComparisonPolicy::AtLeast,
            }],
        };
        assert!(matches!(set.validate(), Err(Error::InvalidQuantity { .. })));
    }

    #[test]
    fn capacity_rule_validation() {
        CapacityRule::classroom(24).validate().unwrap();
        assert!(CapacityRule::classroom(0).validate().is_err());
        let blank = CapacityRule {
            room_label: String::new(),
            fallback_room_label: None,
            furnishing_label: "chair".to_string(),
            max_per_room: 10,
        };
        assert!(blank.validate().is_err());
    }
}
