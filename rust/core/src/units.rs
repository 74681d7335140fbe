// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Unit extraction and conversion
//!
//! Derives the model's length-to-meter and area-to-square-meter scale
//! factors from its declared unit definitions. Lookup failures are never
//! fatal: the scale silently falls back to 1.0 (model units are treated
//! as already metric).

/// Dimension of a declared unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitKind {
    Length,
    Area,
    Other,
}

/// Definition of a declared unit
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitDef {
    /// Direct SI unit, e.g. name "METRE" with optional prefix "MILLI"
    Si {
        name: String,
        prefix: Option<String>,
    },
    /// Conversion-based unit: `value` base units per declared unit,
    /// where `base` names the SI unit component (e.g. "METRE")
    Conversion { value: f64, base: String },
}

/// One unit declaration from the project's unit assignment
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeclaredUnit {
    pub kind: UnitKind,
    pub def: UnitDef,
}

/// SI prefix multipliers
/// Maps prefix enum values to their numeric multipliers
#[inline]
pub fn si_prefix_multiplier(prefix: &str) -> f64 {
    match prefix {
        "ATTO" => 1e-18,
        "FEMTO" => 1e-15,
        "PICO" => 1e-12,
        "NANO" => 1e-9,
        "MICRO" => 1e-6,
        "MILLI" => 1e-3,   // Most common: millimeters
        "CENTI" => 1e-2,   // Centimeters
        "DECI" => 1e-1,    // Decimeters
        "DECA" => 1e1,     // Dekameters
        "HECTO" => 1e2,    // Hectometers
        "KILO" => 1e3,     // Kilometers
        "MEGA" => 1e6,
        "GIGA" => 1e9,
        "TERA" => 1e12,
        "PETA" => 1e15,
        "EXA" => 1e18,
        _ => 1.0,          // No prefix or unknown = base unit (meters)
    }
}

/// Length scale factor of a unit declaration list
///
/// The first length unit that resolves wins:
/// - SI "METRE" with an optional prefix yields the prefix multiplier
/// - a conversion-based unit whose component is SI "METRE" yields its
///   declared conversion value
///
/// No length unit, an unknown base, or a non-positive declared value
/// all fall back to 1.0.
pub fn length_scale(units: &[DeclaredUnit]) -> f64 {
    for unit in units {
        if unit.kind != UnitKind::Length {
            continue;
        }
        let scale = match &unit.def {
            UnitDef::Si { name, prefix } => {
                if name != "METRE" {
                    continue;
                }
                match prefix {
                    Some(p) => si_prefix_multiplier(p),
                    None => 1.0,
                }
            }
            UnitDef::Conversion { value, base } => {
                if base != "METRE" {
                    continue;
                }
                *value
            }
        };
        if scale.is_finite() && scale > 0.0 {
            return scale;
        }
        return 1.0;
    }
    1.0
}

/// Length and area scale factors of one model, computed once per run
///
/// Both factors are strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitScale {
    /// Multiplier converting model lengths to meters
    pub length: f64,
    /// Multiplier converting model areas to square meters
    pub area: f64,
}

impl UnitScale {
    /// Derive scale factors from the model's declared units
    pub fn from_units(units: &[DeclaredUnit]) -> Self {
        let length = length_scale(units);
        Self {
            length,
            area: length * length,
        }
    }
}

impl Default for UnitScale {
    fn default() -> Self {
        Self {
            length: 1.0,
            area: 1.0,
        }
    }
}
