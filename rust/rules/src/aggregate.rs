// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Canonical-label aggregation
//!
//! Rooms and furnishings group under canonical labels so that rule
//! lookups survive embedded numbering and case differences. Exact
//! lookups compare canonical keys; "contains" lookups scan the
//! preserved display strings case-insensitively and sum over every
//! matching group.

use crate::extract::RoomFootprint;
use rustc_hash::{FxHashMap, FxHashSet};
use school_check_core::{
    canonicalize, display_label, first_attribute, BuildingModel, EntityKind,
    FURNISHING_LABEL_ATTRS, SPACE_LABEL_ATTRS,
};

/// Instances sharing one canonical label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalGroup {
    /// First-seen display string, numeric tokens stripped
    pub display: String,
    /// Number of instances
    pub count: usize,
}

/// Group raw labels by canonical form
///
/// Empty canonical labels are excluded. The display string of a group
/// is taken from the first instance seen.
pub fn group_labels<I>(labels: I) -> FxHashMap<String, CanonicalGroup>
where
    I: IntoIterator<Item = String>,
{
    let mut groups: FxHashMap<String, CanonicalGroup> = FxHashMap::default();
    for label in labels {
        let key = canonicalize(&label);
        if key.is_empty() {
            continue;
        }
        groups
            .entry(key)
            .or_insert_with(|| CanonicalGroup {
                display: display_label(&label),
                count: 0,
            })
            .count += 1;
    }
    groups
}

/// Canonical groups over every furnishing instance in the model
///
/// Uses the full furnishing label fallback chain (name, object type,
/// defining-type name/element-type, tag). Placement is irrelevant here:
/// a furnishing without a world point still counts toward its label
/// group.
pub fn furnishing_label_groups(model: &dyn BuildingModel) -> FxHashMap<String, CanonicalGroup> {
    group_labels(
        model
            .entities(EntityKind::Furnishing)
            .into_iter()
            .filter_map(|id| first_attribute(model, id, FURNISHING_LABEL_ATTRS)),
    )
}

/// Canonical groups over every space in the model
///
/// Spaces without usable geometry still count here; only area totals
/// require a footprint.
pub fn space_label_groups(model: &dyn BuildingModel) -> FxHashMap<String, CanonicalGroup> {
    group_labels(
        model
            .entities(EntityKind::Space)
            .into_iter()
            .filter_map(|id| first_attribute(model, id, SPACE_LABEL_ATTRS)),
    )
}

/// Instance count of the group whose canonical key equals the label
pub fn exact_match_count(groups: &FxHashMap<String, CanonicalGroup>, label: &str) -> usize {
    groups
        .get(&canonicalize(label))
        .map_or(0, |group| group.count)
}

/// Summed instance count over every group whose display string
/// contains the phrase, case-insensitively
///
/// Order-independent: the sum is the same whatever order the groups
/// iterate in.
pub fn contains_match_count(groups: &FxHashMap<String, CanonicalGroup>, phrase: &str) -> usize {
    let needle = phrase.trim().to_lowercase();
    if needle.is_empty() {
        return 0;
    }
    groups
        .values()
        .filter(|group| group.display.to_lowercase().contains(&needle))
        .map(|group| group.count)
        .sum()
}

/// Summed area in square meters of rooms matching the label
pub fn total_area_by_label(rooms: &[RoomFootprint], label: &str) -> f64 {
    let canonical = canonicalize(label);
    if canonical.is_empty() {
        return 0.0;
    }
    rooms
        .iter()
        .filter(|room| room.matches_canonical(&canonical))
        .map(|room| room.area_m2)
        .sum()
}

/// Filter options for the unique-label listing
#[derive(Debug, Clone)]
pub struct LabelFilter {
    /// Skip purely numeric names ("101")
    pub ignore_numeric: bool,
    /// Skip names starting with any of these prefixes,
    /// case-insensitively
    pub ignore_prefixes: Vec<String>,
}

impl Default for LabelFilter {
    fn default() -> Self {
        Self {
            ignore_numeric: true,
            ignore_prefixes: vec!["tmp".to_string(), "test".to_string()],
        }
    }
}

/// Distinct space labels, case-insensitively unique, sorted
///
/// Informational helper for presentation layers listing what the model
/// actually contains.
pub fn unique_room_labels(model: &dyn BuildingModel, filter: &LabelFilter) -> Vec<String> {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut labels = Vec::new();
    for id in model.entities(EntityKind::Space) {
        let Some(label) = first_attribute(model, id, SPACE_LABEL_ATTRS) else {
            continue;
        };
        if filter.ignore_numeric && label.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        let lower = label.to_lowercase();
        if filter
            .ignore_prefixes
            .iter()
            .any(|prefix| lower.starts_with(&prefix.to_lowercase()))
        {
            continue;
        }
        if seen.insert(lower) {
            labels.push(label);
        }
    }
    labels.sort_by_key(|l| l.to_lowercase());
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups_of(labels: &[&str]) -> FxHashMap<String, CanonicalGroup> {
        group_labels(labels.iter().map(|l| l.to_string()))
    }

    #[test]
    fn numbered_instances_share_one_group() {
        let groups = groups_of(&["Student Chair 1", "Student Chair 2", "student chair"]);
        assert_eq!(groups.len(), 1);
        let group = &groups["student chair"];
        assert_eq!(group.count, 3);
        assert_eq!(group.display, "Student Chair");
    }

    #[test]
    fn empty_labels_are_excluded() {
        let groups = groups_of(&["", "  ", "12", "WC"]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups["wc"].count, 1);
    }

    #[test]
    fn exact_lookup_uses_canonical_keys() {
        let groups = groups_of(&["WC 1", "wc 2", "Staff WC"]);
        assert_eq!(exact_match_count(&groups, "wc"), 2);
        assert_eq!(exact_match_count(&groups, "staff wc"), 1);
        assert_eq!(exact_match_count(&groups, "kitchen"), 0);
    }

    #[test]
    fn contains_lookup_sums_matching_groups() {
        let groups = groups_of(&[
            "Student Chair",
            "Student Chair",
            "Broken Student Chair",
            "Teacher Chair",
        ]);
        assert_eq!(contains_match_count(&groups, "student chair"), 3);
        assert_eq!(contains_match_count(&groups, "chair"), 4);
        assert_eq!(contains_match_count(&groups, ""), 0);
    }
}
