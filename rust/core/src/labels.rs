// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Label canonicalization
//!
//! Free-text room and furnishing names carry embedded numbering
//! ("Classroom 12", "#3 Classroom"). Rule lookups strip those tokens so
//! that numbered instances group under one canonical label.

/// True for a standalone numeric token: one or more ASCII digits with an
/// optional leading `#`. "12" and "#3" qualify, "wc-1" does not.
fn is_numeric_token(token: &str) -> bool {
    let digits = token.strip_prefix('#').unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Display form of a label: whitespace collapsed, numeric tokens
/// stripped, original casing kept
pub fn display_label(label: &str) -> String {
    label
        .split_whitespace()
        .filter(|token| !is_numeric_token(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonical form of a label, used as the grouping and lookup key
///
/// Same stripping as [`display_label`], then lower-cased. Idempotent:
/// `canonicalize(canonicalize(l)) == canonicalize(l)`. Empty and
/// whitespace-only labels canonicalize to the empty string.
pub fn canonicalize(label: &str) -> String {
    display_label(label).to_lowercase()
}

/// Room number of a purely numeric name ("12" → 12), `None` otherwise
pub fn parse_room_number(name: &str) -> Option<u32> {
    let trimmed = name.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_standalone_numeric_tokens() {
        assert_eq!(canonicalize("Room 12"), "room");
        assert_eq!(canonicalize("#3 Classroom"), "classroom");
        assert_eq!(canonicalize("Classroom 12"), canonicalize("classroom"));
    }

    #[test]
    fn keeps_attached_digits() {
        assert_eq!(canonicalize("wc-1"), "wc-1");
        assert_eq!(canonicalize("Lab2"), "lab2");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(canonicalize("  Meeting   Room  "), "meeting room");
        assert_eq!(display_label("  Meeting   Room 4 "), "Meeting Room");
    }

    #[test]
    fn idempotent() {
        for label in ["Classroom 12", "  staff   WC ", "#7", "", "wc-1"] {
            let once = canonicalize(label);
            assert_eq!(canonicalize(&once), once);
        }
    }

    #[test]
    fn empty_labels_canonicalize_to_empty() {
        assert_eq!(canonicalize(""), "");
        assert_eq!(canonicalize("   "), "");
        assert_eq!(canonicalize("12"), "");
        assert_eq!(canonicalize("#12"), "");
    }

    #[test]
    fn room_numbers() {
        assert_eq!(parse_room_number("12"), Some(12));
        assert_eq!(parse_room_number(" 7 "), Some(7));
        assert_eq!(parse_room_number("12a"), None);
        assert_eq!(parse_room_number("classroom"), None);
        assert_eq!(parse_room_number(""), None);
    }
}
