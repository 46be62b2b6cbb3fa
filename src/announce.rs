//! Display-name derivation and announcement formatting.
//!
//! Portraits are named by convention: `firstname_lastname.ext` or
//! `singleword.ext`. The derivation is best-effort — filenames with other
//! shapes still produce a name, just not necessarily a correct one.

use rand::seq::SliceRandom;
use std::path::Path;

/// Decorative markers appended to announcements.
pub const ANNOUNCEMENT_MARKERS: &[&str] = &[
    "🍎", "🕍", "📚", "🏫", "🎓", "📖", "🛰", "📝", "🤡", "💼", "🧟", "🔩",
];

/// Fallback when a filename has no usable stem.
const UNKNOWN_NAME: &str = "Unknown";

/// Derive a human-readable display name from an image path.
///
/// The file stem is split on underscores; the first and last parts get their
/// first letter capitalized (a single part gets it once), middle parts are
/// left as written, and everything is joined with spaces:
/// `john_smith.jpg` → `John Smith`, `principal.png` → `Principal`,
/// `ann_marie_lopez.jpeg` → `Ann marie Lopez`.
pub fn derive_display_name(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    if stem.is_empty() {
        return UNKNOWN_NAME.to_owned();
    }

    let mut parts: Vec<String> = stem.split('_').map(str::to_owned).collect();
    let last = parts.len() - 1;
    parts[0] = capitalize(&parts[0]);
    parts[last] = capitalize(&parts[last]);
    parts.join(" ")
}

/// Format the channel announcement for a featured teacher.
pub fn format_announcement(display_name: &str, marker: &str) -> String {
    format!("Today's featured teacher is: {display_name} {marker}")
}

/// Pick one decorative marker uniformly at random.
pub fn random_marker() -> &'static str {
    ANNOUNCEMENT_MARKERS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("🍎")
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn two_part_name_capitalizes_both() {
        assert_eq!(derive_display_name(Path::new("john_smith.jpg")), "John Smith");
    }

    #[test]
    fn single_part_name_capitalizes_once() {
        assert_eq!(derive_display_name(Path::new("principal.png")), "Principal");
    }

    #[test]
    fn middle_parts_are_left_as_written() {
        assert_eq!(
            derive_display_name(Path::new("ann_marie_lopez.jpeg")),
            "Ann marie Lopez"
        );
    }

    #[test]
    fn directory_prefix_is_ignored() {
        assert_eq!(
            derive_display_name(Path::new("./img/john_smith.jpg")),
            "John Smith"
        );
    }

    #[test]
    fn empty_stem_falls_back_to_unknown() {
        assert_eq!(derive_display_name(Path::new("")), "Unknown");
    }

    #[test]
    fn announcement_uses_fixed_wording() {
        assert_eq!(
            format_announcement("John Smith", "🍎"),
            "Today's featured teacher is: John Smith 🍎"
        );
    }

    #[test]
    fn random_marker_comes_from_the_fixed_set() {
        for _ in 0..32 {
            assert!(ANNOUNCEMENT_MARKERS.contains(&random_marker()));
        }
    }
}
