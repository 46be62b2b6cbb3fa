//! Candidate image discovery.
//!
//! The catalog is re-read from the filesystem on every run — nothing is
//! cached, so there is no staleness across runs, and nothing excludes an
//! image that was already featured.

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Extensions accepted as candidate portraits (compared case-insensitively).
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// List all image files in `dir`.
///
/// Only regular files whose extension matches the allow-list are returned;
/// subdirectories and everything else are silently skipped. An empty result
/// is not an error — callers decide whether to skip the run.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        if IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) {
            images.push(path);
        }
    }
    Ok(images)
}

/// Returns `true` if `dir` has no entries at all.
///
/// Used as the startup fail-fast check: a bot pointed at an empty directory
/// is misconfigured and should not begin scheduling.
pub fn dir_is_empty(dir: &Path) -> Result<bool> {
    Ok(std::fs::read_dir(dir)?.next().is_none())
}
