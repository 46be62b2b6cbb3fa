//! EXIF orientation normalization.
//!
//! Discord renders uploaded icons without honoring EXIF orientation, so a
//! portrait shot on a phone would appear sideways. Before upload, the chosen
//! file is rewritten in place with its pixel buffer rotated upright.
//!
//! Re-encoding drops the EXIF block, so a normalized file carries no stale
//! orientation tag and a second pass is a no-op.

use crate::error::{Result, SpotlightError};
use exif::{In, Tag};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Corrective rotation derived from the EXIF orientation tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rotation {
    /// Quarter turn clockwise.
    Cw90,
    /// Half turn.
    Cw180,
    /// Three-quarter turn clockwise.
    Cw270,
}

/// Rewrite the file at `path` so it displays upright.
///
/// Files without an EXIF orientation tag (most PNGs, already-normalized
/// JPEGs) are left byte-identical. Unreadable or undecodable files are an
/// error; the caller aborts the current run and the scheduler re-arms.
pub fn normalize_orientation(path: &Path) -> Result<()> {
    let Some(rotation) = read_orientation(path)?.and_then(rotation_for) else {
        return Ok(());
    };

    let img = image::open(path)
        .map_err(|e| SpotlightError::Image(format!("failed to decode {}: {e}", path.display())))?;
    let upright = match rotation {
        Rotation::Cw90 => img.rotate90(),
        Rotation::Cw180 => img.rotate180(),
        Rotation::Cw270 => img.rotate270(),
    };
    upright
        .save(path)
        .map_err(|e| SpotlightError::Image(format!("failed to rewrite {}: {e}", path.display())))?;
    Ok(())
}

/// Read the EXIF orientation value, if the file carries one.
fn read_orientation(path: &Path) -> Result<Option<u32>> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let exif = match exif::Reader::new().read_from_container(&mut reader) {
        Ok(exif) => exif,
        // No EXIF container at all — nothing to correct.
        Err(_) => return Ok(None),
    };

    let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) else {
        return Ok(None);
    };
    let value = match field.value {
        exif::Value::Short(ref v) => v.first().map(|&x| u32::from(x)),
        exif::Value::Long(ref v) => v.first().copied(),
        _ => None,
    };
    Ok(value)
}

/// Orientation → correction policy.
///
/// Values 3/6/8 are the rotation-only orientations; mirrored variants and
/// anything unknown are passed through untouched.
fn rotation_for(orientation: u32) -> Option<Rotation> {
    match orientation {
        3 => Some(Rotation::Cw180),
        6 => Some(Rotation::Cw90),
        8 => Some(Rotation::Cw270),
        _ => None,
    }
}
