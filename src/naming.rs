//! Image file naming: wall-clock stems with a collision suffix.
//!
//! Every saved image is named after the second it was saved in:
//!
//! - `2024-03-09_14-05-59.png`: first image saved in that second
//! - `2024-03-09_14-05-59_1.png`: second one, same second
//! - `2024-03-09_14-05-59_2.png`: and so on
//!
//! The suffix only appears on collision, and the probe is against the files
//! already in the collection directory. Because the store writes each image
//! before naming the next, a batch saved within one second still gets
//! distinct names.
//!
//! The clock is read once per save, not once per image: every image of one
//! entry shares the save's stem and differs only by suffix, even when
//! writing the batch takes longer than a second.

use chrono::NaiveDateTime;
use std::path::Path;

/// `strftime` pattern for the timestamp part of an image name.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Extension of every saved image (always PNG).
pub const IMAGE_EXTENSION: &str = "png";

/// Upper bound on disambiguator probes before giving up.
pub const MAX_NAME_ATTEMPTS: u32 = 10_000;

/// Timestamp stem for an image saved at `at`.
pub fn timestamp_stem(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Stem with the disambiguator appended; index 0 means no suffix.
pub fn image_stem(stem: &str, index: u32) -> String {
    if index == 0 {
        stem.to_string()
    } else {
        format!("{stem}_{index}")
    }
}

/// File name (stem + extension) for an image name.
pub fn image_file_name(name: &str) -> String {
    format!("{name}.{IMAGE_EXTENSION}")
}

/// Find the first free name for `stem` in `dir`.
///
/// Tries `stem`, then `stem_1`, `stem_2`, ... Returns `None` once
/// [`MAX_NAME_ATTEMPTS`] names have all been taken.
pub fn next_free_name(dir: &Path, stem: &str) -> Option<String> {
    (0..MAX_NAME_ATTEMPTS)
        .map(|index| image_stem(stem, index))
        .find(|name| !dir.join(image_file_name(name)).exists())
}

/// A saved image name split back into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedImageName {
    /// Second the image was saved in.
    pub saved_at: NaiveDateTime,
    /// Disambiguator, 0 when the name has no suffix.
    pub index: u32,
}

/// Parse an image name produced by this module.
///
/// - `"2024-03-09_14-05-59"` → index 0
/// - `"2024-03-09_14-05-59_3"` → index 3
/// - anything else → `None`
pub fn parse_image_name(name: &str) -> Option<ParsedImageName> {
    // The timestamp itself has a fixed width of 19 characters.
    let stamp = name.get(..19)?;
    let saved_at = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()?;
    let index = match &name[19..] {
        "" => 0,
        rest => {
            let digits = rest.strip_prefix('_')?;
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            digits.parse().ok()?
        }
    };
    Some(ParsedImageName { saved_at, index })
}
