//! Shared test utilities for the note-save test suite.
//!
//! Fixture builders for timestamps, images and entries, plus extractors that
//! flatten a [`Layout`] into plain spans so tests can compare shapes.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let entries = entries_with_spans(&[1, 1, 3, 2, 1]);
//! let layout = paginate(&entries, 4, 2);
//! assert_eq!(
//!     layout_spans(&layout),
//!     vec![vec![vec![1, 1], vec![3]], vec![vec![2, 1]]],
//! );
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::path::Path;

use crate::layout::Layout;
use crate::types::Entry;

// =========================================================================
// Fixtures
// =========================================================================

/// A fixed day (2024-03-09) at the given wall-clock time.
pub fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_opt(hour, minute, second)
        .unwrap()
}

/// A small solid-colour RGBA image.
pub fn test_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        width,
        height,
        Rgba([200, 80, 40, 255]),
    ))
}

/// Write a real PNG file of the given size.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    test_image(width, height)
        .save_with_format(path, ImageFormat::Png)
        .unwrap();
}

/// One entry per span. Span 0 gives a text-only entry (raw empty name, as
/// the loader produces); span `n` gives `n` image names.
pub fn entries_with_spans(spans: &[usize]) -> Vec<Entry> {
    spans
        .iter()
        .enumerate()
        .map(|(i, &span)| {
            let names = if span == 0 {
                vec![String::new()]
            } else {
                (0..span).map(|j| format!("img-{i}-{j}")).collect()
            };
            Entry::new(names, format!("entry {i}"))
        })
        .collect()
}

// =========================================================================
// Extractors
// =========================================================================

/// Cell spans per row per page.
pub fn layout_spans(layout: &Layout<'_>) -> Vec<Vec<Vec<usize>>> {
    layout
        .pages
        .iter()
        .map(|page| {
            page.rows
                .iter()
                .map(|row| row.cells.iter().map(|cell| cell.span).collect())
                .collect()
        })
        .collect()
}

/// Sorted file names (not paths) directly inside `dir`.
pub fn list_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
