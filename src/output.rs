//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output shows what an entry *says* before where it lives: each card is a
//! positional index and the first line of its text, with image names as
//! indented context lines. Rows and pages are shown as they are laid out, so
//! the terminal listing matches the grid.
//!
//! # Output Format
//!
//! ## Collections
//!
//! ```text
//! Collections
//! 001 Default (current)
//! 002 Recipes
//! ```
//!
//! ## Page
//!
//! ```text
//! Default: page 1/2
//! Row 1
//!     001 Buy milk
//!     002 [2] Whiteboard after standup
//!         Images: 2024-03-09_14-05-59, 2024-03-09_14-05-59_1
//! Row 2
//!     003 [1] (no text)
//!         Images: 2024-03-09_14-07-12
//! ```
//!
//! ## Save
//!
//! ```text
//! Saved to Default (1 image)
//!     Image: saved/Default/2024-03-09_14-05-59.png
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::layout::{Cell, Layout};
use crate::store::SavedEntry;

/// Longest first-line preview shown for a card.
const PREVIEW_CHARS: usize = 60;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// First non-blank line of the text, truncated.
fn first_line(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| truncate(line, PREVIEW_CHARS))
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// A card: index, span for image cards, first line of text; then image names.
///
/// ```text
/// 001 Buy milk
/// 002 [2] Whiteboard after standup
///     Images: a, b
/// ```
fn cell_lines(index: usize, cell: &Cell<'_>, depth: usize) -> Vec<String> {
    let entry = cell.entry;
    let text = first_line(&entry.text).unwrap_or_else(|| "(no text)".to_string());
    let header = if entry.image_count() == 0 {
        format!("{}{} {}", indent(depth), format_index(index), text)
    } else {
        format!(
            "{}{} [{}] {}",
            indent(depth),
            format_index(index),
            cell.span,
            text
        )
    };

    let mut lines = vec![header];
    if entry.image_count() > 0 {
        let names: Vec<&str> = entry.images().collect();
        lines.push(format!("{}Images: {}", indent(depth + 1), names.join(", ")));
    }
    lines
}

// ============================================================================
// Collections
// ============================================================================

/// Format the collection list, marking the current one.
pub fn format_collections(collections: &[String], current: &str) -> Vec<String> {
    let mut lines = vec!["Collections".to_string()];
    for (i, name) in collections.iter().enumerate() {
        if name == current {
            lines.push(format!("{} {} (current)", format_index(i + 1), name));
        } else {
            lines.push(format!("{} {}", format_index(i + 1), name));
        }
    }
    lines
}

pub fn print_collections(collections: &[String], current: &str) {
    for line in format_collections(collections, current) {
        println!("{}", line);
    }
}

// ============================================================================
// Page
// ============================================================================

/// Format one page of a layout. An out-of-range index prints the header only.
pub fn format_page(collection: &str, layout: &Layout<'_>, page_index: usize) -> Vec<String> {
    let mut lines = vec![format!(
        "{}: page {}/{}",
        collection,
        page_index + 1,
        layout.page_count()
    )];

    let Some(page) = layout.page(page_index) else {
        return lines;
    };
    if page.rows.is_empty() {
        lines.push(format!("{}(empty)", indent(1)));
        return lines;
    }

    let mut index = 0;
    for (r, row) in page.rows.iter().enumerate() {
        lines.push(format!("Row {}", r + 1));
        for cell in &row.cells {
            index += 1;
            lines.extend(cell_lines(index, cell, 1));
        }
    }
    lines
}

pub fn print_page(collection: &str, layout: &Layout<'_>, page_index: usize) {
    for line in format_page(collection, layout, page_index) {
        println!("{}", line);
    }
}

// ============================================================================
// Save
// ============================================================================

/// Format the result of a save.
pub fn format_saved(collection: &str, saved: &SavedEntry) -> Vec<String> {
    let mut lines = vec![format!(
        "Saved to {} ({})",
        collection,
        plural(saved.image_paths.len(), "image")
    )];
    for path in &saved.image_paths {
        lines.push(format!("{}Image: {}", indent(1), path.display()));
    }
    lines
}

pub fn print_saved(collection: &str, saved: &SavedEntry) {
    for line in format_saved(collection, saved) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
