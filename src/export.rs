//! Static HTML export of one page of the grid.
//!
//! Writes a self-contained page that looks like the browse view:
//!
//! ```text
//! out/
//! ├── index.html                       # the page, CSS inlined
//! └── thumbs/
//!     ├── 2024-03-09_14-05-59.png      # previews, longer edge <= preview.max_size
//!     └── 2024-03-09_14-05-59_1.png
//! ```
//!
//! Each layout row becomes a CSS grid row with `items_per_row` columns and
//! each card spans as many columns as it has images. Cards show their images
//! first, then the text.
//!
//! ## Previews
//!
//! Previews are generated in parallel with [rayon](https://docs.rs/rayon);
//! the pool size comes from `processing.max_processes` and is set up by the
//! binary. An image that is missing from the collection, or fails to decode,
//! is skipped with a warning and shown as a placeholder. So is a name that is
//! not a single plain file name (`../x`, `a/b`, an absolute path), since
//! names come from a log that may have been edited by hand. Only an unusable
//! output directory or a page index past the end fails the export.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating, so
//! entry text is escaped on interpolation.

use crate::collection::collection_dir;
use crate::config::NoteSaveConfig;
use crate::imaging::{Dimensions, ImageBackend, RustBackend};
use crate::layout::{Cell, Layout, Page};
use crate::naming::{image_file_name, parse_image_name};
use maud::{DOCTYPE, Markup, html};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

const CSS: &str = include_str!("../static/style.css");

/// Subdirectory of the output holding the previews.
pub const THUMBS_DIR: &str = "thumbs";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("page {page} does not exist (collection has {count} pages)")]
    PageOutOfRange { page: usize, count: usize },
}

/// What an export wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub html_path: PathBuf,
    /// Number of previews written.
    pub previews: usize,
    /// Image names that could not be previewed.
    pub skipped: Vec<String>,
}

/// Export page `page_index` (zero-based) with the pure Rust backend.
pub fn export_page(
    root: &Path,
    collection: &str,
    layout: &Layout<'_>,
    page_index: usize,
    output_dir: &Path,
    config: &NoteSaveConfig,
) -> Result<ExportSummary, ExportError> {
    export_page_with(
        &RustBackend::new(),
        root,
        collection,
        layout,
        page_index,
        output_dir,
        config,
    )
}

/// Export page `page_index` (zero-based) using `backend` for previews.
pub fn export_page_with<B: ImageBackend>(
    backend: &B,
    root: &Path,
    collection: &str,
    layout: &Layout<'_>,
    page_index: usize,
    output_dir: &Path,
    config: &NoteSaveConfig,
) -> Result<ExportSummary, ExportError> {
    let page = layout
        .page(page_index)
        .ok_or(ExportError::PageOutOfRange {
            page: page_index + 1,
            count: layout.page_count(),
        })?;

    let thumbs_dir = output_dir.join(THUMBS_DIR);
    fs::create_dir_all(&thumbs_dir)?;

    let source_dir = collection_dir(root, collection);
    let previews = write_previews(
        backend,
        &page_image_names(page),
        &source_dir,
        &thumbs_dir,
        config.preview.max_size,
    );
    let skipped: Vec<String> = page_image_names(page)
        .into_iter()
        .filter(|name| !previews.contains_key(name))
        .map(str::to_string)
        .collect();

    let html = render_page(collection, layout, page_index, page, &previews);
    let html_path = output_dir.join("index.html");
    fs::write(&html_path, html.into_string())?;
    tracing::info!(
        "exported page {}/{} of {collection} to {}",
        page_index + 1,
        layout.page_count(),
        html_path.display()
    );

    Ok(ExportSummary {
        html_path,
        previews: previews.len(),
        skipped,
    })
}

/// Image names on a page, in layout order, without repeats.
fn page_image_names<'a>(page: &Page<'a>) -> Vec<&'a str> {
    let mut names: Vec<&str> = Vec::new();
    for name in page.entries().flat_map(|entry| entry.images()) {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// Write one preview per name in parallel; returns the ones that worked.
fn write_previews<'a, B: ImageBackend>(
    backend: &B,
    names: &[&'a str],
    source_dir: &Path,
    thumbs_dir: &Path,
    max_size: u32,
) -> BTreeMap<&'a str, Dimensions> {
    names
        .par_iter()
        .filter_map(|&name| {
            if !is_plain_name(name) {
                tracing::warn!("skipping image name {name:?}: not a plain file name");
                return None;
            }
            let file_name = image_file_name(name);
            let source = source_dir.join(&file_name);
            if !source.exists() {
                tracing::warn!("missing image {}", source.display());
                return None;
            }
            match backend.preview(&source, &thumbs_dir.join(&file_name), max_size) {
                Ok(dimensions) => Some((name, dimensions)),
                Err(e) => {
                    tracing::warn!("cannot preview {}: {e}", source.display());
                    None
                }
            }
        })
        .collect()
}

/// True when `name` is exactly one normal path segment.
fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (CSS) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders one card: images, then text, then the save time if known.
fn render_card(
    cell: &Cell<'_>,
    items_per_row: usize,
    previews: &BTreeMap<&str, Dimensions>,
) -> Markup {
    let entry = cell.entry;
    let saved_at = entry
        .images()
        .next()
        .and_then(parse_image_name)
        .map(|parsed| parsed.saved_at);

    html! {
        article.card style={ "grid-column: span " (cell.span.min(items_per_row)) } {
            @if entry.image_count() > 0 {
                div.card-images {
                    @for name in entry.images() {
                        @match previews.get(name) {
                            Some(dims) => {
                                img src={ (THUMBS_DIR) "/" (image_file_name(name)) }
                                    width=(dims.width) height=(dims.height)
                                    alt=(name) loading="lazy";
                            }
                            None => {
                                span.missing-image { (name) }
                            }
                        }
                    }
                }
            }
            @if !entry.text.is_empty() {
                p.entry-text { (entry.text) }
            }
            @if let Some(at) = saved_at {
                time.saved-at datetime=(at.format("%Y-%m-%dT%H:%M:%S").to_string()) {
                    (at.format("%Y-%m-%d %H:%M").to_string())
                }
            }
        }
    }
}

/// Renders a page of the grid
fn render_page(
    collection: &str,
    layout: &Layout<'_>,
    page_index: usize,
    page: &Page<'_>,
    previews: &BTreeMap<&str, Dimensions>,
) -> Markup {
    let title = format!("{collection} · page {}", page_index + 1);
    let content = html! {
        header.page-header {
            h1 { (collection) }
            span.page-number { "Page " (page_index + 1) " of " (layout.page_count()) }
        }
        main.grid {
            @if page.rows.is_empty() {
                p.empty { "Nothing saved yet." }
            }
            @for row in &page.rows {
                div.grid-row style={ "--columns: " (layout.items_per_row) } {
                    @for cell in &row.cells {
                        (render_card(cell, layout.items_per_row, previews))
                    }
                }
            }
        }
    };

    base_document(&title, content)
}
