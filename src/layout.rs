//! Pagination and grid layout.
//!
//! Entries are laid out as a grid of cards. Each entry is as wide as the
//! number of images it carries (text-only entries are one unit wide), rows
//! hold at most `items_per_row` units, and pages hold at most
//! `rows_per_page` line units.
//!
//! ## Packing
//!
//! Both stages are greedy and order-preserving:
//!
//! 1. **Rows**: walk the entries, adding each to the current row until the
//!    next one would push the row past `items_per_row`; then start a new
//!    row. An entry wider than a whole row gets a row of its own and is
//!    never split.
//! 2. **Pages**: a row is `ceil(width / items_per_row)` line units tall
//!    (more than one only for a lone oversized entry). Rows are added to the
//!    current page until the next one would push it past `rows_per_page`.
//!    A row taller than a whole page gets a page of its own.
//!
//! ```text
//! items_per_row = 4, rows_per_page = 2, spans = [1, 1, 3, 2, 1]
//!
//! page 1   | 1 | 1 |               row 1, width 2
//!          |    3    |             row 2, width 3
//! page 2   |  2  | 1 |             row 3, width 3
//! ```
//!
//! There is always at least one page, so an empty collection still has a
//! (blank) page 1 to show.
//!
//! The layout is derived data. It borrows the entries it was built from and
//! is rebuilt on every refresh.

use crate::types::Entry;
use serde::Serialize;

/// One card: an entry and its width in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cell<'a> {
    pub entry: &'a Entry,
    pub span: usize,
}

/// Cells placed left to right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row<'a> {
    pub cells: Vec<Cell<'a>>,
    /// Sum of the cell spans.
    pub width: usize,
    /// Height in line units.
    pub height: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Page<'a> {
    pub rows: Vec<Row<'a>>,
}

impl<'a> Page<'a> {
    /// Entries on this page, in layout order.
    pub fn entries(&self) -> impl Iterator<Item = &'a Entry> + '_ {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter().map(|cell| cell.entry))
    }

    /// Total height in line units.
    pub fn height(&self) -> usize {
        self.rows.iter().map(|row| row.height).sum()
    }
}

/// Entries partitioned into pages of rows of cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout<'a> {
    pub items_per_row: usize,
    pub rows_per_page: usize,
    pub pages: Vec<Page<'a>>,
}

impl<'a> Layout<'a> {
    /// Never zero.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, index: usize) -> Option<&Page<'a>> {
        self.pages.get(index)
    }
}

/// Lay out `entries` in order. Zero constraints are treated as 1.
pub fn paginate(entries: &[Entry], items_per_row: usize, rows_per_page: usize) -> Layout<'_> {
    let items_per_row = items_per_row.max(1);
    let rows_per_page = rows_per_page.max(1);
    let rows = pack_rows(entries, items_per_row);
    let pages = pack_pages(rows, rows_per_page);
    Layout {
        items_per_row,
        rows_per_page,
        pages,
    }
}

fn close_row(cells: Vec<Cell<'_>>, width: usize, items_per_row: usize) -> Row<'_> {
    Row {
        cells,
        width,
        height: width.div_ceil(items_per_row),
    }
}

fn pack_rows(entries: &[Entry], items_per_row: usize) -> Vec<Row<'_>> {
    let mut rows = Vec::new();
    let mut cells = Vec::new();
    let mut width = 0;
    for entry in entries {
        let span = entry.span();
        if !cells.is_empty() && width + span > items_per_row {
            rows.push(close_row(std::mem::take(&mut cells), width, items_per_row));
            width = 0;
        }
        cells.push(Cell { entry, span });
        width += span;
    }
    if !cells.is_empty() {
        rows.push(close_row(cells, width, items_per_row));
    }
    rows
}

fn pack_pages(rows: Vec<Row<'_>>, rows_per_page: usize) -> Vec<Page<'_>> {
    let mut pages = Vec::new();
    let mut current: Vec<Row<'_>> = Vec::new();
    let mut used = 0;
    for row in rows {
        if !current.is_empty() && used + row.height > rows_per_page {
            pages.push(Page {
                rows: std::mem::take(&mut current),
            });
            used = 0;
        }
        used += row.height;
        current.push(row);
    }
    if !current.is_empty() || pages.is_empty() {
        pages.push(Page { rows: current });
    }
    pages
}

/// Current page index with boundary-checked navigation.
///
/// Moves past either end are silent no-ops; the index is clamped whenever
/// the page count changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current: usize,
    page_count: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Pager {
    pub fn new(page_count: usize) -> Self {
        Self {
            current: 0,
            page_count: page_count.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn last_index(&self) -> usize {
        self.page_count - 1
    }

    /// Update the page count after the content changed, keeping the current
    /// page if it still exists and falling back to the last page otherwise.
    pub fn set_page_count(&mut self, page_count: usize) {
        self.page_count = page_count.max(1);
        self.current = self.current.min(self.last_index());
    }

    /// `previous` and `first` would move.
    pub fn can_go_back(&self) -> bool {
        self.current > 0
    }

    /// `next` and `last` would move.
    pub fn can_go_forward(&self) -> bool {
        self.current < self.last_index()
    }

    /// Each of the moves below returns whether the page changed.
    pub fn first(&mut self) -> bool {
        self.go_to(0)
    }

    pub fn previous(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.go_to(self.current - 1)
    }

    pub fn next(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.go_to(self.current + 1)
    }

    pub fn last(&mut self) -> bool {
        self.go_to(self.last_index())
    }

    /// Jump to `index`, clamped into range.
    pub fn go_to(&mut self, index: usize) -> bool {
        let target = index.min(self.last_index());
        let moved = target != self.current;
        self.current = target;
        moved
    }
}
