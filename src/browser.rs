//! Browse state: which collection, in which order, on which page.
//!
//! A [`Browser`] owns the entries of one collection and a [`Pager`] over
//! their layout. Anything that can change the entries or their order goes
//! through [`Browser::refresh`], which reloads the log, applies the browse
//! order, lays the entries out again and clamps the current page.
//!
//! | Event | Page afterwards |
//! |---|---|
//! | `refresh` | kept, clamped to the new page count |
//! | `set_collection` | kept, clamped |
//! | `toggle_reverse` | kept, clamped |
//! | `after_save` | kept, clamped |

use crate::config::LayoutConfig;
use crate::layout::{Layout, Page, Pager, paginate};
use crate::load::load;
use crate::types::Entry;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Browser {
    root: PathBuf,
    collection: String,
    most_recent_first: bool,
    items_per_row: usize,
    rows_per_page: usize,
    entries: Vec<Entry>,
    pager: Pager,
}

impl Browser {
    /// Open `collection` under `root` and load it.
    pub fn new(root: impl Into<PathBuf>, collection: impl Into<String>, layout: &LayoutConfig) -> Self {
        let mut browser = Self {
            root: root.into(),
            collection: collection.into(),
            most_recent_first: layout.most_recent_first,
            items_per_row: layout.items_per_row,
            rows_per_page: layout.rows_per_page,
            entries: Vec::new(),
            pager: Pager::default(),
        };
        browser.refresh();
        browser
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn most_recent_first(&self) -> bool {
        self.most_recent_first
    }

    /// Entries in browse order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Reload the collection and re-lay it out.
    pub fn refresh(&mut self) {
        self.entries = load(&self.root, &self.collection);
        if self.most_recent_first {
            self.entries.reverse();
        }
        let page_count = self.layout().page_count();
        self.pager.set_page_count(page_count);
        tracing::debug!(
            "{}: {} entries on {page_count} pages",
            self.collection,
            self.entries.len()
        );
    }

    /// Switch to another collection. The page index carries over.
    pub fn set_collection(&mut self, collection: impl Into<String>) {
        self.collection = collection.into();
        self.refresh();
    }

    pub fn toggle_reverse(&mut self) {
        self.most_recent_first = !self.most_recent_first;
        self.refresh();
    }

    /// Reload after a save. The page index carries over.
    pub fn after_save(&mut self) {
        self.refresh();
    }

    /// The full layout of the loaded entries.
    pub fn layout(&self) -> Layout<'_> {
        paginate(&self.entries, self.items_per_row, self.rows_per_page)
    }

    /// The page currently shown.
    pub fn current_page(&self) -> Page<'_> {
        self.layout()
            .pages
            .into_iter()
            .nth(self.pager.current())
            .unwrap_or_default()
    }

    /// Zero-based index of the current page.
    pub fn page_index(&self) -> usize {
        self.pager.current()
    }

    pub fn page_count(&self) -> usize {
        self.pager.page_count()
    }

    pub fn can_go_back(&self) -> bool {
        self.pager.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.pager.can_go_forward()
    }

    pub fn first(&mut self) -> bool {
        self.pager.first()
    }

    pub fn previous(&mut self) -> bool {
        self.pager.previous()
    }

    pub fn next(&mut self) -> bool {
        self.pager.next()
    }

    pub fn last(&mut self) -> bool {
        self.pager.last()
    }

    pub fn go_to(&mut self, index: usize) -> bool {
        self.pager.go_to(index)
    }
}
