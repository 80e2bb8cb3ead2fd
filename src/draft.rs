//! The pending, unsaved input.
//!
//! A [`Draft`] collects text and pasted images until it is committed to a
//! collection. Escape works in two steps: the first press drops the pending
//! images, the next clears the text, and a press on an already clear draft
//! reports that there is nothing left to discard.

use crate::imaging::{ClipboardProvider, ImageBackend};
use crate::store::EntryStore;
use image::DynamicImage;

#[derive(Debug, Clone, Default)]
pub struct Draft {
    text: String,
    images: Vec<DynamicImage>,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn images(&self) -> &[DynamicImage] {
        &self.images
    }

    /// True when a commit would have nothing to save.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.images.is_empty()
    }

    /// Append whatever images the clipboard holds. Returns how many were
    /// added.
    pub fn paste(&mut self, clipboard: &impl ClipboardProvider) -> usize {
        let pasted = clipboard.get_images();
        let count = pasted.len();
        self.images.extend(pasted);
        tracing::debug!("pasted {count} images ({} pending)", self.images.len());
        count
    }

    /// Drop one pending image. Out-of-range indices change nothing.
    pub fn remove_image(&mut self, index: usize) -> Option<DynamicImage> {
        if index < self.images.len() {
            Some(self.images.remove(index))
        } else {
            None
        }
    }

    /// Clear one layer of input: images first, then text.
    ///
    /// Returns `true` only if the draft was already clear, which callers use
    /// as the signal to leave the input screen.
    pub fn escape(&mut self) -> bool {
        if !self.images.is_empty() {
            self.images.clear();
            false
        } else if !self.text.is_empty() {
            self.text.clear();
            false
        } else {
            true
        }
    }

    /// Save the draft to `collection`. On success the draft is cleared; on
    /// failure it is kept so the user can retry.
    pub fn commit<B: ImageBackend>(&mut self, store: &EntryStore<B>, collection: &str) -> bool {
        if !store.save(collection, &self.text, &self.images) {
            return false;
        }
        self.text.clear();
        self.images.clear();
        true
    }
}
