//! Shared types used by the write path, the read path, and the layout engine.
//!
//! An [`Entry`] is what one save produces and what one log record parses back
//! into. The loader keeps the raw split of the image-name field, so a
//! text-only entry carries a single empty name; [`Entry::images`] is the
//! filtered view everything downstream should use.

use serde::{Deserialize, Serialize};

/// One saved unit: ordered image names plus free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Image file stems (no extension), in save order. May contain a single
    /// empty token when the record has no images.
    pub image_names: Vec<String>,
    /// Free text, already trimmed at save time. May span several lines.
    pub text: String,
}

impl Entry {
    pub fn new(image_names: Vec<String>, text: impl Into<String>) -> Self {
        Self {
            image_names,
            text: text.into(),
        }
    }

    /// Non-empty image names, in order.
    pub fn images(&self) -> impl Iterator<Item = &str> {
        self.image_names
            .iter()
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }

    pub fn image_count(&self) -> usize {
        self.images().count()
    }

    /// Layout width in grid units: one per image, at least one.
    pub fn span(&self) -> usize {
        self.image_count().max(1)
    }

    /// True when the entry carries neither images nor text.
    pub fn is_blank(&self) -> bool {
        self.image_count() == 0 && self.text.is_empty()
    }
}
