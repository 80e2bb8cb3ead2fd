//! Collections: named directories under the save root.
//!
//! ```text
//! saved/                       # save root
//! ├── Default/                 # default collection (may not exist yet)
//! │   ├── TEXTS.txt
//! │   └── 2024-03-09_14-05-59.png
//! └── recipes/
//!     └── TEXTS.txt
//! ```
//!
//! Names are restricted to ASCII letters, digits, `-`, `_` and space, so a
//! valid name is always a single safe path segment.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CollectionError {
    #[error("collection name is empty")]
    Empty,
    #[error("collection name {0:?} must match [a-zA-Z0-9-_ ]+")]
    InvalidName(String),
}

/// True if every character of `name` is allowed in a collection name.
///
/// The empty string passes this check; [`Collection::parse`] rejects it
/// separately.
pub fn valid_collection_name(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ' '))
}

/// A validated collection name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Collection(String);

impl Collection {
    /// Trim and validate a user-supplied name.
    pub fn parse(raw: &str) -> Result<Self, CollectionError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(CollectionError::Empty);
        }
        if !valid_collection_name(name) {
            return Err(CollectionError::InvalidName(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Collection {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Directory of a collection under `root`.
///
/// Takes the name as a plain path segment; callers that accept user input
/// go through [`Collection::parse`] first.
pub fn collection_dir(root: &Path, collection: &str) -> PathBuf {
    root.join(collection)
}

/// Collection names under `root`, sorted, with `default` first.
///
/// The default is listed even when its directory has not been created. A
/// missing or unreadable root yields just the default.
pub fn list_collections(root: &Path, default: &str) -> Vec<String> {
    let mut names: Vec<String> = match fs::read_dir(root) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_dir())
            .filter_map(|e| e.file_name().into_string().ok())
            .filter(|name| name != default)
            .collect(),
        Err(e) => {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!("cannot list collections in {}: {e}", root.display());
            }
            Vec::new()
        }
    };
    names.sort();
    names.insert(0, default.to_string());
    names
}

/// Create the collection directory (and the root) if missing.
pub fn create_collection(root: &Path, collection: &Collection) -> io::Result<PathBuf> {
    let dir = collection_dir(root, collection.name());
    fs::create_dir_all(&dir)?;
    Ok(dir)
}
