//! Entry store: the write path.
//!
//! A save turns `(text, images)` into files inside the collection directory:
//!
//! ```text
//! saved/<collection>/
//! ├── TEXTS.txt                  # one record appended per save
//! ├── 2024-03-09_14-05-59.png    # images, named by save time
//! └── 2024-03-09_14-05-59_1.png  # same-second collision
//! ```
//!
//! ## Ordering and failure
//!
//! Images are named and written one at a time, in order, before the record
//! is appended. The first failing image write aborts the save: no record is
//! appended, so the log never references an image that was not written.
//! Images already written by the same call stay on disk as orphans; they are
//! not cleaned up.
//!
//! ## Error surface
//!
//! [`EntryStore::try_save`] reports what went wrong as a [`StoreError`].
//! [`EntryStore::save`] is the boolean form the rest of the application uses:
//! errors are logged and collapsed to `false`.

use crate::collection::collection_dir;
use crate::format::{LOG_FILE_NAME, encode_record};
use crate::imaging::{BackendError, ImageBackend, RustBackend};
use crate::naming::{image_file_name, next_free_name, timestamp_stem};
use crate::types::Entry;
use chrono::{Local, NaiveDateTime};
use image::DynamicImage;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("nothing to save")]
    NothingToSave,
    #[error("no free image name for {0} in {1}")]
    NameExhausted(String, PathBuf),
    #[error("cannot save image {0}: {1}")]
    Image(PathBuf, #[source] BackendError),
    #[error("cannot save text to {0}: {1}")]
    Text(PathBuf, #[source] std::io::Error),
}

/// Result of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedEntry {
    /// The entry as it now reads back from the log.
    pub entry: Entry,
    /// Full paths of the written images, in order.
    pub image_paths: Vec<PathBuf>,
}

/// Writes entries under a save root.
pub struct EntryStore<B: ImageBackend = RustBackend> {
    root: PathBuf,
    backend: B,
}

impl EntryStore<RustBackend> {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_backend(root, RustBackend::new())
    }
}

impl<B: ImageBackend> EntryStore<B> {
    pub fn with_backend(root: impl Into<PathBuf>, backend: B) -> Self {
        Self {
            root: root.into(),
            backend,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Save an entry, returning `true` only if every write succeeded.
    ///
    /// Empty input (blank text and no images) writes nothing and returns
    /// `false`.
    pub fn save(&self, collection: &str, text: &str, images: &[DynamicImage]) -> bool {
        match self.try_save(collection, text, images) {
            Ok(saved) => {
                tracing::info!(
                    "saved entry to {collection} ({} images)",
                    saved.image_paths.len()
                );
                true
            }
            Err(StoreError::NothingToSave) => {
                tracing::debug!("nothing to save in {collection}");
                false
            }
            Err(e) => {
                tracing::warn!("{e}");
                false
            }
        }
    }

    /// Save an entry stamped with the current local time.
    pub fn try_save(
        &self,
        collection: &str,
        text: &str,
        images: &[DynamicImage],
    ) -> Result<SavedEntry, StoreError> {
        self.try_save_at(collection, text, images, Local::now().naive_local())
    }

    /// Save an entry whose images are named after `at`.
    pub fn try_save_at(
        &self,
        collection: &str,
        text: &str,
        images: &[DynamicImage],
        at: NaiveDateTime,
    ) -> Result<SavedEntry, StoreError> {
        let text = text.trim();
        if text.is_empty() && images.is_empty() {
            return Err(StoreError::NothingToSave);
        }

        let dir = collection_dir(&self.root, collection);
        if let Err(e) = fs::create_dir_all(&dir) {
            // The writes below report the failure that matters.
            tracing::warn!("cannot create {}: {e}", dir.display());
        }

        let stem = timestamp_stem(at);
        let mut image_names = Vec::with_capacity(images.len());
        let mut image_paths = Vec::with_capacity(images.len());
        for image in images {
            let name = next_free_name(&dir, &stem)
                .ok_or_else(|| StoreError::NameExhausted(stem.clone(), dir.clone()))?;
            let path = dir.join(image_file_name(&name));
            self.backend
                .write_png(image, &path)
                .map_err(|e| StoreError::Image(path.clone(), e))?;
            tracing::debug!("wrote {}", path.display());
            image_names.push(name);
            image_paths.push(path);
        }

        let log_path = dir.join(LOG_FILE_NAME);
        append_text(&log_path, &encode_record(&image_names, text))
            .map_err(|e| StoreError::Text(log_path, e))?;

        Ok(SavedEntry {
            entry: stored_entry(image_names, text),
            image_paths,
        })
    }
}

/// The entry exactly as the loader will parse it back.
fn stored_entry(image_names: Vec<String>, text: &str) -> Entry {
    let image_names = if image_names.is_empty() {
        vec![String::new()]
    } else {
        image_names
    };
    Entry::new(image_names, text)
}

/// Append to a file, creating it if absent but never its directory.
fn append_text(path: &Path, text: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(text.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::ENTRY_MARKER;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::test_helpers::{at, list_files, test_image};
    use tempfile::TempDir;

    fn mock_store(tmp: &TempDir) -> EntryStore<MockBackend> {
        EntryStore::with_backend(tmp.path().join("saved"), MockBackend::new())
    }

    fn read_log(store: &EntryStore<impl ImageBackend>, collection: &str) -> String {
        fs::read_to_string(store.root().join(collection).join(LOG_FILE_NAME)).unwrap()
    }

    #[test]
    fn nothing_to_save_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let store = mock_store(&tmp);

        assert!(!store.save("Default", "", &[]));
        assert!(!store.save("Default", "  \n\t ", &[]));

        assert!(!store.root().exists());
        assert!(store.backend().get_operations().is_empty());
    }

    #[test]
    fn try_save_reports_nothing_to_save() {
        let tmp = TempDir::new().unwrap();
        let result = mock_store(&tmp).try_save("Default", " ", &[]);
        assert!(matches!(result, Err(StoreError::NothingToSave)));
    }

    #[test]
    fn text_only_record_is_trimmed() {
        let tmp = TempDir::new().unwrap();
        let store = mock_store(&tmp);

        let saved = store
            .try_save_at("Default", "  hello\nworld \n", &[], at(12, 0, 0))
            .unwrap();

        assert_eq!(read_log(&store, "Default"), format!("{ENTRY_MARKER}\nhello\nworld\n"));
        assert_eq!(saved.entry.text, "hello\nworld");
        assert_eq!(saved.entry.image_names, vec![String::new()]);
        assert!(saved.image_paths.is_empty());
    }

    #[test]
    fn creates_collection_directory() {
        let tmp = TempDir::new().unwrap();
        let store = mock_store(&tmp);
        assert!(store.save("new one", "x", &[]));
        assert!(store.root().join("new one").is_dir());
    }

    #[test]
    fn one_save_shares_one_timestamp() {
        let tmp = TempDir::new().unwrap();
        let store = mock_store(&tmp);
        let images = vec![test_image(2, 2); 4];

        let saved = store
            .try_save_at("Default", "", &images, at(23, 59, 59))
            .unwrap();

        assert!(
            saved
                .entry
                .image_names
                .iter()
                .all(|name| name.starts_with("2024-03-09_23-59-59"))
        );
    }

    #[test]
    fn images_named_by_timestamp_with_suffixes() {
        let tmp = TempDir::new().unwrap();
        let store = mock_store(&tmp);
        let images = vec![test_image(2, 2), test_image(2, 2), test_image(2, 2)];

        let saved = store
            .try_save_at("Default", "", &images, at(9, 8, 7))
            .unwrap();

        assert_eq!(
            saved.entry.image_names,
            vec![
                "2024-03-09_09-08-07",
                "2024-03-09_09-08-07_1",
                "2024-03-09_09-08-07_2",
            ]
        );
        assert_eq!(
            read_log(&store, "Default"),
            format!(
                "{ENTRY_MARKER}2024-03-09_09-08-07, 2024-03-09_09-08-07_1, 2024-03-09_09-08-07_2\n"
            )
        );
    }

    #[test]
    fn same_second_batches_never_collide() {
        let tmp = TempDir::new().unwrap();
        let store = mock_store(&tmp);
        let stamp = at(10, 0, 0);

        let first = store
            .try_save_at("Default", "a", &[test_image(1, 1)], stamp)
            .unwrap();
        let second = store
            .try_save_at("Default", "b", &[test_image(1, 1), test_image(1, 1)], stamp)
            .unwrap();

        assert_eq!(first.entry.image_names, vec!["2024-03-09_10-00-00"]);
        assert_eq!(
            second.entry.image_names,
            vec!["2024-03-09_10-00-00_1", "2024-03-09_10-00-00_2"]
        );
        assert_eq!(list_files(&store.root().join("Default")).len(), 4);
    }

    #[test]
    fn failed_image_write_aborts_without_record() {
        let tmp = TempDir::new().unwrap();
        let store = EntryStore::with_backend(tmp.path().join("saved"), MockBackend::failing_after(1));
        let images = vec![test_image(1, 1), test_image(1, 1)];

        let result = store.try_save_at("Default", "text", &images, at(1, 2, 3));

        assert!(matches!(result, Err(StoreError::Image(_, _))));
        // First image stays behind, the log was never written
        let dir = store.root().join("Default");
        assert_eq!(list_files(&dir), vec!["2024-03-09_01-02-03.png"]);
        assert!(!dir.join(LOG_FILE_NAME).exists());
    }

    #[test]
    fn save_returns_false_on_image_failure() {
        let tmp = TempDir::new().unwrap();
        let store = EntryStore::with_backend(tmp.path().join("saved"), MockBackend::failing_after(0));
        assert!(!store.save("Default", "text", &[test_image(1, 1)]));
    }

    #[test]
    fn failed_text_append_keeps_images() {
        let tmp = TempDir::new().unwrap();
        let store = mock_store(&tmp);
        let dir = store.root().join("Default");
        fs::create_dir_all(dir.join(LOG_FILE_NAME)).unwrap();

        let result = store.try_save_at("Default", "x", &[test_image(1, 1)], at(0, 0, 0));

        assert!(matches!(result, Err(StoreError::Text(_, _))));
        assert!(dir.join("2024-03-09_00-00-00.png").exists());
    }

    #[test]
    fn records_are_appended_in_save_order() {
        let tmp = TempDir::new().unwrap();
        let store = mock_store(&tmp);
        assert!(store.save("Default", "one", &[]));
        assert!(store.save("Default", "two", &[]));

        assert_eq!(
            read_log(&store, "Default"),
            format!("{ENTRY_MARKER}\none\n{ENTRY_MARKER}\ntwo\n")
        );
    }

    #[test]
    fn writes_one_png_per_image() {
        let tmp = TempDir::new().unwrap();
        let store = mock_store(&tmp);
        store
            .try_save_at("c", "", &[test_image(1, 1), test_image(1, 1)], at(5, 5, 5))
            .unwrap();

        let ops = store.backend().get_operations();
        assert_eq!(ops.len(), 2);
        assert!(ops.iter().all(|op| matches!(op, RecordedOp::WritePng(p) if p.ends_with(".png"))));
    }
}
