//! Clipboard image providers.
//!
//! A paste asks a [`ClipboardProvider`] for whatever images it currently
//! holds. How a provider talks to the OS clipboard is its own business; the
//! crate ships [`FileListClipboard`], which covers the "copied files in a file
//! manager" case: a list of paths, each decoded on request.

use super::backend::{BackendError, ImageBackend};
use super::rust_backend::RustBackend;
use image::DynamicImage;
use std::path::PathBuf;

/// Source of pasted images.
pub trait ClipboardProvider {
    /// Images currently on the clipboard, in order. Empty when there are none
    /// or the clipboard cannot be read.
    fn get_images(&self) -> Vec<DynamicImage>;
}

/// Clipboard holding a list of file paths.
///
/// Paths that are missing or do not decode as images are skipped.
pub struct FileListClipboard<B: ImageBackend = RustBackend> {
    backend: B,
    paths: Vec<PathBuf>,
}

impl FileListClipboard<RustBackend> {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self::with_backend(RustBackend::new(), paths)
    }
}

impl<B: ImageBackend> FileListClipboard<B> {
    pub fn with_backend(backend: B, paths: Vec<PathBuf>) -> Self {
        Self { backend, paths }
    }

    /// Decode every path, failing on the first that does not decode.
    ///
    /// For paths the user named explicitly, where dropping one silently
    /// would save an incomplete entry.
    pub fn decode_all(&self) -> Result<Vec<DynamicImage>, BackendError> {
        self.paths
            .iter()
            .map(|path| self.backend.decode(path))
            .collect()
    }
}

impl<B: ImageBackend> ClipboardProvider for FileListClipboard<B> {
    fn get_images(&self) -> Vec<DynamicImage> {
        self.paths
            .iter()
            .filter_map(|path| match self.backend.decode(path) {
                Ok(img) => Some(img),
                Err(e) => {
                    tracing::warn!("skipping {}: {e}", path.display());
                    None
                }
            })
            .collect()
    }
}

/// Provider with a fixed set of images; used by callers that already hold
/// decoded bitmaps.
impl ClipboardProvider for Vec<DynamicImage> {
    fn get_images(&self) -> Vec<DynamicImage> {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::test_helpers::create_test_png;

    #[test]
    fn decodes_listed_files_in_order() {
        let tmp = tempfile::TempDir::new().unwrap();
        let a = tmp.path().join("a.png");
        let b = tmp.path().join("b.png");
        create_test_png(&a, 10, 20);
        create_test_png(&b, 30, 5);

        let images = FileListClipboard::new(vec![a, b]).get_images();

        let sizes: Vec<(u32, u32)> = images.iter().map(|i| (i.width(), i.height())).collect();
        assert_eq!(sizes, vec![(10, 20), (30, 5)]);
    }

    #[test]
    fn skips_missing_and_undecodable() {
        let tmp = tempfile::TempDir::new().unwrap();
        let good = tmp.path().join("good.png");
        let junk = tmp.path().join("notes.txt");
        create_test_png(&good, 4, 4);
        std::fs::write(&junk, "plain text").unwrap();

        let images =
            FileListClipboard::new(vec![tmp.path().join("gone.png"), junk, good]).get_images();
        assert_eq!(images.len(), 1);
    }

    #[test]
    fn asks_backend_for_every_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        let a = tmp.path().join("a.png");
        std::fs::write(&a, b"").unwrap();

        let clipboard =
            FileListClipboard::with_backend(MockBackend::new(), vec![a, tmp.path().join("b.png")]);
        let images = clipboard.get_images();

        assert_eq!(images.len(), 1);
        let ops = clipboard.backend.get_operations();
        assert_eq!(ops.len(), 2);
        assert!(ops.iter().all(|op| matches!(op, RecordedOp::Decode(_))));
    }

    #[test]
    fn decode_all_fails_on_bad_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        let good = tmp.path().join("good.png");
        create_test_png(&good, 4, 4);

        let clipboard = FileListClipboard::new(vec![good.clone(), tmp.path().join("typo.png")]);
        assert!(clipboard.decode_all().is_err());

        let images = FileListClipboard::new(vec![good]).decode_all().unwrap();
        assert_eq!(images.len(), 1);
    }

    #[test]
    fn empty_list_yields_nothing() {
        assert!(FileListClipboard::new(Vec::new()).get_images().is_empty());
    }
}
