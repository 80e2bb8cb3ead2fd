//! Image backend trait and shared types.
//!
//! The [`ImageBackend`] trait covers the three pixel operations the crate
//! needs: decode a file, write a bitmap as PNG, and write a downscaled
//! preview. The store, the clipboard provider and the export stage are all
//! generic over it, so tests can swap in a recording (or failing) mock.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend).

use image::DynamicImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {0}")]
    Decode(String),
    #[error("Failed to encode {0}")]
    Encode(String),
}

/// Width and height of an image in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image backends.
pub trait ImageBackend: Sync {
    /// Decode an image file of any supported input format.
    fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError>;

    /// Write `image` to `path` as PNG.
    fn write_png(&self, image: &DynamicImage, path: &Path) -> Result<(), BackendError>;

    /// Write a PNG preview of `source` whose longer edge is at most
    /// `max_size`. Returns the preview dimensions.
    fn preview(
        &self,
        source: &Path,
        output: &Path,
        max_size: u32,
    ) -> Result<Dimensions, BackendError>;
}
