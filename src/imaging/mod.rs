//! Image handling: pure Rust, on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (format sniffed from content) |
//! | **Save** | PNG via `DynamicImage::write_to` |
//! | **Preview** | `resize_exact` with Lanczos3, longer edge bounded |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Clipboard**: [`ClipboardProvider`] trait + [`FileListClipboard`]

pub mod backend;
mod calculations;
pub mod clipboard;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::preview_dimensions;
pub use clipboard::{ClipboardProvider, FileListClipboard};
pub use rust_backend::RustBackend;
