//! Pure Rust image backend on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP, BMP, GIF) | `image::ImageReader` with format sniffing |
//! | Encode → PNG | `DynamicImage::write_to` with `ImageFormat::Png` |
//! | Preview | `DynamicImage::resize_exact` with `Lanczos3` |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::preview_dimensions;
use image::imageops::FilterType;
use image::{DynamicImage, ImageError, ImageFormat, ImageReader};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

/// Pure Rust backend using the `image` crate ecosystem.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn io_or(err: ImageError, wrap: impl FnOnce(String) -> BackendError) -> BackendError {
    match err {
        ImageError::IoError(e) => BackendError::Io(e),
        other => wrap(other.to_string()),
    }
}

/// PNG has no float pixel types; those are narrowed to 8-bit RGBA.
fn png_compatible(image: &DynamicImage) -> Cow<'_, DynamicImage> {
    match image {
        DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => {
            Cow::Owned(DynamicImage::ImageRgba8(image.to_rgba8()))
        }
        _ => Cow::Borrowed(image),
    }
}

/// Encode `image` as PNG into `sink`. The buffer is flushed before
/// returning, so a short write is an error rather than a truncated file.
fn encode_png<W: Write + Seek>(image: &DynamicImage, sink: W, path: &Path) -> Result<(), BackendError> {
    let mut writer = BufWriter::new(sink);
    png_compatible(image)
        .write_to(&mut writer, ImageFormat::Png)
        .map_err(|e| io_or(e, |msg| BackendError::Encode(format!("{}: {msg}", path.display()))))?;
    writer.into_inner().map_err(|e| BackendError::Io(e.into_error()))?;
    Ok(())
}

impl ImageBackend for RustBackend {
    fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| io_or(e, |msg| BackendError::Decode(format!("{}: {msg}", path.display()))))
    }

    fn write_png(&self, image: &DynamicImage, path: &Path) -> Result<(), BackendError> {
        encode_png(image, File::create(path)?, path)
    }

    fn preview(
        &self,
        source: &Path,
        output: &Path,
        max_size: u32,
    ) -> Result<Dimensions, BackendError> {
        let img = self.decode(source)?;
        let (width, height) = preview_dimensions((img.width(), img.height()), max_size);
        let resized = if (width, height) == (img.width(), img.height()) {
            img
        } else {
            img.resize_exact(width, height, FilterType::Lanczos3)
        };
        self.write_png(&resized, output)?;
        Ok(Dimensions { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{create_test_png, test_image};

    #[test]
    fn write_png_then_decode() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out.png");
        let backend = RustBackend::new();

        backend.write_png(&test_image(40, 30), &path).unwrap();
        let decoded = backend.decode(&path).unwrap();

        assert_eq!((decoded.width(), decoded.height()), (40, 30));
    }

    #[test]
    fn write_png_float_image() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("float.png");
        let img = DynamicImage::ImageRgb32F(image::Rgb32FImage::new(3, 3));

        RustBackend::new().write_png(&img, &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn write_png_into_missing_dir_is_io_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("missing/out.png");
        let result = RustBackend::new().write_png(&test_image(2, 2), &path);
        assert!(matches!(result, Err(BackendError::Io(_))));
    }

    /// Accepts seeks but fails every write, like a full disk.
    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("no space left on device"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Seek for FullDisk {
        fn seek(&mut self, _: std::io::SeekFrom) -> std::io::Result<u64> {
            Ok(0)
        }
    }

    #[test]
    fn buffered_write_failure_is_reported() {
        let result = encode_png(&test_image(4, 4), FullDisk, Path::new("full.png"));
        assert!(matches!(
            result,
            Err(BackendError::Io(_) | BackendError::Encode(_))
        ));
    }

    #[test]
    fn decode_nonexistent_file_errors() {
        let result = RustBackend::new().decode(Path::new("/nonexistent/image.png"));
        assert!(result.is_err());
    }

    #[test]
    fn decode_garbage_is_decode_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("junk.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        let result = RustBackend::new().decode(&path);
        assert!(matches!(result, Err(BackendError::Decode(_))));
    }

    #[test]
    fn preview_scales_longer_edge() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.png");
        create_test_png(&source, 400, 100);

        let output = tmp.path().join("thumb.png");
        let dims = RustBackend::new().preview(&source, &output, 200).unwrap();

        assert_eq!(dims, Dimensions { width: 200, height: 50 });
        let decoded = RustBackend::new().decode(&output).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (200, 50));
    }

    #[test]
    fn preview_keeps_small_images() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("small.png");
        create_test_png(&source, 20, 10);

        let output = tmp.path().join("thumb.png");
        let dims = RustBackend::new().preview(&source, &output, 200).unwrap();
        assert_eq!(dims, Dimensions { width: 20, height: 10 });
    }
}
