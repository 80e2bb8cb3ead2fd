//! Pure calculation functions for image dimensions.

/// Dimensions of a preview whose longer edge is at most `max_size`.
///
/// Aspect ratio is preserved and neither side drops below 1 pixel. Images
/// that already fit are returned unchanged; previews never upscale.
///
/// ```
/// # use note_save::imaging::preview_dimensions;
/// // Landscape: width becomes the bound
/// assert_eq!(preview_dimensions((800, 600), 200), (200, 150));
///
/// // Portrait: height becomes the bound
/// assert_eq!(preview_dimensions((600, 800), 200), (150, 200));
/// ```
pub fn preview_dimensions(original: (u32, u32), max_size: u32) -> (u32, u32) {
    let (w, h) = original;
    let max_size = max_size.max(1);
    let longer = w.max(h);
    if longer <= max_size {
        return (w.max(1), h.max(1));
    }
    let scale = max_size as f64 / longer as f64;
    let scaled = |v: u32| ((v as f64 * scale).round() as u32).clamp(1, max_size);
    if w >= h {
        (max_size, scaled(h))
    } else {
        (scaled(w), max_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_is_bounded_by_width() {
        assert_eq!(preview_dimensions((1000, 500), 200), (200, 100));
    }

    #[test]
    fn portrait_is_bounded_by_height() {
        assert_eq!(preview_dimensions((500, 1000), 200), (100, 200));
    }

    #[test]
    fn square() {
        assert_eq!(preview_dimensions((300, 300), 200), (200, 200));
    }

    #[test]
    fn never_upscales() {
        assert_eq!(preview_dimensions((50, 40), 200), (50, 40));
        assert_eq!(preview_dimensions((200, 10), 200), (200, 10));
    }

    #[test]
    fn thin_strips_keep_one_pixel() {
        assert_eq!(preview_dimensions((10_000, 1), 200), (200, 1));
        assert_eq!(preview_dimensions((1, 10_000), 200), (1, 200));
    }

    #[test]
    fn zero_bound_treated_as_one() {
        assert_eq!(preview_dimensions((10, 5), 0), (1, 1));
    }
}
