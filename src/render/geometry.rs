//! Shared constants and conversions for stroke rendering
//!
//! Used by both the surface preview and the native-resolution mask.

use image::{Rgba, RgbaImage};
use tiny_skia::{ColorU8, Pixmap};

/// Color of mask strokes regardless of the brush color used on screen
pub const MASK_STROKE_RGBA: [u8; 4] = [255, 255, 255, 255];

/// Color of the overlay dimming unmasked regions (alpha comes from config)
pub const OVERLAY_RGB: [u8; 3] = [0, 0, 0];

/// Copy straight-alpha RGBA pixels into a premultiplied pixmap
///
/// Returns `None` for zero-sized images.
pub fn pixmap_from_rgba(img: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(img.width(), img.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(img.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

/// Copy a premultiplied pixmap back into straight-alpha RGBA pixels
pub fn rgba_from_pixmap(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    img
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixmap_conversion_preserves_opaque_pixels() {
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(2, 1, Rgba([12, 34, 56, 255]));

        let pixmap = pixmap_from_rgba(&img).unwrap();
        assert_eq!(rgba_from_pixmap(&pixmap), img);
    }

    #[test]
    fn test_pixmap_conversion_keeps_transparency() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0]));
        let pixmap = pixmap_from_rgba(&img).unwrap();
        assert_eq!(rgba_from_pixmap(&pixmap).get_pixel(1, 1)[3], 0);
    }

    #[test]
    fn test_pixmap_from_empty_image() {
        assert!(pixmap_from_rgba(&RgbaImage::new(0, 4)).is_none());
    }
}
