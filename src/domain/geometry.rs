//! Geometric types for the drawing surface and the fit transform

use serde::{Deserialize, Serialize};

/// A point in either surface or original-image coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Midpoint between this point and another
    pub fn midpoint(self, other: Point) -> Point {
        Point {
            x: (self.x + other.x) * 0.5,
            y: (self.y + other.y) * 0.5,
        }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Fixed size of the interactive drawing surface
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Scale and offset mapping a letterboxed on-screen image to its native pixels
///
/// `scale` is always strictly positive; values are only produced by [`FitTransform::fit`]
/// or [`FitTransform::new`], both of which reject non-positive scales.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitTransform {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
}

impl FitTransform {
    /// Build a transform from explicit parts, rejecting a non-positive or non-finite scale
    pub fn new(scale: f32, offset_x: f32, offset_y: f32) -> Option<Self> {
        if !(scale.is_finite() && scale > 0.0 && offset_x.is_finite() && offset_y.is_finite()) {
            return None;
        }
        Some(Self {
            scale,
            offset_x,
            offset_y,
        })
    }

    /// Fit an image of `image_width × image_height` into the surface, preserving
    /// aspect ratio and centering it.
    ///
    /// `padding` is subtracted from each surface dimension before computing the
    /// scale; with zero padding `scale = min(Sw/W, Sh/H)`. Returns `None` for
    /// zero-sized images.
    pub fn fit(
        image_width: u32,
        image_height: u32,
        surface: SurfaceSize,
        padding: f32,
    ) -> Option<Self> {
        if image_width == 0 || image_height == 0 || surface.width == 0 || surface.height == 0 {
            return None;
        }

        let (img_w, img_h) = (image_width as f32, image_height as f32);
        let (surf_w, surf_h) = (surface.width as f32, surface.height as f32);
        let avail_w = (surf_w - padding).max(1.0);
        let avail_h = (surf_h - padding).max(1.0);

        let scale = (avail_w / img_w).min(avail_h / img_h);
        let offset_x = (surf_w - img_w * scale) / 2.0;
        let offset_y = (surf_h - img_h * scale) / 2.0;

        Self::new(scale, offset_x, offset_y)
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn offset_x(&self) -> f32 {
        self.offset_x
    }

    pub fn offset_y(&self) -> f32 {
        self.offset_y
    }

    /// Map a surface point to original-image pixel coordinates
    #[inline]
    pub fn to_original(&self, p: Point) -> Point {
        Point {
            x: (p.x - self.offset_x) / self.scale,
            y: (p.y - self.offset_y) / self.scale,
        }
    }

    /// Map an original-image point back onto the surface
    #[inline]
    pub fn to_surface(&self, p: Point) -> Point {
        Point {
            x: p.x * self.scale + self.offset_x,
            y: p.y * self.scale + self.offset_y,
        }
    }

    /// Convert a surface-space length (e.g. a stroke width) to original pixels
    #[inline]
    pub fn length_to_original(&self, length: f32) -> f32 {
        length / self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_fit_wide_image_is_centered_vertically() {
        let fit = FitTransform::fit(1000, 500, SurfaceSize::new(600, 400), 0.0).unwrap();
        assert!(approx(fit.scale(), 0.6));
        assert!(approx(fit.offset_x(), 0.0));
        assert!(approx(fit.offset_y(), 50.0));
    }

    #[test]
    fn test_fit_tall_image_is_centered_horizontally() {
        let fit = FitTransform::fit(400, 800, SurfaceSize::new(600, 400), 0.0).unwrap();
        assert!(approx(fit.scale(), 0.5));
        assert!(approx(fit.offset_x(), 200.0));
        assert!(approx(fit.offset_y(), 0.0));
    }

    #[test]
    fn test_fit_upscales_small_images() {
        let fit = FitTransform::fit(60, 40, SurfaceSize::new(600, 400), 0.0).unwrap();
        assert!(approx(fit.scale(), 10.0));
        assert!(approx(fit.offset_x(), 0.0));
        assert!(approx(fit.offset_y(), 0.0));
    }

    #[test]
    fn test_fit_with_padding() {
        let fit = FitTransform::fit(1000, 500, SurfaceSize::new(600, 400), 40.0).unwrap();
        // min(560/1000, 360/500)
        assert!(approx(fit.scale(), 0.56));
        assert!(approx(fit.offset_x(), 20.0));
        assert!(approx(fit.offset_y(), 60.0));
    }

    #[test]
    fn test_fit_rejects_zero_dimensions() {
        let surface = SurfaceSize::new(600, 400);
        assert!(FitTransform::fit(0, 500, surface, 0.0).is_none());
        assert!(FitTransform::fit(500, 0, surface, 0.0).is_none());
    }

    #[test]
    fn test_new_rejects_non_positive_scale() {
        assert!(FitTransform::new(0.0, 0.0, 0.0).is_none());
        assert!(FitTransform::new(-1.0, 0.0, 0.0).is_none());
        assert!(FitTransform::new(f32::NAN, 0.0, 0.0).is_none());
    }

    #[test]
    fn test_to_original_matches_manual_transform() {
        let fit = FitTransform::new(0.6, 60.0, 80.0).unwrap();
        let p = fit.to_original(Point::new(100.0, 100.0));
        assert!((p.x - 66.666).abs() < 0.01);
        assert!((p.y - 33.333).abs() < 0.01);
    }

    #[test]
    fn test_to_surface_is_inverse() {
        let fit = FitTransform::fit(1234, 567, SurfaceSize::new(600, 400), 0.0).unwrap();
        for p in [
            Point::new(0.0, 0.0),
            Point::new(17.5, 300.25),
            Point::new(599.0, 399.0),
        ] {
            let back = fit.to_surface(fit.to_original(p));
            assert!(approx(back.x, p.x), "{:?} -> {:?}", p, back);
            assert!(approx(back.y, p.y), "{:?} -> {:?}", p, back);
        }
    }

    #[test]
    fn test_length_to_original() {
        let fit = FitTransform::new(0.5, 0.0, 0.0).unwrap();
        assert!(approx(fit.length_to_original(40.0), 80.0));
    }
}
