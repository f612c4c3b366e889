//! Image rendering for strokes using tiny-skia
//!
//! The mask is produced at the original image's native resolution: strokes
//! captured on the letterboxed surface are mapped through the fit transform
//! before they are rasterized, so the white regions line up pixel-for-pixel
//! with the drawn regions on the original.

use image::RgbaImage;
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Rect, Transform};

use super::geometry::{self, MASK_STROKE_RGBA, OVERLAY_RGB};
use crate::domain::{FitTransform, PathCommand, Stroke};
use crate::error::{MaskError, Result};

/// Build a tiny-skia path from stroke commands
fn build_stroke_path(commands: &[PathCommand]) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();

    for command in commands {
        match *command {
            PathCommand::MoveTo { x, y } => pb.move_to(x, y),
            PathCommand::LineTo { x, y } => pb.line_to(x, y),
            PathCommand::QuadCurveTo { cx, cy, x, y } => pb.quad_to(cx, cy, x, y),
        }
    }

    pb.finish()
}

/// Draw one stroke with round caps and joins
///
/// A dot (every command on the same point) is filled as a disc of diameter
/// `stroke.width`, the shape a round-capped zero-length line would have.
pub fn draw_stroke(pixmap: &mut Pixmap, stroke: &Stroke, rgba: [u8; 4]) {
    if !(stroke.width.is_finite() && stroke.width > 0.0) {
        return;
    }

    let [r, g, b, a] = rgba;
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;

    if stroke.is_dot() {
        if let Some(center) = stroke.start()
            && let Some(path) = PathBuilder::from_circle(center.x, center.y, stroke.width / 2.0)
        {
            pixmap.fill_path(
                &path,
                &paint,
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
        return;
    }

    let Some(path) = build_stroke_path(&stroke.commands) else {
        return;
    };

    let line = tiny_skia::Stroke {
        width: stroke.width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    };
    pixmap.stroke_path(&path, &paint, &line, Transform::identity(), None);
}

/// Map a surface-space stroke into original-image pixels
pub fn stroke_to_original(stroke: &Stroke, fit: &FitTransform) -> Stroke {
    stroke.transformed(|p| fit.to_original(p), fit.length_to_original(stroke.width))
}

/// Rasterize the mask at the original image's resolution
///
/// The original is drawn 1:1 at (0,0), dimmed by a black overlay of
/// `overlay_alpha`, then every stroke is replayed through `fit` in opaque white.
pub fn rasterize_mask(
    original: &RgbaImage,
    strokes: &[Stroke],
    fit: &FitTransform,
    overlay_alpha: f32,
) -> Result<RgbaImage> {
    let mut pixmap = geometry::pixmap_from_rgba(original).ok_or(MaskError::EmptyImage)?;

    let [r, g, b] = OVERLAY_RGB;
    let alpha = (overlay_alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    let mut overlay = Paint::default();
    overlay.set_color_rgba8(r, g, b, alpha);
    let (width, height) = (original.width() as f32, original.height() as f32);
    if let Some(rect) = Rect::from_xywh(0.0, 0.0, width, height) {
        pixmap.fill_rect(rect, &overlay, Transform::identity(), None);
    }

    for stroke in strokes {
        draw_stroke(&mut pixmap, &stroke_to_original(stroke, fit), MASK_STROKE_RGBA);
    }

    log::debug!(
        "Mask rasterized: {}x{} with {} strokes",
        pixmap.width(),
        pixmap.height(),
        strokes.len()
    );

    Ok(geometry::rgba_from_pixmap(&pixmap))
}

/// Overlay the mask onto a fresh copy of the original at (0,0)
pub fn compose_export(original: &RgbaImage, mask: &RgbaImage) -> RgbaImage {
    let mut combined = original.clone();
    image::imageops::overlay(&mut combined, mask, 0, 0);
    combined
}

/// Place the original and the mask side by side (original on the left)
pub fn compose_pair(original: &RgbaImage, mask: &RgbaImage) -> RgbaImage {
    let width = original.width() + mask.width();
    let height = original.height().max(mask.height());

    let mut pair = RgbaImage::new(width, height);
    image::imageops::replace(&mut pair, original, 0, 0);
    image::imageops::replace(&mut pair, mask, i64::from(original.width()), 0);
    pair
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BrushColor;
    use crate::domain::{Point, SurfaceSize};
    use image::Rgba;

    const BASE: Rgba<u8> = Rgba([200, 100, 50, 255]);

    fn is_white(px: &Rgba<u8>) -> bool {
        px[0] == 255 && px[1] == 255 && px[2] == 255 && px[3] == 255
    }

    fn is_dimmed(px: &Rgba<u8>) -> bool {
        // 50% black over (200, 100, 50)
        px[3] == 255
            && (px[0] as i32 - 100).abs() <= 2
            && (px[1] as i32 - 50).abs() <= 2
            && (px[2] as i32 - 25).abs() <= 2
    }

    fn line(from: Point, to: Point, width: f32) -> Stroke {
        Stroke::from_points(&[from, to], width, BrushColor::RED).unwrap()
    }

    #[test]
    fn test_mask_matches_original_size() {
        let original = RgbaImage::from_pixel(1000, 500, BASE);
        let fit = FitTransform::fit(1000, 500, SurfaceSize::new(600, 400), 0.0).unwrap();

        let mask = rasterize_mask(&original, &[], &fit, 0.5).unwrap();
        assert_eq!(mask.dimensions(), (1000, 500));
        assert!(is_dimmed(mask.get_pixel(0, 0)));
        assert!(is_dimmed(mask.get_pixel(999, 499)));
    }

    #[test]
    fn test_zero_overlay_alpha_keeps_original() {
        let original = RgbaImage::from_pixel(10, 10, BASE);
        let fit = FitTransform::new(1.0, 0.0, 0.0).unwrap();

        let mask = rasterize_mask(&original, &[], &fit, 0.0).unwrap();
        assert_eq!(mask.get_pixel(5, 5), &BASE);
    }

    #[test]
    fn test_dot_lands_at_original_coordinates() {
        let original = RgbaImage::from_pixel(1000, 500, BASE);
        let fit = FitTransform::new(0.6, 60.0, 80.0).unwrap();
        let dot =
            Stroke::from_points(&[Point::new(100.0, 100.0)], 20.0, BrushColor::WHITE).unwrap();

        let mask = rasterize_mask(&original, &[dot], &fit, 0.5).unwrap();
        // (100 - 60) / 0.6, (100 - 80) / 0.6
        assert!(is_white(mask.get_pixel(67, 33)));
        assert!(is_white(mask.get_pixel(66, 34)));
        assert!(is_dimmed(mask.get_pixel(900, 450)));
        // radius is 10 / 0.6 ≈ 16.7 original pixels
        assert!(is_white(mask.get_pixel(66 + 14, 33)));
        assert!(is_dimmed(mask.get_pixel(66 + 20, 33)));
    }

    #[test]
    fn test_brush_width_scales_with_fit() {
        // 1200x800 into 600x400 gives scale 0.5 and no letterbox
        let original = RgbaImage::from_pixel(1200, 800, BASE);
        let fit = FitTransform::fit(1200, 800, SurfaceSize::new(600, 400), 0.0).unwrap();
        let stroke = line(Point::new(100.0, 200.0), Point::new(200.0, 200.0), 40.0);

        let mask = rasterize_mask(&original, &[stroke], &fit, 0.5).unwrap();
        // Width 80 centered on y = 400 covers 360..440
        assert!(is_white(mask.get_pixel(300, 362)));
        assert!(is_white(mask.get_pixel(300, 400)));
        assert!(is_white(mask.get_pixel(300, 437)));
        assert!(is_dimmed(mask.get_pixel(300, 355)));
        assert!(is_dimmed(mask.get_pixel(300, 445)));
    }

    #[test]
    fn test_line_endpoints_follow_transform() {
        let original = RgbaImage::from_pixel(1000, 500, BASE);
        let fit = FitTransform::fit(1000, 500, SurfaceSize::new(600, 400), 0.0).unwrap();
        let a = Point::new(60.0, 110.0);
        let b = Point::new(300.0, 110.0);
        let stroke = line(a, b, 2.0);

        let mask = rasterize_mask(&original, &[stroke], &fit, 0.5).unwrap();
        let oa = fit.to_original(a);
        let ob = fit.to_original(b);
        // Width 2 / 0.6 ≈ 3.3 px with round caps reaching ~1.7 px past each end
        let y = oa.y.round() as u32;
        assert!(is_white(mask.get_pixel(oa.x.round() as u32, y)));
        assert!(is_white(mask.get_pixel(ob.x.round() as u32 - 1, y)));
        assert!(is_dimmed(mask.get_pixel(oa.x as u32 - 4, y)));
        assert!(is_dimmed(mask.get_pixel(ob.x as u32 + 4, y)));
    }

    #[test]
    fn test_mask_strokes_are_white_regardless_of_brush_color() {
        let original = RgbaImage::from_pixel(100, 100, BASE);
        let fit = FitTransform::new(1.0, 0.0, 0.0).unwrap();
        let stroke = line(Point::new(10.0, 50.0), Point::new(90.0, 50.0), 10.0);
        assert_eq!(stroke.color, BrushColor::RED);

        let mask = rasterize_mask(&original, &[stroke], &fit, 0.5).unwrap();
        assert!(is_white(mask.get_pixel(50, 50)));
    }

    #[test]
    fn test_compose_export_matches_original_size() {
        let original = RgbaImage::from_pixel(20, 10, BASE);
        let mask = RgbaImage::from_pixel(20, 10, Rgba([255, 255, 255, 255]));

        let combined = compose_export(&original, &mask);
        assert_eq!(combined.dimensions(), (20, 10));
        assert!(is_white(combined.get_pixel(3, 3)));
    }

    #[test]
    fn test_compose_export_blends_translucent_mask() {
        let original = RgbaImage::from_pixel(4, 4, BASE);
        let mask = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0]));

        let combined = compose_export(&original, &mask);
        assert_eq!(combined.get_pixel(1, 1), &BASE);
    }

    #[test]
    fn test_compose_pair_places_mask_on_the_right() {
        let original = RgbaImage::from_pixel(5, 4, BASE);
        let mask = RgbaImage::from_pixel(5, 4, Rgba([255, 255, 255, 255]));

        let pair = compose_pair(&original, &mask);
        assert_eq!(pair.dimensions(), (10, 4));
        assert_eq!(pair.get_pixel(4, 0), &BASE);
        assert!(is_white(pair.get_pixel(5, 0)));
    }
}
