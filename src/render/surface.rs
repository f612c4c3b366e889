//! Preview rendering of the drawing surface
//!
//! Draws what the user sees: the letterbox background, the image scaled
//! through the fit transform, and every stroke in its own brush color.

use image::RgbaImage;
use tiny_skia::{Color, FilterQuality, Pixmap, PixmapPaint, Transform};

use super::geometry;
use super::image::draw_stroke;
use crate::config::BrushColor;
use crate::domain::{FitTransform, Stroke, SurfaceSize};
use crate::error::{MaskError, Result};

/// Render the surface at its own resolution
///
/// `image` is `None` before the first upload; only the background is drawn then.
pub fn render_surface<'a>(
    size: SurfaceSize,
    background: BrushColor,
    image: Option<(&RgbaImage, &FitTransform)>,
    strokes: impl IntoIterator<Item = &'a Stroke>,
) -> Result<RgbaImage> {
    let mut pixmap = Pixmap::new(size.width, size.height).ok_or(MaskError::EmptyImage)?;

    let [r, g, b, a] = background.to_rgba_u8();
    pixmap.fill(Color::from_rgba8(r, g, b, a));

    if let Some((rgba, fit)) = image {
        let source = geometry::pixmap_from_rgba(rgba).ok_or(MaskError::EmptyImage)?;
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..Default::default()
        };
        let transform = Transform::from_row(
            fit.scale(),
            0.0,
            0.0,
            fit.scale(),
            fit.offset_x(),
            fit.offset_y(),
        );
        pixmap.draw_pixmap(0, 0, source.as_ref(), &paint, transform, None);
    }

    for stroke in strokes {
        draw_stroke(&mut pixmap, stroke, stroke.color.to_rgba_u8());
    }

    Ok(geometry::rgba_from_pixmap(&pixmap))
}
