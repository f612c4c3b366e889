//! Source image type for uploaded pictures

use std::sync::Arc;

use image::{ImageFormat, RgbaImage};

/// A decoded upload with its RGBA pixels at native resolution
///
/// Pixels are shared, so handing the image to the rasterizer never copies them.
#[derive(Clone, Debug)]
pub struct SourceImage {
    rgba: Arc<RgbaImage>,
    format: ImageFormat,
}

impl SourceImage {
    /// Wrap already-decoded pixels
    pub fn new(rgba: RgbaImage, format: ImageFormat) -> Self {
        log::debug!(
            "SourceImage decoded: {}x{} pixels ({:?})",
            rgba.width(),
            rgba.height(),
            format
        );
        Self {
            rgba: Arc::new(rgba),
            format,
        }
    }

    /// Borrow the RGBA pixels
    pub fn rgba(&self) -> &RgbaImage {
        &self.rgba
    }

    /// Format the upload was decoded from
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Get the width of the image
    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    /// Get the height of the image
    pub fn height(&self) -> u32 {
        self.rgba.height()
    }
}
