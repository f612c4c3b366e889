//! Decoding of uploaded image bytes
//!
//! Only PNG and JPEG uploads are accepted. Decoding can run inline or on the
//! tokio blocking pool; either way a failure is returned, never a hang.

use image::ImageFormat;

use super::image::SourceImage;
use crate::error::{MaskError, Result};

/// Decode uploaded bytes into a [`SourceImage`]
pub fn decode_image(bytes: &[u8]) -> Result<SourceImage> {
    let format = image::guess_format(bytes)?;
    if !matches!(format, ImageFormat::Png | ImageFormat::Jpeg) {
        return Err(MaskError::UnsupportedFormat(format!("{:?}", format)));
    }

    let rgba = image::load_from_memory_with_format(bytes, format)?.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(MaskError::EmptyImage);
    }

    Ok(SourceImage::new(rgba, format))
}

/// Decode uploaded bytes on the blocking thread pool
pub async fn decode_image_async(bytes: Vec<u8>) -> Result<SourceImage> {
    tokio::task::spawn_blocking(move || decode_image(&bytes))
        .await
        .map_err(|e| MaskError::DecodeTask(e.to_string()))?
}
