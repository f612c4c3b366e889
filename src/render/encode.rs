//! PNG encoding for rendered buffers

use std::io;

use image::RgbaImage;

use crate::error::Result;

/// An encoded PNG handed back to the caller for display or download
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl EncodedImage {
    pub const MIME_TYPE: &'static str = "image/png";

    pub fn mime_type(&self) -> &'static str {
        Self::MIME_TYPE
    }

    /// Decode the PNG back into RGBA pixels
    pub fn to_rgba(&self) -> Result<RgbaImage> {
        let img = image::load_from_memory_with_format(&self.bytes, image::ImageFormat::Png)?;
        Ok(img.to_rgba8())
    }
}

/// Encode an RGBA buffer as an 8-bit RGBA PNG
pub fn encode_png(image: &RgbaImage) -> Result<EncodedImage> {
    let mut bytes = Vec::new();
    write_png(&mut bytes, image)?;
    Ok(EncodedImage {
        bytes,
        width: image.width(),
        height: image.height(),
    })
}

fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> std::result::Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())?;
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_encode_png_has_signature_and_dimensions() {
        let img = RgbaImage::from_pixel(7, 3, Rgba([1, 2, 3, 4]));
        let encoded = encode_png(&img).unwrap();

        assert_eq!(&encoded.bytes[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!((encoded.width, encoded.height), (7, 3));
        assert_eq!(encoded.mime_type(), "image/png");
        assert_eq!(encoded.to_rgba().unwrap(), img);
    }
}
