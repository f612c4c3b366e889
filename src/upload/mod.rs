//! Uploaded image handling
//!
//! This module consolidates:
//! - The decoded source image type (image.rs)
//! - Synchronous and background decoding of uploaded bytes (decode.rs)

pub mod decode;
pub mod image;

pub use decode::{decode_image, decode_image_async};
pub use self::image::SourceImage;
