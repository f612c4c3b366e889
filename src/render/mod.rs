//! Stroke rendering module
//!
//! This module contains:
//! - Constants and helpers shared by every render target
//! - The native-resolution mask rasterizer and its derived exports (tiny-skia)
//! - The letterboxed surface preview (tiny-skia)
//! - PNG encoding of rendered buffers

pub mod encode;
pub mod geometry;
pub mod image;
pub mod surface;

pub use encode::{EncodedImage, encode_png};
