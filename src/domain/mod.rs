//! Pure domain types with minimal dependencies
//!
//! This module contains the geometry and stroke types shared by the session
//! and the renderer. Nothing here knows about decoding or rasterization.

pub mod geometry;
pub mod stroke;

pub use geometry::*;
pub use stroke::*;
