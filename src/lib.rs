//! Freehand mask drawing over letterboxed images
//!
//! An image is fitted into a fixed-size drawing surface, the user paints
//! strokes over it, and the strokes are replayed at the image's native
//! resolution to produce a pixel-aligned mask.

pub mod config;
pub mod domain;
pub mod error;
pub mod render;
pub mod session;
pub mod upload;

pub use config::{BrushColor, MaskConfig};
pub use domain::{FitTransform, PathCommand, Point, Stroke, SurfaceSize};
pub use error::MaskError;
pub use render::EncodedImage;
pub use session::{DrawingSurface, PointerAction, SurfaceMsg, SurfaceResponse, handle_surface_msg};
