//! Message types for the drawing session
//!
//! The UI layer forwards file pickers, pointer events and button presses as
//! [`SurfaceMsg`] values and gets a [`SurfaceResponse`] back.

use crate::config::BrushColor;
use crate::render::EncodedImage;

// ============================================================================
// Pointer Types
// ============================================================================

/// Pointer or touch event in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    /// Pointer pressed at position
    Down(f32, f32),
    /// Pointer moved while pressed
    Move(f32, f32),
    /// Pointer released
    Up,
}

// ============================================================================
// Surface Messages
// ============================================================================

/// All messages accepted by the drawing surface
#[derive(Debug, Clone)]
pub enum SurfaceMsg {
    /// Image bytes from a file picker or drag-and-drop
    Upload(Vec<u8>),
    /// Stroke capture
    Pointer(PointerAction),
    /// Set brush width (clamped to 1-100)
    SetBrushSize(i64),
    /// Grow the brush by one step
    IncreaseBrush,
    /// Shrink the brush by one step
    DecreaseBrush,
    /// Set brush color for new strokes
    SetBrushColor(BrushColor),
    /// Remove all strokes
    Clear,
    /// Undo last stroke
    Undo,
    /// Redo undone stroke
    Redo,
    /// Render the mask
    RequestMask,
    /// Render the mask composited over the original
    RequestExport,
    /// Render original and mask side by side
    RequestPair,
}

/// Result of handling a [`SurfaceMsg`]
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceResponse {
    /// State changed (or nothing to do); the UI should re-render the surface
    Updated,
    /// An encoded image for display or download
    Image(EncodedImage),
}
