//! Surface message handlers
//!
//! Handles SurfaceMsg for every operation the UI layer can request.

use super::messages::{PointerAction, SurfaceMsg, SurfaceResponse};
use super::surface::DrawingSurface;
use crate::domain::Point;
use crate::error::Result;

/// Handle a SurfaceMsg, modifying the surface
///
/// Errors leave the surface unchanged and are meant to be shown to the user.
pub fn handle_surface_msg(
    surface: &mut DrawingSurface,
    msg: SurfaceMsg,
) -> Result<SurfaceResponse> {
    match msg {
        SurfaceMsg::Upload(bytes) => surface.load_image(&bytes)?,
        SurfaceMsg::Pointer(action) => handle_pointer(surface, action)?,
        SurfaceMsg::SetBrushSize(size) => {
            surface.set_brush_size(size);
        }
        SurfaceMsg::IncreaseBrush => {
            surface.increase_brush();
        }
        SurfaceMsg::DecreaseBrush => {
            surface.decrease_brush();
        }
        SurfaceMsg::SetBrushColor(color) => surface.set_brush_color(color),
        SurfaceMsg::Clear => surface.clear(),
        SurfaceMsg::Undo => {
            surface.undo();
        }
        SurfaceMsg::Redo => {
            surface.redo();
        }
        SurfaceMsg::RequestMask => return surface.request_mask().map(SurfaceResponse::Image),
        SurfaceMsg::RequestExport => return surface.request_export().map(SurfaceResponse::Image),
        SurfaceMsg::RequestPair => return surface.request_pair().map(SurfaceResponse::Image),
    }
    Ok(SurfaceResponse::Updated)
}

fn handle_pointer(surface: &mut DrawingSurface, action: PointerAction) -> Result<()> {
    match action {
        PointerAction::Down(x, y) => surface.begin_stroke(Point::new(x, y)),
        PointerAction::Move(x, y) => surface.extend_stroke(Point::new(x, y)),
        PointerAction::Up => surface.end_stroke().map(|_| ()),
    }
}
