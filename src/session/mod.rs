//! Drawing session state and message handling
//!
//! This module contains:
//! - The drawing surface session (surface.rs)
//! - Snapshot-based undo/redo (history.rs)
//! - Messages exchanged with the UI layer (messages.rs)
//! - Dispatch of those messages onto the surface (handlers.rs)

pub mod handlers;
pub mod history;
pub mod messages;
pub mod surface;

pub use handlers::handle_surface_msg;
pub use history::{History, Snapshot};
pub use messages::{PointerAction, SurfaceMsg, SurfaceResponse};
pub use surface::{DrawingSurface, LoadOutcome, LoadTicket};
