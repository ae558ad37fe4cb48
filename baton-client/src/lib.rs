//! Client side of the whiteboard protocol.
//!
//! Nothing here does I/O: feed decoded [`ServerEvent`](baton_core::ServerEvent)s
//! and pointer input into a [`Whiteboard`], send whatever
//! [`ClientEvent`](baton_core::ClientEvent)s it hands back.

mod renderer;
mod status;
mod surface;
mod tools;
mod turn;
mod whiteboard;

pub use renderer::StrokeRenderer;
pub use status::TurnStatus;
pub use surface::{DrawingSurface, RecordedOp, RecordingSurface};
pub use tools::{ERASER_COLOR, MAX_LINE_WIDTH, MIN_LINE_WIDTH, Tool, ToolState};
pub use turn::TurnClient;
pub use whiteboard::{DEFAULT_ROOM, Whiteboard};
