mod event;
mod peer;
mod room;
mod stroke;

pub use event::{ClientEvent, DrawPayload, RoomRef, ServerEvent};
pub use peer::PeerId;
pub use room::RoomName;
pub use stroke::{Point, StrokePoint, StrokeStyle};
