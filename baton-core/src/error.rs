use thiserror::Error;

/// Reasons an incoming frame is rejected before it reaches a room.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("room name must not be empty")]
    EmptyRoomName,

    #[error("malformed event: {0}")]
    Malformed(#[from] serde_json::Error),
}
