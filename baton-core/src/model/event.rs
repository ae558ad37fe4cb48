use crate::error::ProtocolError;
use crate::model::peer::PeerId;
use crate::model::room::RoomName;
use crate::model::stroke::StrokePoint;
use serde::{Deserialize, Serialize};

/// A stroke point addressed to a room: `{x, y, room, color, lineWidth}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawPayload {
    pub room: RoomName,
    #[serde(flatten)]
    pub point: StrokePoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRef {
    pub room: RoomName,
}

/// Frames a client sends to the coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    JoinRoom(RoomName),
    StartDrawing(DrawPayload),
    Drawing(DrawPayload),
    FinishDrawing(RoomRef),
    ClearCanvas(RoomRef),
    PassTurn(RoomRef),
}

impl ClientEvent {
    pub fn room(&self) -> &RoomName {
        match self {
            ClientEvent::JoinRoom(room) => room,
            ClientEvent::StartDrawing(payload) | ClientEvent::Drawing(payload) => &payload.room,
            ClientEvent::FinishDrawing(r) | ClientEvent::ClearCanvas(r) | ClientEvent::PassTurn(r) => {
                &r.room
            }
        }
    }

    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Frames the coordinator sends to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// First frame on every connection; carries the id the channel assigned.
    Welcome(PeerId),
    /// Authoritative holder of the draw token, or `null` when nobody holds it.
    TurnUpdate(Option<PeerId>),
    ServerStartDrawing(StrokePoint),
    ServerDrawing(StrokePoint),
    ServerFinishDrawing,
    ServerClearCanvas,
}

impl ServerEvent {
    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}
