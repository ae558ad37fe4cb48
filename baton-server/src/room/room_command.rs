use baton_core::{ClientEvent, PeerId, RoomName, StrokePoint};
use tokio::sync::oneshot;

/// Commands a room actor consumes, one at a time, in arrival order.
#[derive(Debug)]
pub enum RoomCommand {
    Join { peer_id: PeerId },

    /// Explicit leave or the connection went away.
    Leave { peer_id: PeerId },

    PassTurn { peer_id: PeerId },

    StartStroke { peer_id: PeerId, point: StrokePoint },

    StrokePoint { peer_id: PeerId, point: StrokePoint },

    FinishStroke { peer_id: PeerId },

    Clear { peer_id: PeerId },

    /// Read-only view of the room, for diagnostics and tests.
    Snapshot { reply: oneshot::Sender<RoomSnapshot> },
}

impl RoomCommand {
    /// Splits a decoded client frame into its target room and the command for it.
    pub fn from_client_event(peer_id: PeerId, event: ClientEvent) -> (RoomName, RoomCommand) {
        match event {
            ClientEvent::JoinRoom(room) => (room, RoomCommand::Join { peer_id }),
            ClientEvent::StartDrawing(payload) => (
                payload.room,
                RoomCommand::StartStroke {
                    peer_id,
                    point: payload.point,
                },
            ),
            ClientEvent::Drawing(payload) => (
                payload.room,
                RoomCommand::StrokePoint {
                    peer_id,
                    point: payload.point,
                },
            ),
            ClientEvent::FinishDrawing(r) => (r.room, RoomCommand::FinishStroke { peer_id }),
            ClientEvent::ClearCanvas(r) => (r.room, RoomCommand::Clear { peer_id }),
            ClientEvent::PassTurn(r) => (r.room, RoomCommand::PassTurn { peer_id }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoomSnapshot {
    pub name: RoomName,
    pub members: Vec<PeerId>,
    pub active_drawer: Option<PeerId>,
}
