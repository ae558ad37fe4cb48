use crate::status::TurnStatus;
use baton_core::{ClientEvent, DrawPayload, PeerId, Point, RoomName, RoomRef, StrokePoint, StrokeStyle};
use tracing::debug;

/// Local view of the draw token for one room.
///
/// Holds the last `turn-update` the coordinator sent and gates pointer input
/// on it. Methods return the event to send, if any.
#[derive(Debug, Clone)]
pub struct TurnClient {
    room: RoomName,
    my_id: Option<PeerId>,
    active_drawer: Option<PeerId>,
    pen: Option<Point>,
}

impl TurnClient {
    pub fn new(room: RoomName) -> Self {
        Self {
            room,
            my_id: None,
            active_drawer: None,
            pen: None,
        }
    }

    pub fn room(&self) -> &RoomName {
        &self.room
    }

    pub fn my_id(&self) -> Option<&PeerId> {
        self.my_id.as_ref()
    }

    pub fn active_drawer(&self) -> Option<&PeerId> {
        self.active_drawer.as_ref()
    }

    pub fn is_my_turn(&self) -> bool {
        self.my_id.is_some() && self.my_id == self.active_drawer
    }

    /// Last local pen position while a stroke is open.
    pub fn pen(&self) -> Option<Point> {
        self.pen
    }

    pub fn is_drawing(&self) -> bool {
        self.pen.is_some()
    }

    pub fn status(&self) -> TurnStatus {
        match &self.active_drawer {
            None => TurnStatus::Connecting,
            Some(_) if self.is_my_turn() => TurnStatus::MyTurn,
            Some(holder) => TurnStatus::Spectating(holder.clone()),
        }
    }

    /// The channel assigned us an id; ask to join the room.
    pub fn on_connected(&mut self, my_id: PeerId) -> ClientEvent {
        self.my_id = Some(my_id);
        ClientEvent::JoinRoom(self.room.clone())
    }

    pub fn on_disconnected(&mut self) {
        self.my_id = None;
        self.active_drawer = None;
        self.pen = None;
    }

    /// Applies an authoritative turn change.
    ///
    /// Losing the turn mid-stroke closes the local stroke and returns the
    /// `finish-drawing` that lets spectators close theirs.
    pub fn apply_turn_update(&mut self, drawer: Option<PeerId>) -> Option<ClientEvent> {
        self.active_drawer = drawer;

        if self.is_my_turn() || self.pen.is_none() {
            return None;
        }

        debug!("Turn lost mid-stroke, finishing it locally");
        self.pen = None;
        Some(self.finish_event())
    }

    pub fn pointer_down(&mut self, at: Point, style: &StrokeStyle) -> Option<ClientEvent> {
        if !self.is_my_turn() {
            return None;
        }

        self.pen = Some(at);
        Some(ClientEvent::StartDrawing(self.payload(at, style)))
    }

    pub fn pointer_move(&mut self, to: Point, style: &StrokeStyle) -> Option<ClientEvent> {
        if !self.is_my_turn() || self.pen.is_none() {
            return None;
        }

        self.pen = Some(to);
        Some(ClientEvent::Drawing(self.payload(to, style)))
    }

    pub fn pointer_up(&mut self) -> Option<ClientEvent> {
        self.pen.take()?;
        Some(self.finish_event())
    }

    /// Leaving the canvas ends the stroke like a release.
    pub fn pointer_leave(&mut self) -> Option<ClientEvent> {
        self.pointer_up()
    }

    pub fn clear_canvas(&self) -> Option<ClientEvent> {
        self.is_my_turn()
            .then(|| ClientEvent::ClearCanvas(self.room_ref()))
    }

    pub fn pass_turn(&self) -> Option<ClientEvent> {
        self.is_my_turn()
            .then(|| ClientEvent::PassTurn(self.room_ref()))
    }

    fn payload(&self, at: Point, style: &StrokeStyle) -> DrawPayload {
        DrawPayload {
            room: self.room.clone(),
            point: StrokePoint::new(at, style),
        }
    }

    fn room_ref(&self) -> RoomRef {
        RoomRef {
            room: self.room.clone(),
        }
    }

    fn finish_event(&self) -> ClientEvent {
        ClientEvent::FinishDrawing(self.room_ref())
    }
}
