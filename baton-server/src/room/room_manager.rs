use crate::config::RoomPolicy;
use crate::room::room::{Room, RoomHandle, RoomRegistry};
use crate::room::room_command::{RoomCommand, RoomSnapshot};
use crate::signaling::EventOutput;
use baton_core::RoomName;
use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Process-wide table of rooms, keyed by name.
///
/// Rooms are spawned by the first `Join` and retire themselves when their last
/// member leaves; any other command for a room that is not running is dropped.
#[derive(Clone)]
pub struct RoomManager {
    rooms: RoomRegistry,
    output: Arc<dyn EventOutput>,
    policy: RoomPolicy,
    generations: Arc<AtomicU64>,
}

impl RoomManager {
    pub fn new(output: Arc<dyn EventOutput>, policy: RoomPolicy) -> Self {
        Self {
            rooms: Arc::new(DashMap::new()),
            output,
            policy,
            generations: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn submit(&self, room: &RoomName, cmd: RoomCommand) {
        match cmd {
            RoomCommand::Join { .. } => self.submit_join(room, cmd),
            cmd => self.submit_existing(room, cmd),
        }
    }

    fn submit_join(&self, room: &RoomName, cmd: RoomCommand) {
        let mut handle = self
            .rooms
            .entry(room.clone())
            .or_insert_with(|| self.spawn_room(room));

        if let Err(mpsc::error::SendError(cmd)) = handle.tx.send(cmd) {
            warn!("Room '{}' stopped unexpectedly, restarting it", room);
            *handle = self.spawn_room(room);
            let _ = handle.tx.send(cmd);
        }
    }

    fn submit_existing(&self, room: &RoomName, cmd: RoomCommand) {
        let Some(handle) = self.rooms.get(room) else {
            debug!("Dropping {:?} for unknown room '{}'", cmd, room);
            return;
        };

        if handle.tx.send(cmd).is_err() {
            warn!("Room '{}' is not running", room);
        }
    }

    fn spawn_room(&self, room: &RoomName) -> RoomHandle {
        info!("Creating new room: {}", room);

        let generation = self.generations.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();

        let actor = Room::new(room.clone(), self.policy, rx, self.output.clone())
            .registered(self.rooms.clone(), generation);
        tokio::spawn(actor.run());

        RoomHandle { generation, tx }
    }

    pub async fn snapshot(&self, room: &RoomName) -> Option<RoomSnapshot> {
        let (reply, reply_rx) = oneshot::channel();
        {
            let handle = self.rooms.get(room)?;
            handle.tx.send(RoomCommand::Snapshot { reply }).ok()?;
        }
        reply_rx.await.ok()
    }

    pub fn contains_room(&self, room: &RoomName) -> bool {
        self.rooms.contains_key(room)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
