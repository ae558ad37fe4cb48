use crate::config::RoomPolicy;
use crate::room::room_command::{RoomCommand, RoomSnapshot};
use crate::room::room_state::{Delivery, RoomState};
use crate::signaling::EventOutput;
use baton_core::RoomName;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

pub(crate) type RoomRegistry = Arc<DashMap<RoomName, RoomHandle>>;

/// Registry entry for a running room. Commands are only ever pushed into `tx`
/// while the registry entry is locked, which is what lets a room retire safely.
pub(crate) struct RoomHandle {
    pub(crate) generation: u64,
    pub(crate) tx: mpsc::UnboundedSender<RoomCommand>,
}

struct Registration {
    rooms: RoomRegistry,
    generation: u64,
}

/// Room actor: owns one `RoomState` and applies commands strictly in order.
pub struct Room {
    name: RoomName,
    state: RoomState,
    command_rx: mpsc::UnboundedReceiver<RoomCommand>,
    output: Arc<dyn EventOutput>,
    registration: Option<Registration>,
}

impl Room {
    pub fn new(
        name: RoomName,
        policy: RoomPolicy,
        command_rx: mpsc::UnboundedReceiver<RoomCommand>,
        output: Arc<dyn EventOutput>,
    ) -> Self {
        Self {
            name,
            state: RoomState::new(policy),
            command_rx,
            output,
            registration: None,
        }
    }

    /// Lets the room drop itself from `rooms` once its last member leaves.
    pub(crate) fn registered(mut self, rooms: RoomRegistry, generation: u64) -> Self {
        self.registration = Some(Registration { rooms, generation });
        self
    }

    pub async fn run(mut self) {
        info!("Room '{}' event loop started", self.name);

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;

            if self.state.is_idle() && self.try_retire() {
                info!("Room '{}' is empty, retiring", self.name);
                break;
            }
        }

        info!("Room '{}' event loop finished", self.name);
    }

    async fn handle_command(&mut self, cmd: RoomCommand) {
        let holder_before = self.state.active_drawer().cloned();

        let deliveries = match cmd {
            RoomCommand::Join { peer_id } => {
                info!("Peer {} joined room '{}'", peer_id, self.name);
                self.state.join(peer_id)
            }
            RoomCommand::Leave { peer_id } => {
                info!("Peer {} left room '{}'", peer_id, self.name);
                self.state.leave(&peer_id)
            }
            RoomCommand::PassTurn { peer_id } => self.state.pass_turn(&peer_id),
            RoomCommand::StartStroke { peer_id, point } => {
                self.state.start_stroke(&peer_id, point)
            }
            RoomCommand::StrokePoint { peer_id, point } => {
                self.state.stroke_point(&peer_id, point)
            }
            RoomCommand::FinishStroke { peer_id } => self.state.finish_stroke(&peer_id),
            RoomCommand::Clear { peer_id } => self.state.clear(&peer_id),
            RoomCommand::Snapshot { reply } => {
                let _ = reply.send(self.snapshot());
                return;
            }
        };

        if self.state.active_drawer() != holder_before.as_ref() {
            info!(
                "Room '{}' token moved from {:?} to {:?}",
                self.name,
                holder_before.as_ref().map(|p| p.as_str()),
                self.state.active_drawer().map(|p| p.as_str())
            );
        }

        self.deliver(deliveries).await;
    }

    async fn deliver(&self, deliveries: Vec<Delivery>) {
        for Delivery { to, event } in deliveries {
            self.output.send_event(to, event).await;
        }
    }

    fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            name: self.name.clone(),
            members: self.state.members().to_vec(),
            active_drawer: self.state.active_drawer().cloned(),
        }
    }

    fn try_retire(&self) -> bool {
        let Some(registration) = &self.registration else {
            return false;
        };

        registration
            .rooms
            .remove_if(&self.name, |_, handle| {
                handle.generation == registration.generation && self.command_rx.is_empty()
            })
            .is_some()
    }
}
