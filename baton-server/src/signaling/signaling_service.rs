use crate::signaling::EventOutput;
use async_trait::async_trait;
use axum::extract::ws::Message;
use baton_core::{PeerId, RoomName, ServerEvent};
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error};

struct PeerLink {
    tx: mpsc::UnboundedSender<Message>,
    rooms: HashSet<RoomName>,
}

#[derive(Default)]
struct SignalingInner {
    peers: DashMap<PeerId, PeerLink>,
}

/// Connected participants and their outbound WebSocket queues.
#[derive(Clone, Default)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
}

impl SignalingService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_peer(&self, peer_id: PeerId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.peers.insert(
            peer_id,
            PeerLink {
                tx,
                rooms: HashSet::new(),
            },
        );
    }

    /// Remember that `peer_id` joined `room`, so a disconnect can leave it.
    pub fn track_room(&self, peer_id: &PeerId, room: RoomName) {
        if let Some(mut link) = self.inner.peers.get_mut(peer_id) {
            link.rooms.insert(room);
        }
    }

    /// Forget the peer and return the rooms it had joined.
    pub fn remove_peer(&self, peer_id: &PeerId) -> Vec<RoomName> {
        self.inner
            .peers
            .remove(peer_id)
            .map(|(_, link)| link.rooms.into_iter().collect())
            .unwrap_or_default()
    }

    pub fn peer_count(&self) -> usize {
        self.inner.peers.len()
    }

    pub fn send_signal(&self, peer_id: &PeerId, event: &ServerEvent) {
        let Some(peer) = self.inner.peers.get(peer_id) else {
            debug!("Attempted to send event to disconnected peer {}", peer_id);
            return;
        };

        match event.encode() {
            Ok(json) => {
                if let Err(e) = peer.tx.send(Message::Text(json.into())) {
                    error!("Failed to queue WS message for {}: {:?}", peer_id, e);
                }
            }
            Err(e) => error!("Failed to serialize server event: {}", e),
        }
    }
}

#[async_trait]
impl EventOutput for SignalingService {
    async fn send_event(&self, peer_id: PeerId, event: ServerEvent) {
        self.send_signal(&peer_id, &event);
    }
}
