use async_trait::async_trait;
use baton_core::{PeerId, ServerEvent};

/// Outbound side of the event channel, as seen by a room.
///
/// The WebSocket service implements it in production; tests plug in a
/// recorder.
#[async_trait]
pub trait EventOutput: Send + Sync {
    /// Queue `event` for one participant. Delivery is best-effort.
    async fn send_event(&self, peer_id: PeerId, event: ServerEvent);
}
