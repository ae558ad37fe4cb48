use async_trait::async_trait;
use baton_core::{PeerId, ServerEvent};
use baton_server::EventOutput;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

#[derive(Debug, Clone, PartialEq)]
pub struct SentEvent {
    pub peer_id: PeerId,
    pub event: ServerEvent,
}

/// Mock EventOutput that captures every outgoing event.
#[derive(Clone)]
pub struct MockEventOutput {
    /// Channel to stream captured events.
    tx: mpsc::UnboundedSender<SentEvent>,
    /// All captured events (for verification).
    events: Arc<Mutex<Vec<SentEvent>>>,
}

impl MockEventOutput {
    /// Create a new MockEventOutput and its receiver channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SentEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let output = Self {
            tx,
            events: Arc::new(Mutex::new(Vec::new())),
        };
        (output, rx)
    }

    /// Create a MockEventOutput without a receiver (events are only stored).
    pub fn new_stored_only() -> Self {
        let (output, _rx) = Self::new();
        output
    }

    /// Every event delivered to `peer_id`, in delivery order.
    pub async fn events_for(&self, peer_id: &PeerId) -> Vec<ServerEvent> {
        self.events
            .lock()
            .await
            .iter()
            .filter(|sent| &sent.peer_id == peer_id)
            .map(|sent| sent.event.clone())
            .collect()
    }

    /// Drawing and clear events delivered to `peer_id`, skipping turn updates.
    pub async fn canvas_events_for(&self, peer_id: &PeerId) -> Vec<ServerEvent> {
        self.events_for(peer_id)
            .await
            .into_iter()
            .filter(|event| !matches!(event, ServerEvent::TurnUpdate(_)))
            .collect()
    }

    /// The holder named by the most recent turn-update `peer_id` received.
    pub async fn last_turn_for(&self, peer_id: &PeerId) -> Option<Option<PeerId>> {
        self.events_for(peer_id)
            .await
            .into_iter()
            .rev()
            .find_map(|event| match event {
                ServerEvent::TurnUpdate(holder) => Some(holder),
                _ => None,
            })
    }

    pub async fn len(&self) -> usize {
        self.events.lock().await.len()
    }
}

impl Default for MockEventOutput {
    fn default() -> Self {
        Self::new_stored_only()
    }
}

#[async_trait]
impl EventOutput for MockEventOutput {
    async fn send_event(&self, peer_id: PeerId, event: ServerEvent) {
        tracing::debug!("[MockOutput] {:?} -> {}", event, peer_id);

        let sent = SentEvent { peer_id, event };
        self.events.lock().await.push(sent.clone());
        let _ = self.tx.send(sent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_output_captures_events() {
        let (output, mut rx) = MockEventOutput::new();
        let peer_id = PeerId::new();

        output
            .send_event(peer_id.clone(), ServerEvent::ServerClearCanvas)
            .await;

        let sent = rx.recv().await.unwrap();
        assert_eq!(sent.event, ServerEvent::ServerClearCanvas);
        assert_eq!(output.events_for(&peer_id).await, vec![ServerEvent::ServerClearCanvas]);
        assert_eq!(output.last_turn_for(&peer_id).await, None);
    }
}
