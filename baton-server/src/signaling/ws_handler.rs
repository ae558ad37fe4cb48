use crate::{AppState, RoomCommand};
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use baton_core::{ClientEvent, PeerId, ServerEvent};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let peer_id = PeerId::new();

    ws.on_upgrade(move |socket| handle_socket(socket, peer_id, state))
}

async fn handle_socket(socket: WebSocket, peer_id: PeerId, state: Arc<AppState>) {
    info!("New WebSocket connection: {}", peer_id);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    state.signaling.add_peer(peer_id.clone(), tx);
    state
        .signaling
        .send_signal(&peer_id, &ServerEvent::Welcome(peer_id.clone()));

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let state = state.clone();
        let peer_id = peer_id.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match ClientEvent::decode(text.as_str()) {
                        Ok(event) => route_event(&state, &peer_id, event),
                        Err(e) => warn!("Invalid event from {}: {}", peer_id, e),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    // Disconnect is an implicit leave from every joined room.
    for room in state.signaling.remove_peer(&peer_id) {
        state.room_manager.submit(
            &room,
            RoomCommand::Leave {
                peer_id: peer_id.clone(),
            },
        );
    }
    info!("WebSocket disconnected: {}", peer_id);
}

fn route_event(state: &AppState, peer_id: &PeerId, event: ClientEvent) {
    let (room, cmd) = RoomCommand::from_client_event(peer_id.clone(), event);

    if matches!(cmd, RoomCommand::Join { .. }) {
        state.signaling.track_room(peer_id, room.clone());
    }
    state.room_manager.submit(&room, cmd);
}
