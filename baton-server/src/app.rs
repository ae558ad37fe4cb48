use crate::config::{RoomPolicy, ServerConfig};
use crate::room::RoomManager;
use crate::signaling::{SignalingService, ws_handler};
use anyhow::Context;
use axum::{Router, routing::get};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Everything a connection handler needs, shared through axum `State`.
pub struct AppState {
    pub signaling: SignalingService,
    pub room_manager: RoomManager,
}

impl AppState {
    pub fn new(policy: RoomPolicy) -> Self {
        let signaling = SignalingService::new();
        let room_manager = RoomManager::new(Arc::new(signaling.clone()), policy);

        Self {
            signaling,
            room_manager,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    serve_on(listener, config.policy).await
}

/// Serve on an already bound listener; tests bind port 0 and read the address back.
pub async fn serve_on(listener: TcpListener, policy: RoomPolicy) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(policy));

    info!("Whiteboard server listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state))
        .await
        .context("server stopped")?;
    Ok(())
}
