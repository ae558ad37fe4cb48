use anyhow::{Context, Result, bail};
use baton_core::{ClientEvent, PeerId, ServerEvent};
use baton_server::{RoomPolicy, serve_on};
use futures::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

/// Timeout for a single expected frame (ms).
pub const RECV_TIMEOUT_MS: u64 = 5000;

/// How long a client must stay quiet to count as "received nothing" (ms).
pub const SILENCE_MS: u64 = 300;

/// Start a server on an ephemeral port and return its address.
pub async fn spawn_server(policy: RoomPolicy) -> Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = serve_on(listener, policy).await {
            tracing::error!("[TestServer] stopped: {:?}", e);
        }
    });

    Ok(addr)
}

/// A participant speaking the JSON protocol over a real WebSocket.
pub struct WsTestClient {
    pub peer_id: PeerId,
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsTestClient {
    /// Connect and consume the welcome frame.
    pub async fn connect(addr: SocketAddr) -> Result<Self> {
        let (mut stream, _) = connect_async(format!("ws://{}/ws", addr))
            .await
            .context("Failed to connect")?;

        let welcome = recv_event(&mut stream, RECV_TIMEOUT_MS).await?;
        let ServerEvent::Welcome(peer_id) = welcome else {
            bail!("Expected welcome, got {:?}", welcome);
        };
        tracing::debug!("[WsTestClient] connected as {}", peer_id);

        Ok(Self { peer_id, stream })
    }

    pub async fn send(&mut self, event: &ClientEvent) -> Result<()> {
        self.send_raw(&event.encode()?).await
    }

    pub async fn send_raw(&mut self, text: &str) -> Result<()> {
        self.stream
            .send(Message::Text(text.to_owned().into()))
            .await
            .context("Failed to send frame")
    }

    pub async fn recv(&mut self) -> Result<ServerEvent> {
        recv_event(&mut self.stream, RECV_TIMEOUT_MS).await
    }

    /// True if nothing arrives within `SILENCE_MS`.
    pub async fn stays_silent(&mut self) -> bool {
        recv_event(&mut self.stream, SILENCE_MS).await.is_err()
    }

    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await.context("Failed to close")
    }
}

async fn recv_event(
    stream: &mut WebSocketStream<MaybeTlsStream<TcpStream>>,
    timeout_ms: u64,
) -> Result<ServerEvent> {
    let deadline = Duration::from_millis(timeout_ms);

    loop {
        let frame = tokio::time::timeout(deadline, stream.next())
            .await
            .context("Timeout waiting for frame")?;

        match frame {
            Some(Ok(Message::Text(text))) => return Ok(ServerEvent::decode(text.as_str())?),
            Some(Ok(Message::Close(_))) | None => bail!("Connection closed"),
            Some(Ok(_)) => continue,
            Some(Err(e)) => bail!("WebSocket error: {}", e),
        }
    }
}
