use anyhow::{Context, Result};
use baton_client::{DEFAULT_ROOM, DrawingSurface, TurnStatus, Whiteboard};
use baton_core::{Point, RoomName, ServerEvent, StrokeStyle};
use baton_server::{ClearPolicy, HolderLeavePolicy, RoomPolicy, ServerConfig};
use clap::{Parser, Subcommand};
use colored::*;
use futures::{SinkExt, StreamExt};
use std::net::SocketAddr;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "baton", version, about = "Turn-based shared whiteboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the coordinator.
    Serve {
        #[arg(long, env = "BATON_BIND", default_value = "0.0.0.0:3000")]
        bind: SocketAddr,

        /// any-member or holder-only
        #[arg(long, env = "BATON_CLEAR_POLICY", default_value_t = ClearPolicy::AnyMember)]
        clear_policy: ClearPolicy,

        /// next-in-join-order or release
        #[arg(long, env = "BATON_HOLDER_LEAVE", default_value_t = HolderLeavePolicy::NextInJoinOrder)]
        holder_leave: HolderLeavePolicy,
    },

    /// Join a room as a spectator and print what happens on the canvas.
    Watch {
        #[arg(long, default_value = "ws://127.0.0.1:3000/ws")]
        url: String,

        #[arg(long, default_value = DEFAULT_ROOM)]
        room: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "baton=info,baton_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match Cli::parse().command {
        Commands::Serve {
            bind,
            clear_policy,
            holder_leave,
        } => {
            let config = ServerConfig {
                bind,
                policy: RoomPolicy {
                    clear: clear_policy,
                    holder_leave,
                },
            };

            println!("{}", "🖍  Starting whiteboard coordinator...".green().bold());
            println!("   clear:        {}", config.policy.clear);
            println!("   holder leave: {}", config.policy.holder_leave);

            baton_server::serve(config).await
        }
        Commands::Watch { url, room } => {
            let room = RoomName::parse(&room).context("invalid room name")?;
            watch(&url, room).await
        }
    }
}

/// Prints replayed strokes instead of painting them.
struct TerminalSurface;

impl DrawingSurface for TerminalSurface {
    fn draw_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        println!(
            "   {} ({:.0},{:.0}) -> ({:.0},{:.0}) {} w{}",
            "stroke".cyan(),
            from.x,
            from.y,
            to.x,
            to.y,
            style.color,
            style.line_width
        );
    }

    fn clear(&mut self) {
        println!("   {}", "canvas cleared".yellow());
    }
}

async fn watch(url: &str, room: RoomName) -> Result<()> {
    let (stream, _) = connect_async(url)
        .await
        .with_context(|| format!("failed to connect to {}", url))?;
    info!("Connected to {}", url);

    let (mut sink, mut frames) = stream.split();
    let mut board = Whiteboard::spectator(room, TerminalSurface);
    let mut last_status = board.status();

    while let Some(frame) = frames.next().await {
        let text = match frame.context("connection error")? {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };

        let event = match ServerEvent::decode(text.as_str()) {
            Ok(event) => event,
            Err(e) => {
                warn!("Ignoring frame from server: {}", e);
                continue;
            }
        };

        if let Some(reply) = board.handle_server_event(event) {
            sink.send(Message::Text(reply.encode()?.into()))
                .await
                .context("failed to send")?;
        }

        let status = board.status();
        if status != last_status {
            print_status(&status);
            last_status = status;
        }
    }

    board.on_disconnected();
    println!("{}", "Disconnected.".red());
    Ok(())
}

fn print_status(status: &TurnStatus) {
    let line = status.to_string();
    match status {
        TurnStatus::MyTurn => println!("{}", line.green().bold()),
        TurnStatus::Spectating(_) => println!("{}", line.blue()),
        TurnStatus::Connecting => println!("{}", line.dimmed()),
    }
}
