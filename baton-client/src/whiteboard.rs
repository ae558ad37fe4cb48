use crate::renderer::StrokeRenderer;
use crate::status::TurnStatus;
use crate::surface::DrawingSurface;
use crate::tools::{Tool, ToolState};
use crate::turn::TurnClient;
use baton_core::{ClientEvent, Point, RoomName, ServerEvent};
use tracing::debug;

pub const DEFAULT_ROOM: &str = "main-room";

/// One participant's whiteboard: turn gating, tools, local ink and remote
/// replay on a single surface.
#[derive(Debug)]
pub struct Whiteboard<S> {
    turn: TurnClient,
    tools: ToolState,
    renderer: StrokeRenderer<S>,
    /// Never keeps the token; see `yield_turn`.
    spectator: bool,
    pass_in_flight: bool,
}

impl<S: DrawingSurface> Whiteboard<S> {
    pub fn new(room: RoomName, surface: S) -> Self {
        Self {
            turn: TurnClient::new(room),
            tools: ToolState::default(),
            renderer: StrokeRenderer::new(surface),
            spectator: false,
            pass_in_flight: false,
        }
    }

    /// A board that only watches: it passes the token on whenever it is
    /// handed one, so joining an empty room does not lock out later artists.
    pub fn spectator(room: RoomName, surface: S) -> Self {
        Self {
            spectator: true,
            ..Self::new(room, surface)
        }
    }

    pub fn turn(&self) -> &TurnClient {
        &self.turn
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn surface(&self) -> &S {
        self.renderer.surface()
    }

    pub fn status(&self) -> TurnStatus {
        self.turn.status()
    }

    pub fn is_my_turn(&self) -> bool {
        self.turn.is_my_turn()
    }

    /// Dispatches one frame from the coordinator.
    pub fn handle_server_event(&mut self, event: ServerEvent) -> Option<ClientEvent> {
        match event {
            ServerEvent::Welcome(my_id) => Some(self.turn.on_connected(my_id)),
            ServerEvent::TurnUpdate(drawer) => {
                let reply = self.turn.apply_turn_update(drawer);
                if self.spectator {
                    self.yield_turn()
                } else {
                    reply
                }
            }
            canvas_event => {
                self.renderer.apply(&canvas_event);
                None
            }
        }
    }

    pub fn on_disconnected(&mut self) {
        self.turn.on_disconnected();
        self.pass_in_flight = false;
    }

    // The coordinator answers every pass with exactly one turn-update. The
    // update that follows our pass is its reply; if it still names us we are
    // the sole member and keep the token until somebody else joins.
    fn yield_turn(&mut self) -> Option<ClientEvent> {
        if std::mem::take(&mut self.pass_in_flight) || !self.turn.is_my_turn() {
            return None;
        }

        debug!("Spectator holds the token, passing it on");
        self.pass_in_flight = true;
        self.turn.pass_turn()
    }

    pub fn pointer_down(&mut self, at: Point) -> Option<ClientEvent> {
        self.turn.pointer_down(at, &self.tools.style())
    }

    pub fn pointer_move(&mut self, to: Point) -> Option<ClientEvent> {
        let from = self.turn.pen()?;
        let style = self.tools.style();
        let event = self.turn.pointer_move(to, &style)?;

        self.renderer.surface_mut().draw_segment(from, to, &style);
        Some(event)
    }

    pub fn pointer_up(&mut self) -> Option<ClientEvent> {
        self.turn.pointer_up()
    }

    pub fn pointer_leave(&mut self) -> Option<ClientEvent> {
        self.turn.pointer_leave()
    }

    pub fn clear_canvas(&self) -> Option<ClientEvent> {
        self.turn.clear_canvas()
    }

    pub fn pass_turn(&self) -> Option<ClientEvent> {
        self.turn.pass_turn()
    }

    // Toolbar controls are disabled while spectating; setters report whether
    // they took effect.

    pub fn set_tool(&mut self, tool: Tool) -> bool {
        if !self.is_my_turn() {
            return false;
        }
        self.tools.set_tool(tool);
        true
    }

    pub fn set_color(&mut self, color: &str) -> bool {
        if !self.is_my_turn() {
            return false;
        }
        self.tools.set_color(color);
        true
    }

    pub fn set_line_width(&mut self, width: f64) -> bool {
        if !self.is_my_turn() {
            return false;
        }
        self.tools.set_line_width(width);
        true
    }
}
