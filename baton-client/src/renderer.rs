use crate::surface::DrawingSurface;
use baton_core::{Point, ServerEvent};

/// Replays relayed strokes onto a surface.
#[derive(Debug)]
pub struct StrokeRenderer<S> {
    surface: S,
    pen: Option<Point>,
}

impl<S: DrawingSurface> StrokeRenderer<S> {
    pub fn new(surface: S) -> Self {
        Self { surface, pen: None }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Returns false for events that are not canvas events.
    pub fn apply(&mut self, event: &ServerEvent) -> bool {
        match event {
            ServerEvent::ServerStartDrawing(start) => {
                self.pen = Some(start.point());
            }
            ServerEvent::ServerDrawing(next) => {
                let to = next.point();
                // A lost start event leaves no pen; draw a dot rather than nothing.
                let from = self.pen.unwrap_or(to);
                self.surface.draw_segment(from, to, &next.style());
                self.pen = Some(to);
            }
            ServerEvent::ServerFinishDrawing => {
                self.pen = None;
            }
            ServerEvent::ServerClearCanvas => {
                self.surface.clear();
                self.pen = None;
            }
            ServerEvent::Welcome(_) | ServerEvent::TurnUpdate(_) => return false,
        }
        true
    }
}
