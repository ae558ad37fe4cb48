use baton_core::{Point, StrokeStyle};

/// The canvas the client paints on.
pub trait DrawingSurface {
    fn draw_segment(&mut self, from: Point, to: Point, style: &StrokeStyle);

    fn clear(&mut self);
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedOp {
    Segment {
        from: Point,
        to: Point,
        style: StrokeStyle,
    },
    Clear,
}

/// Surface that only remembers what it was asked to draw.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<RecordedOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> Vec<(Point, Point)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                RecordedOp::Segment { from, to, .. } => Some((*from, *to)),
                RecordedOp::Clear => None,
            })
            .collect()
    }
}

impl DrawingSurface for RecordingSurface {
    fn draw_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        self.ops.push(RecordedOp::Segment {
            from,
            to,
            style: style.clone(),
        });
    }

    fn clear(&mut self) {
        self.ops.push(RecordedOp::Clear);
    }
}
