use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: String,
    #[serde(rename = "lineWidth")]
    pub line_width: f64,
}

impl StrokeStyle {
    pub fn new(color: impl Into<String>, line_width: f64) -> Self {
        Self {
            color: color.into(),
            line_width,
        }
    }
}

/// One sampled pen position together with the style it is drawn in.
///
/// Wire shape: `{"x": .., "y": .., "color": "..", "lineWidth": ..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub x: f64,
    pub y: f64,
    pub color: String,
    #[serde(rename = "lineWidth")]
    pub line_width: f64,
}

impl StrokePoint {
    pub fn new(at: Point, style: &StrokeStyle) -> Self {
        Self {
            x: at.x,
            y: at.y,
            color: style.color.clone(),
            line_width: style.line_width,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn style(&self) -> StrokeStyle {
        StrokeStyle::new(self.color.clone(), self.line_width)
    }
}
