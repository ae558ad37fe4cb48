use baton_core::StrokeStyle;

pub const ERASER_COLOR: &str = "#FFFFFF";
pub const MIN_LINE_WIDTH: f64 = 1.0;
pub const MAX_LINE_WIDTH: f64 = 20.0;

const DEFAULT_COLOR: &str = "#000000";
const DEFAULT_LINE_WIDTH: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Pencil,
    /// Paints in the background color.
    Eraser,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolState {
    tool: Tool,
    color: String,
    line_width: f64,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: Tool::Pencil,
            color: DEFAULT_COLOR.to_owned(),
            line_width: DEFAULT_LINE_WIDTH,
        }
    }
}

impl ToolState {
    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    pub fn set_line_width(&mut self, width: f64) {
        self.line_width = width.clamp(MIN_LINE_WIDTH, MAX_LINE_WIDTH);
    }

    /// Style the next stroke is drawn and sent with.
    pub fn style(&self) -> StrokeStyle {
        let color = match self.tool {
            Tool::Pencil => self.color.as_str(),
            Tool::Eraser => ERASER_COLOR,
        };
        StrokeStyle::new(color, self.line_width)
    }
}
