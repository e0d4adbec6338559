use crate::model::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintStyle {
    Fill,
    Stroke,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn svg_anchor(self) -> &'static str {
        match self {
            Self::Left => "start",
            Self::Center => "middle",
            Self::Right => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    pub color: String,
    pub style: PaintStyle,
    pub stroke_width: f32,
    pub text_size: f32,
    pub text_align: TextAlign,
}

impl Paint {
    pub fn fill(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            style: PaintStyle::Fill,
            stroke_width: 0.0,
            text_size: 0.0,
            text_align: TextAlign::Left,
        }
    }

    pub fn stroke(color: impl Into<String>, width: f32) -> Self {
        Self {
            color: color.into(),
            style: PaintStyle::Stroke,
            stroke_width: width,
            text_size: 0.0,
            text_align: TextAlign::Left,
        }
    }

    pub fn text(color: impl Into<String>, size: f32, align: TextAlign) -> Self {
        Self {
            color: color.into(),
            style: PaintStyle::Fill,
            stroke_width: 0.0,
            text_size: size,
            text_align: align,
        }
    }
}

/// Drawing surface the chart components paint onto.
///
/// Angles follow the screen convention: degrees, 0° on the +x axis, sweeping
/// clockwise because y grows downwards.
pub trait Canvas {
    fn draw_arc(&mut self, oval: Rect, start_angle: f32, sweep_angle: f32, use_center: bool, paint: &Paint);
    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, paint: &Paint);
    fn draw_rect(&mut self, rect: Rect, paint: &Paint);
    fn draw_text(&mut self, text: &str, x: f32, y: f32, paint: &Paint);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Arc {
        oval: Rect,
        start_angle: f32,
        sweep_angle: f32,
        use_center: bool,
        paint: Paint,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        paint: Paint,
    },
    Rect {
        rect: Rect,
        paint: Paint,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        paint: Paint,
    },
}

/// Canvas that records every call, later turned into SVG by [`crate::render`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn arcs(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Arc { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Line { .. }))
    }

    pub fn rects(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Rect { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Text { .. }))
    }
}

impl Canvas for DrawList {
    fn draw_arc(&mut self, oval: Rect, start_angle: f32, sweep_angle: f32, use_center: bool, paint: &Paint) {
        self.commands.push(DrawCommand::Arc {
            oval,
            start_angle,
            sweep_angle,
            use_center,
            paint: paint.clone(),
        });
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, paint: &Paint) {
        self.commands.push(DrawCommand::Line {
            x1,
            y1,
            x2,
            y2,
            paint: paint.clone(),
        });
    }

    fn draw_rect(&mut self, rect: Rect, paint: &Paint) {
        self.commands.push(DrawCommand::Rect {
            rect,
            paint: paint.clone(),
        });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, paint: &Paint) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            paint: paint.clone(),
        });
    }
}
