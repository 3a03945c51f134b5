//! Backend-independent drawing instructions

use crate::fit::Rect;
use crate::layout::style::{Color, FontSpec, Stroke, TextAlign};

/// Which loaded bitmap an image command refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSlot {
    Product,
    QrCode,
}

/// A point in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One drawing instruction produced by the compositor
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A single line of text; `y` is the baseline
    Text {
        text: String,
        x: f32,
        y: f32,
        font: FontSpec,
        color: Color,
        align: TextAlign,
    },
    /// `src` of the slot's bitmap scaled into `dest`, masked to `clip`
    ImageRegion {
        slot: ImageSlot,
        src: Rect,
        dest: Rect,
        clip: Option<Rect>,
        corner_radius: f32,
    },
    RoundedRect {
        rect: Rect,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Line {
        from: Point,
        to: Point,
        width: f32,
        color: Color,
    },
}

impl DrawCommand {
    /// Text content, for text commands
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawCommand::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Topmost y coordinate the command touches
    ///
    /// For text this is the baseline, which is what the flow cursor tracks.
    pub fn top(&self) -> f32 {
        match self {
            DrawCommand::Text { y, .. } => *y,
            DrawCommand::ImageRegion { dest, clip, .. } => clip.map_or(dest.y, |c| c.y.max(dest.y)),
            DrawCommand::RoundedRect { rect, .. } => rect.y,
            DrawCommand::Line { from, to, .. } => from.y.min(to.y),
        }
    }
}
