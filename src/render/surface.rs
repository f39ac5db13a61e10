//! Drawing surfaces the renderer paints on.

use std::fmt;

use enum_dispatch::enum_dispatch;

use super::svg::SvgSurface;
use crate::types::Vec2D;

/// Drawing operations in canvas coordinates
#[enum_dispatch]
pub trait Surface {
    /// Repaint the whole canvas with a color
    fn fill_background(&mut self, color: &str);

    /// Draw a straight path segment
    fn stroke_segment(&mut self, from: Vec2D, to: Vec2D, color: &str);

    /// Show the turtle glyph, replacing any previous one
    fn show_glyph(&mut self, vertices: [Vec2D; 3], color: &str);

    /// Remove the turtle glyph
    fn hide_glyph(&mut self);
}

/// One recorded drawing operation
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Background(String),
    Segment { from: Vec2D, to: Vec2D, color: String },
    ShowGlyph { vertices: [Vec2D; 3], color: String },
    HideGlyph,
}

impl fmt::Display for DrawOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawOp::Background(color) => write!(f, "background {}", color),
            DrawOp::Segment { from, to, color } => write!(f, "segment {} -> {} {}", from, to, color),
            DrawOp::ShowGlyph { vertices, color } => write!(
                f,
                "glyph {} {} {} {}",
                vertices[0], vertices[1], vertices[2], color
            ),
            DrawOp::HideGlyph => write!(f, "hide glyph"),
        }
    }
}

/// Keeps every operation in order; useful for inspecting what a renderer did
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Segment { .. }))
    }
}

impl Surface for RecordingSurface {
    fn fill_background(&mut self, color: &str) {
        self.ops.push(DrawOp::Background(color.to_string()));
    }

    fn stroke_segment(&mut self, from: Vec2D, to: Vec2D, color: &str) {
        self.ops.push(DrawOp::Segment {
            from,
            to,
            color: color.to_string(),
        });
    }

    fn show_glyph(&mut self, vertices: [Vec2D; 3], color: &str) {
        self.ops.push(DrawOp::ShowGlyph {
            vertices,
            color: color.to_string(),
        });
    }

    fn hide_glyph(&mut self) {
        self.ops.push(DrawOp::HideGlyph);
    }
}

/// Any of the built-in surfaces
#[enum_dispatch(Surface)]
#[derive(Clone, Debug)]
pub enum AnySurface {
    SvgSurface,
    RecordingSurface,
}

impl AnySurface {
    /// The surface contents as text: an SVG document, or one line per
    /// recorded operation.
    pub fn render(&self) -> String {
        match self {
            AnySurface::SvgSurface(svg) => svg.to_svg_string(),
            AnySurface::RecordingSurface(rec) => {
                let mut out = String::new();
                for op in &rec.ops {
                    out.push_str(&op.to_string());
                    out.push('\n');
                }
                out
            }
        }
    }
}
