//! Default sizes and settings for drawing, in canvas pixels

/// Distance from the glyph center to each vertex
pub const GLYPH_RADIUS: f64 = 10.0;
/// Stroke width for path segments
pub const STROKE_WIDTH: f64 = 1.5;
/// Outline width for the turtle glyph
pub const GLYPH_STROKE_WIDTH: f64 = 1.0;
