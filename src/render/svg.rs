//! SVG generation

use svg::Document;
use svg::node::element::{Line, Polygon, Rectangle};

use super::defaults;
use super::surface::Surface;
use crate::environment::Viewport;
use crate::types::Vec2D;

/// Styling knobs for SVG output
#[derive(Clone, Debug, PartialEq)]
pub struct SvgOptions {
    pub stroke_width: f64,
    pub glyph_stroke_width: f64,
    /// Outline color for the glyph; the fill always follows the pen color
    pub glyph_outline: Option<String>,
}

impl Default for SvgOptions {
    fn default() -> Self {
        SvgOptions {
            stroke_width: defaults::STROKE_WIDTH,
            glyph_stroke_width: defaults::GLYPH_STROKE_WIDTH,
            glyph_outline: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Segment {
    from: Vec2D,
    to: Vec2D,
    color: String,
}

/// Retained-mode surface that serializes to an SVG document
#[derive(Clone, Debug)]
pub struct SvgSurface {
    viewport: Viewport,
    options: SvgOptions,
    background: Option<String>,
    segments: Vec<Segment>,
    glyph: Option<([Vec2D; 3], String)>,
}

impl SvgSurface {
    pub fn new(viewport: Viewport, options: SvgOptions) -> Self {
        SvgSurface {
            viewport,
            options,
            background: None,
            segments: Vec::new(),
            glyph: None,
        }
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn has_glyph(&self) -> bool {
        self.glyph.is_some()
    }

    /// Build the SVG DOM: background, path segments, then the glyph on top
    pub fn document(&self) -> Document {
        let (width, height) = (self.viewport.width, self.viewport.height);
        let mut doc = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", format!("0 0 {} {}", width, height));

        if let Some(color) = &self.background {
            doc = doc.add(
                Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", width)
                    .set("height", height)
                    .set("fill", color.as_str()),
            );
        }

        for seg in &self.segments {
            doc = doc.add(
                Line::new()
                    .set("x1", seg.from.x)
                    .set("y1", seg.from.y)
                    .set("x2", seg.to.x)
                    .set("y2", seg.to.y)
                    .set("stroke", seg.color.as_str())
                    .set("stroke-width", self.options.stroke_width)
                    .set("stroke-linecap", "round"),
            );
        }

        if let Some((vertices, color)) = &self.glyph {
            let points = vertices
                .iter()
                .map(|v| format!("{},{}", v.x, v.y))
                .collect::<Vec<_>>()
                .join(" ");
            let outline = self.options.glyph_outline.as_deref().unwrap_or(color.as_str());
            doc = doc.add(
                Polygon::new()
                    .set("points", points)
                    .set("fill", color.as_str())
                    .set("stroke", outline)
                    .set("stroke-width", self.options.glyph_stroke_width),
            );
        }

        crate::log::debug!(
            segments = self.segments.len(),
            glyph = self.glyph.is_some(),
            "generate_svg"
        );
        doc
    }

    pub fn to_svg_string(&self) -> String {
        self.document().to_string()
    }
}

impl Surface for SvgSurface {
    fn fill_background(&mut self, color: &str) {
        self.background = Some(color.to_string());
    }

    fn stroke_segment(&mut self, from: Vec2D, to: Vec2D, color: &str) {
        self.segments.push(Segment {
            from,
            to,
            color: color.to_string(),
        });
    }

    fn show_glyph(&mut self, vertices: [Vec2D; 3], color: &str) {
        self.glyph = Some((vertices, color.to_string()));
    }

    fn hide_glyph(&mut self) {
        self.glyph = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> SvgSurface {
        SvgSurface::new(Viewport::new(200.0, 100.0), SvgOptions::default())
    }

    #[test]
    fn empty_document_has_size() {
        let svg = surface().to_svg_string();
        assert!(svg.contains("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 200 100""#), "{svg}");
        assert!(!svg.contains("<line"));
    }

    #[test]
    fn background_segments_and_glyph() {
        let mut s = surface();
        s.fill_background("black");
        s.stroke_segment(Vec2D::new(100.0, 50.0), Vec2D::new(150.0, 50.0), "white");
        s.show_glyph(
            [
                Vec2D::new(1.0, 2.0),
                Vec2D::new(3.0, 4.0),
                Vec2D::new(5.0, 6.0),
            ],
            "white",
        );
        let svg = s.to_svg_string();

        assert!(svg.contains("<rect"));
        assert!(svg.contains(r#"fill="black""#));
        assert_eq!(s.segment_count(), 1);
        assert_eq!(svg.matches("<line").count(), 1);
        assert!(svg.contains(r#"x1="100""#));
        assert!(svg.contains(r#"x2="150""#));
        assert!(svg.contains(r#"points="1,2 3,4 5,6""#), "{svg}");
    }

    #[test]
    fn hide_glyph_removes_polygon() {
        let mut s = surface();
        s.show_glyph([Vec2D::ZERO; 3], "white");
        assert!(s.has_glyph());
        s.hide_glyph();
        assert!(!s.to_svg_string().contains("<polygon"));
    }

    #[test]
    fn background_is_repainted_not_stacked() {
        let mut s = surface();
        s.fill_background("black");
        s.fill_background("navy");
        let svg = s.to_svg_string();
        assert_eq!(svg.matches("<rect").count(), 1);
        assert!(svg.contains(r#"fill="navy""#));
    }
}
