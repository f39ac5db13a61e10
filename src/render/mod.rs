//! Rendering: the consumer side of the update stream.
//!
//! This module is organized into submodules:
//! - `defaults`: Default sizes and settings
//! - `surface`: The `Surface` drawing abstraction and a recording surface
//! - `svg`: SVG generation
//!
//! A [`Renderer`] never looks at the turtle. It keeps a [`TurtleView`] built
//! only from received updates and converts coordinates through the
//! environment's [`Viewport`].

pub mod defaults;
pub mod surface;
pub mod svg;

pub use self::svg::{SvgOptions, SvgSurface};
pub use surface::{AnySurface, DrawOp, RecordingSurface, Surface};

use std::f64::consts::PI;

use crate::environment::Viewport;
use crate::types::{Angle, Vec2D};
use crate::update::{EnvironmentUpdate, TurtleState, TurtleUpdate, Update};

/// What a renderer believes about the world
#[derive(Clone, Debug, PartialEq)]
pub struct TurtleView {
    pub turtle: TurtleState,
    pub background_color: String,
}

/// Vertices of the turtle marker in logical coordinates: an equilateral
/// triangle centered on the turtle with its tip along the heading.
pub fn glyph_vertices(position: Vec2D, direction: f64, radius: f64) -> [Vec2D; 3] {
    let heading = Vec2D::X.rotate_by(Angle::degrees(direction)) * radius;
    [
        position + heading,
        position + heading.rotate(2.0 * PI / 3.0),
        position + heading.rotate(-2.0 * PI / 3.0),
    ]
}

pub struct Renderer<S> {
    viewport: Viewport,
    view: TurtleView,
    surface: S,
}

impl<S: Surface> Renderer<S> {
    /// Start from a known initial state and paint it
    pub fn new(
        viewport: Viewport,
        turtle: TurtleState,
        background_color: impl Into<String>,
        surface: S,
    ) -> Self {
        let mut renderer = Renderer {
            viewport,
            view: TurtleView {
                turtle,
                background_color: background_color.into(),
            },
            surface,
        };
        renderer
            .surface
            .fill_background(&renderer.view.background_color);
        renderer.refresh_glyph();
        renderer
    }

    pub fn view(&self) -> &TurtleView {
        &self.view
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Fold one update into the view and draw its effect
    pub fn apply(&mut self, update: &Update) {
        match update {
            Update::Turtle(update) => {
                self.apply_turtle(update);
                self.refresh_glyph();
            }
            Update::Environment(EnvironmentUpdate::BackgroundColor { color }) => {
                self.view.background_color = color.clone();
                self.surface.fill_background(color);
            }
        }
    }

    fn apply_turtle(&mut self, update: &TurtleUpdate) {
        let state = &mut self.view.turtle;
        match update {
            TurtleUpdate::BeginUpdate(before) => {
                // The pre-image is authoritative; resync in case updates
                // were missed.
                *state = before.clone();
            }
            TurtleUpdate::Position { x, y } => {
                let to = Vec2D::new(*x, *y);
                if state.is_pen_down {
                    let from = self.viewport.transform(state.position);
                    let to = self.viewport.transform(to);
                    crate::log::trace!(%from, %to, "segment");
                    self.surface.stroke_segment(from, to, &state.pen_color);
                }
                state.position = to;
            }
            TurtleUpdate::Direction { direction } => state.direction = *direction,
            TurtleUpdate::Pen { color, is_pen_down } => {
                state.pen_color = color.clone();
                state.is_pen_down = *is_pen_down;
            }
            TurtleUpdate::Visibility { is_visible } => state.is_visible = *is_visible,
        }
    }

    fn refresh_glyph(&mut self) {
        let state = &self.view.turtle;
        if state.is_visible {
            let vertices = glyph_vertices(state.position, state.direction, defaults::GLYPH_RADIUS)
                .map(|v| self.viewport.transform(v));
            self.surface.show_glyph(vertices, &state.pen_color);
        } else {
            self.surface.hide_glyph();
        }
    }
}
