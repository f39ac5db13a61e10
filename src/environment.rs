//! The space the turtle lives in: canvas size, background color and the
//! mapping from logical coordinates to canvas pixels.

use serde::{Deserialize, Serialize};

use crate::types::Vec2D;
use crate::update::{EnvironmentUpdate, UpdateSink};

pub const DEFAULT_WIDTH: f64 = 768.0;
pub const DEFAULT_HEIGHT: f64 = 400.0;
pub const DEFAULT_BACKGROUND: &str = "black";

/// Construction parameters for an [`Environment`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnvironmentConfig {
    pub width: f64,
    pub height: f64,
    pub background_color: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        EnvironmentConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            background_color: DEFAULT_BACKGROUND.to_string(),
        }
    }
}

/// Canvas dimensions, and the only implementation of the logical → canvas
/// transform. Renderers hold a copy instead of reimplementing it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Viewport { width, height }
    }

    /// Map logical coordinates (origin at center, y up) to canvas
    /// coordinates (origin top-left, y down).
    pub fn transform(&self, position: Vec2D) -> Vec2D {
        Vec2D::new(position.x + self.width / 2.0, self.height / 2.0 - position.y)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

pub struct Environment<S> {
    viewport: Viewport,
    background_color: String,
    output: S,
}

impl<S: UpdateSink<EnvironmentUpdate>> Environment<S> {
    /// Create an environment with default size and background
    pub fn new(output: S) -> Self {
        Self::with_config(output, EnvironmentConfig::default())
    }

    pub fn with_config(output: S, config: EnvironmentConfig) -> Self {
        crate::log::debug!(
            width = config.width,
            height = config.height,
            background = %config.background_color,
            "environment created"
        );
        Environment {
            viewport: Viewport::new(config.width, config.height),
            background_color: config.background_color,
            output,
        }
    }

    pub fn width(&self) -> f64 {
        self.viewport.width
    }

    pub fn height(&self) -> f64 {
        self.viewport.height
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn background_color(&self) -> &str {
        &self.background_color
    }

    /// Change the background color and announce it
    pub fn set_background_color(&mut self, color: impl Into<String>) {
        self.background_color = color.into();
        crate::log::debug!(color = %self.background_color, "background color changed");
        self.output.push(EnvironmentUpdate::BackgroundColor {
            color: self.background_color.clone(),
        });
    }

    /// See [`Viewport::transform`]
    pub fn transform(&self, position: impl Into<Vec2D>) -> Vec2D {
        self.viewport.transform(position.into())
    }

    /// Give back the sink
    pub fn into_output(self) -> S {
        self.output
    }
}
