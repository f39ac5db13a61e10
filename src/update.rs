//! Updates flowing out of the turtle and the environment.
//!
//! Every mutating operation pushes a [`TurtleUpdate::BeginUpdate`] holding
//! the state before the change, followed by one typed update describing the
//! state after it. Consumers rebuild their own view of the turtle from
//! these alone.

use std::fmt;
use std::sync::mpsc;

use serde::{Deserialize, Serialize};

use crate::types::Vec2D;

/// Snapshot of the turtle's full state
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurtleState {
    /// Position in logical coordinates (origin at the canvas center, y up)
    pub position: Vec2D,
    /// Heading in degrees, counter-clockwise from the positive x-axis.
    /// Accumulates without wrapping.
    pub direction: f64,
    pub is_pen_down: bool,
    pub is_visible: bool,
    pub pen_color: String,
}

impl Default for TurtleState {
    fn default() -> Self {
        TurtleState {
            position: Vec2D::ZERO,
            direction: 0.0,
            is_pen_down: true,
            is_visible: true,
            pen_color: "white".to_string(),
        }
    }
}

/// Updates emitted by the turtle
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum TurtleUpdate {
    /// State before a mutation takes effect
    BeginUpdate(TurtleState),
    Position {
        x: f64,
        y: f64,
    },
    Direction {
        direction: f64,
    },
    #[serde(rename_all = "camelCase")]
    Pen {
        color: String,
        is_pen_down: bool,
    },
    #[serde(rename_all = "camelCase")]
    Visibility {
        is_visible: bool,
    },
}

impl TurtleUpdate {
    /// Whether this update opens a begin/result pair
    pub fn is_begin(&self) -> bool {
        matches!(self, TurtleUpdate::BeginUpdate(_))
    }
}

/// Updates emitted by the environment
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum EnvironmentUpdate {
    BackgroundColor { color: String },
}

/// Any update a view may receive
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "from")]
pub enum Update {
    Turtle(TurtleUpdate),
    Environment(EnvironmentUpdate),
}

impl From<TurtleUpdate> for Update {
    fn from(update: TurtleUpdate) -> Self {
        Update::Turtle(update)
    }
}

impl From<EnvironmentUpdate> for Update {
    fn from(update: EnvironmentUpdate) -> Self {
        Update::Environment(update)
    }
}

impl fmt::Display for TurtleUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurtleUpdate::BeginUpdate(state) => write!(
                f,
                "Turtle.beginUpdate position={} direction={} pen={} visible={} color={}",
                state.position,
                state.direction,
                if state.is_pen_down { "down" } else { "up" },
                state.is_visible,
                state.pen_color
            ),
            TurtleUpdate::Position { x, y } => write!(f, "Turtle.position x={} y={}", x, y),
            TurtleUpdate::Direction { direction } => {
                write!(f, "Turtle.direction direction={}", direction)
            }
            TurtleUpdate::Pen { color, is_pen_down } => {
                write!(f, "Turtle.pen color={} isPenDown={}", color, is_pen_down)
            }
            TurtleUpdate::Visibility { is_visible } => {
                write!(f, "Turtle.visibility isVisible={}", is_visible)
            }
        }
    }
}

impl fmt::Display for EnvironmentUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvironmentUpdate::BackgroundColor { color } => {
                write!(f, "Environment.backgroundColor color={}", color)
            }
        }
    }
}

impl fmt::Display for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Update::Turtle(u) => u.fmt(f),
            Update::Environment(u) => u.fmt(f),
        }
    }
}

/// Destination for updates. The core only ever pushes; it never reads back.
pub trait UpdateSink<T> {
    fn push(&mut self, update: T);
}

/// Discards every update
impl<T> UpdateSink<T> for () {
    fn push(&mut self, _update: T) {}
}

impl<U, T: Into<U>> UpdateSink<T> for Vec<U> {
    fn push(&mut self, update: T) {
        Vec::push(self, update.into());
    }
}

impl<T, S: UpdateSink<T> + ?Sized> UpdateSink<T> for &mut S {
    fn push(&mut self, update: T) {
        (**self).push(update);
    }
}

/// Forwards updates over a channel; a disconnected receiver drops them.
impl<U, T: Into<U>> UpdateSink<T> for mpsc::Sender<U> {
    fn push(&mut self, update: T) {
        if self.send(update.into()).is_err() {
            crate::log::warn!("update receiver disconnected, dropping update");
        }
    }
}
