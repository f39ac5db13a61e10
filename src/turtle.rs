//! The turtle state machine.
//!
//! The turtle owns its pose, pen and visibility. Each mutating operation
//! follows the same protocol: push a [`TurtleUpdate::BeginUpdate`] with the
//! state as it was, apply the change, then push one update describing the
//! result. `move_to` is the exception: it is the primitive `forward` builds
//! on and emits only the resulting position.

use crate::command::{Command, RawCommand};
use crate::errors::TurtleError;
use crate::types::{Angle, Vec2D};
use crate::update::{TurtleState, TurtleUpdate, UpdateSink};

pub struct Turtle<S> {
    position: Vec2D,
    direction: f64,
    is_pen_down: bool,
    is_visible: bool,
    pen_color: String,
    output: S,
}

impl<S: UpdateSink<TurtleUpdate>> Turtle<S> {
    /// Create a turtle at the origin, facing along +x, pen down and visible
    pub fn new(output: S) -> Self {
        Self::with_state(output, TurtleState::default())
    }

    /// Create a turtle with an explicit initial state. Nothing is emitted.
    pub fn with_state(output: S, state: TurtleState) -> Self {
        Turtle {
            position: state.position,
            direction: state.direction,
            is_pen_down: state.is_pen_down,
            is_visible: state.is_visible,
            pen_color: state.pen_color,
            output,
        }
    }

    /// An owned snapshot of the current state
    pub fn state(&self) -> TurtleState {
        TurtleState {
            position: self.position,
            direction: self.direction,
            is_pen_down: self.is_pen_down,
            is_visible: self.is_visible,
            pen_color: self.pen_color.clone(),
        }
    }

    pub fn position(&self) -> Vec2D {
        self.position
    }

    pub fn direction(&self) -> f64 {
        self.direction
    }

    /// Give back the sink
    pub fn into_output(self) -> S {
        self.output
    }

    fn begin_update(&mut self) {
        let state = self.state();
        self.output.push(TurtleUpdate::BeginUpdate(state));
    }

    /// Place the turtle at `point` without a begin update.
    pub fn move_to(&mut self, point: impl Into<Vec2D>) {
        self.position = point.into();
        crate::log::trace!(x = self.position.x, y = self.position.y, "move_to");
        self.output.push(TurtleUpdate::Position {
            x: self.position.x,
            y: self.position.y,
        });
    }

    /// Move `length` units along the current heading. NaN is ignored.
    pub fn forward(&mut self, length: f64) {
        if length.is_nan() {
            crate::log::warn!("forward: ignoring NaN length");
            return;
        }

        self.begin_update();
        let heading = Vec2D::X.rotate_by(Angle::degrees(self.direction));
        let offset = heading * length;
        crate::log::debug!(length, direction = self.direction, "forward");
        self.move_to(self.position + offset);
    }

    pub fn backwards(&mut self, length: f64) {
        self.forward(-length);
    }

    /// Turn counter-clockwise by `angle` degrees
    pub fn rotate_left(&mut self, angle: f64) {
        self.rotate_left_by(Angle::degrees(angle));
    }

    /// Turn clockwise by `angle` degrees
    pub fn rotate_right(&mut self, angle: f64) {
        self.rotate_left_by(-Angle::degrees(angle));
    }

    /// Turn counter-clockwise. The increment is reduced modulo 360 before it
    /// is added; the accumulated heading itself is never wrapped.
    pub fn rotate_left_by(&mut self, angle: Angle) {
        if angle.is_nan() {
            crate::log::warn!("rotate: ignoring NaN angle");
            return;
        }

        self.begin_update();
        self.direction += angle.to_degrees() % 360.0;
        crate::log::debug!(%angle, direction = self.direction, "rotate");
        self.output.push(TurtleUpdate::Direction {
            direction: self.direction,
        });
    }

    pub fn rotate_right_by(&mut self, angle: Angle) {
        self.rotate_left_by(-angle);
    }

    pub fn pen_up(&mut self) {
        self.set_pen(false);
    }

    pub fn pen_down(&mut self) {
        self.set_pen(true);
    }

    fn set_pen(&mut self, down: bool) {
        self.begin_update();
        self.is_pen_down = down;
        crate::log::debug!(down, "pen");
        self.emit_pen();
    }

    /// Change the pen color; later segments are drawn with it
    pub fn set_pen_color(&mut self, color: impl Into<String>) {
        self.begin_update();
        self.pen_color = color.into();
        crate::log::debug!(color = %self.pen_color, "pen color");
        self.emit_pen();
    }

    fn emit_pen(&mut self) {
        self.output.push(TurtleUpdate::Pen {
            color: self.pen_color.clone(),
            is_pen_down: self.is_pen_down,
        });
    }

    pub fn make_visible(&mut self) {
        self.set_visible(true);
    }

    pub fn make_invisible(&mut self) {
        self.set_visible(false);
    }

    fn set_visible(&mut self, visible: bool) {
        self.begin_update();
        self.is_visible = visible;
        crate::log::debug!(visible, "visibility");
        self.output.push(TurtleUpdate::Visibility {
            is_visible: self.is_visible,
        });
    }

    /// Run a validated command
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Forward(length) => self.forward(length),
            Command::Backward(length) => self.backwards(length),
            Command::Left(angle) => self.rotate_left(angle),
            Command::Right(angle) => self.rotate_right(angle),
            Command::PenUp => self.pen_up(),
            Command::PenDown => self.pen_down(),
        }
    }

    /// Validate and run a command from an input layer
    pub fn handle_command(&mut self, command: &RawCommand) -> Result<(), TurtleError> {
        let command = Command::try_from(command)?;
        self.apply(command);
        Ok(())
    }
}
