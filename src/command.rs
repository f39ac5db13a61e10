//! Commands flowing into the turtle.
//!
//! [`RawCommand`] is the wire shape, `{target, type, data?}`, as produced by an
//! input layer. [`Command`] is the typed form the turtle dispatches on. The
//! only fallible step is going from one to the other.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::TurtleError;

/// The component a command is addressed to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Target {
    #[default]
    Turtle,
    Environment,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Turtle => write!(f, "Turtle"),
            Target::Environment => write!(f, "Environment"),
        }
    }
}

/// Every command tag the turtle accepts, in wire form.
pub const TURTLE_COMMANDS: [&str; 6] = ["fd", "bk", "lt", "rt", "pu", "pd"];

/// A command as received from an input layer, before validation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawCommand {
    pub target: Target,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<f64>,
}

impl RawCommand {
    pub fn new(kind: impl Into<String>, data: Option<f64>) -> Self {
        RawCommand {
            target: Target::Turtle,
            kind: kind.into(),
            data,
        }
    }
}

/// A validated turtle command. Angles are in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    Forward(f64),
    Backward(f64),
    Left(f64),
    Right(f64),
    PenUp,
    PenDown,
}

impl Command {
    /// Build a command from its wire tag. A missing payload on a numeric
    /// command counts as zero; a payload on `pu`/`pd` is ignored.
    pub fn from_tag(tag: &str, data: Option<f64>) -> Result<Command, TurtleError> {
        let value = data.unwrap_or(0.0);
        match tag {
            "fd" => Ok(Command::Forward(value)),
            "bk" => Ok(Command::Backward(value)),
            "lt" => Ok(Command::Left(value)),
            "rt" => Ok(Command::Right(value)),
            "pu" => Ok(Command::PenUp),
            "pd" => Ok(Command::PenDown),
            other => Err(TurtleError::UnsupportedCommand {
                kind: other.to_string(),
            }),
        }
    }

    /// The wire tag for this command
    pub fn tag(&self) -> &'static str {
        match self {
            Command::Forward(_) => "fd",
            Command::Backward(_) => "bk",
            Command::Left(_) => "lt",
            Command::Right(_) => "rt",
            Command::PenUp => "pu",
            Command::PenDown => "pd",
        }
    }

    /// The numeric payload, if the command carries one
    pub fn data(&self) -> Option<f64> {
        match *self {
            Command::Forward(v) | Command::Backward(v) | Command::Left(v) | Command::Right(v) => {
                Some(v)
            }
            Command::PenUp | Command::PenDown => None,
        }
    }

    pub fn to_raw(&self) -> RawCommand {
        RawCommand::new(self.tag(), self.data())
    }
}

impl TryFrom<&RawCommand> for Command {
    type Error = TurtleError;

    fn try_from(raw: &RawCommand) -> Result<Command, TurtleError> {
        if raw.target != Target::Turtle {
            return Err(TurtleError::UnsupportedTarget { target: raw.target });
        }
        Command::from_tag(&raw.kind, raw.data)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.data() {
            Some(v) => write!(f, "{} {}", self.tag(), v),
            None => write!(f, "{}", self.tag()),
        }
    }
}
