//! A turtle-graphics core.
//!
//! A [`Turtle`] owns a pose and pushes a typed update for every state
//! change. An [`Environment`] holds the canvas size and background and owns
//! the logical → canvas transform. Renderers subscribe to the update
//! stream and keep their own view of the turtle; they never reach into it.
//!
//! ```
//! let svg = turtle_canvas::render_script("square", "fd 100; lt 90; fd 100").unwrap();
//! assert!(svg.contains("<svg"));
//! ```

use pest_derive::Parser;

pub mod command;
pub mod environment;
pub mod errors;
pub mod log;
pub mod render;
pub mod script;
pub mod session;
pub mod stream;
pub mod turtle;
pub mod types;
pub mod update;

pub use command::{Command, RawCommand, Target};
pub use environment::{Environment, EnvironmentConfig, Viewport};
pub use errors::{ScriptError, TurtleError};
pub use session::Session;
pub use stream::{Stream, SubscriptionId};
pub use turtle::Turtle;
pub use types::{Angle, AngleUnit, NumericError, PolarPoint, Vec2D};
pub use update::{EnvironmentUpdate, TurtleState, TurtleUpdate, Update, UpdateSink};

#[derive(Parser)]
#[grammar = "turtle.pest"]
pub struct TurtleScriptParser;

/// Run a command script on a fresh default session and render it to SVG.
pub fn render_script(name: &str, source: &str) -> Result<String, miette::Report> {
    let mut session = Session::new(EnvironmentConfig::default());
    session.run_script(name, source)?;
    Ok(session.render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pest::Parser;

    #[test]
    fn parse_single_command() {
        let result = TurtleScriptParser::parse(Rule::program, "fd 100");
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_command_without_number() {
        let result = TurtleScriptParser::parse(Rule::program, "pu");
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_trailing_separators() {
        let result = TurtleScriptParser::parse(Rule::program, "fd 1;;\n\n");
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_comment_only() {
        let result = TurtleScriptParser::parse(Rule::program, "# just a comment");
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_number_rule() {
        for input in ["1", "-1.5", "+2", ".25", "1e-3", "6.02E23"] {
            let result = TurtleScriptParser::parse(Rule::number, input);
            assert!(result.is_ok(), "Failed to parse number {input:?}: {:?}", result.err());
        }
    }

    #[test]
    fn reject_bare_number() {
        let result = TurtleScriptParser::parse(Rule::program, "100");
        assert!(result.is_err());
    }

    #[test]
    fn reject_word_after_number() {
        let result = TurtleScriptParser::parse(Rule::program, "fd 10 lt");
        assert!(result.is_err());
    }

    #[test]
    fn render_script_reports_unknown_commands() {
        let err = render_script("bad", "fd 10\nspin 3").unwrap_err();
        assert!(err.to_string().contains("spin"), "{err}");
    }
}
