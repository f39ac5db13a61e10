//! Command scripts: the text front end for the turtle.
//!
//! A script is a sequence of commands, one per line or separated by `;`,
//! with `#` comments. Words are case-insensitive and the long spellings
//! (`forward`, `back`, `left`, `right`, `penup`, `pendown`) are accepted as
//! aliases for the wire tags. A numeric command without a number moves or
//! turns by zero.

use miette::{NamedSource, SourceSpan};
use pest::Parser;
use pest::iterators::Pair;

use crate::command::{Command, RawCommand};
use crate::errors::{ScriptError, TurtleError};
use crate::turtle::Turtle;
use crate::update::{TurtleUpdate, UpdateSink};
use crate::{Rule, TurtleScriptParser};

/// A parsed command and where it came from
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptCommand {
    pub command: RawCommand,
    pub span: SourceSpan,
    /// Span of the command word alone
    pub word_span: SourceSpan,
}

/// Map long spellings onto wire tags. Unknown words pass through unchanged.
fn canonical_tag(word: &str) -> String {
    let word = word.to_ascii_lowercase();
    let tag = match word.as_str() {
        "forward" => "fd",
        "back" | "backward" | "backwards" => "bk",
        "left" => "lt",
        "right" => "rt",
        "penup" => "pu",
        "pendown" => "pd",
        _ => return word,
    };
    tag.to_string()
}

fn span_of(pair: &Pair<Rule>) -> SourceSpan {
    let span = pair.as_span();
    (span.start(), span.end() - span.start()).into()
}

/// Parse a script into raw commands without validating the command words.
pub fn parse(name: &str, source: &str) -> Result<Vec<ScriptCommand>, ScriptError> {
    let pairs = TurtleScriptParser::parse(Rule::program, source).map_err(|e| {
        let offset = match e.location {
            pest::error::InputLocation::Pos(p) => p,
            pest::error::InputLocation::Span((start, _)) => start,
        };
        ScriptError::Syntax {
            message: e.variant.message().to_string(),
            src: NamedSource::new(name, source.to_string()),
            span: (offset, 0).into(),
        }
    })?;

    let mut commands = Vec::new();
    for pair in pairs {
        if pair.as_rule() != Rule::program {
            continue;
        }
        for inner in pair.into_inner() {
            if inner.as_rule() == Rule::command {
                commands.push(parse_command(name, source, inner)?);
            }
        }
    }

    crate::log::debug!(count = commands.len(), name, "parsed script");
    Ok(commands)
}

fn parse_command(name: &str, source: &str, pair: Pair<Rule>) -> Result<ScriptCommand, ScriptError> {
    let span = span_of(&pair);
    let mut word = None;
    let mut data = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::word => word = Some((canonical_tag(inner.as_str()), span_of(&inner))),
            Rule::number => {
                let text = inner.as_str();
                // Literals past f64 range parse as infinity; reject them here
                // so the turtle only ever sees finite values.
                let value = text
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| ScriptError::InvalidNumber {
                        text: text.to_string(),
                        src: NamedSource::new(name, source.to_string()),
                        span: span_of(&inner),
                    })?;
                data = Some(value);
            }
            _ => {}
        }
    }

    // The grammar guarantees a word in every command.
    let (kind, word_span) = word.unwrap_or_else(|| (String::new(), span));
    Ok(ScriptCommand {
        command: RawCommand::new(kind, data),
        span,
        word_span,
    })
}

/// Parse and validate a script into typed commands.
pub fn compile(name: &str, source: &str) -> Result<Vec<Command>, ScriptError> {
    parse(name, source)?
        .iter()
        .map(|sc| validate(name, source, sc))
        .collect()
}

fn validate(name: &str, source: &str, sc: &ScriptCommand) -> Result<Command, ScriptError> {
    Command::try_from(&sc.command).map_err(|e| {
        let kind = match e {
            TurtleError::UnsupportedCommand { kind } => kind,
            TurtleError::UnsupportedTarget { .. } => sc.command.kind.clone(),
        };
        ScriptError::UnsupportedCommand {
            kind,
            src: NamedSource::new(name, source.to_string()),
            span: sc.word_span,
        }
    })
}

/// Run a script against a turtle.
///
/// The whole script is validated first; on error the turtle is untouched.
/// Returns the number of commands applied.
pub fn run<S>(name: &str, source: &str, turtle: &mut Turtle<S>) -> Result<usize, ScriptError>
where
    S: UpdateSink<TurtleUpdate>,
{
    let commands = compile(name, source)?;
    for command in &commands {
        crate::log::trace!(%command, "script command");
        turtle.apply(*command);
    }
    Ok(commands.len())
}
