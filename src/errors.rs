//! Error types with rich diagnostics using miette
//!
//! Command errors are protocol errors raised by the turtle; script errors
//! carry source spans so the offending text can be pointed at.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::command::Target;

// ============================================================================
// Command Errors
// ============================================================================

/// Errors raised while dispatching a command to the turtle
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum TurtleError {
    #[error("unsupported command: {kind}")]
    #[diagnostic(
        code(turtle_canvas::command::unsupported),
        help("the turtle understands fd, bk, lt, rt, pu and pd")
    )]
    UnsupportedCommand { kind: String },

    #[error("command addressed to {target}, not the turtle")]
    #[diagnostic(code(turtle_canvas::command::unsupported_target))]
    UnsupportedTarget { target: Target },
}

// ============================================================================
// Script Errors
// ============================================================================

/// Errors that occur while parsing or running a command script
#[derive(Error, Diagnostic, Debug)]
pub enum ScriptError {
    #[error("syntax error: {message}")]
    #[diagnostic(code(turtle_canvas::script::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("invalid number: {text}")]
    #[diagnostic(code(turtle_canvas::script::invalid_number))]
    InvalidNumber {
        text: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("not a number")]
        span: SourceSpan,
    },

    #[error("unsupported command: {kind}")]
    #[diagnostic(
        code(turtle_canvas::script::unsupported_command),
        help("use fd, bk, lt, rt, pu or pd (or forward, back, left, right, penup, pendown)")
    )]
    UnsupportedCommand {
        kind: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown command")]
        span: SourceSpan,
    },
}
