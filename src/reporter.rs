//! Fail-fast error reporting for the parsing engine.
//!
//! The engine never recovers from an error. Whatever signal it raises, the
//! reporter turns it into exactly one [`ParseError`] which the engine returns
//! as the result of the whole parse.

use crate::logging::targets;
use crate::parser_error::{IntegrationFault, ParseError, ParseFailure};
use crate::symbol::ErrorInfo;

/// Message used when the current lookahead cannot be consumed.
pub const SYNTAX_ERROR: &str = "syntax error";

/// The ways the parsing engine can signal that it cannot proceed.
pub enum ErrorSignal<'a> {
    /// A general syntax error with an engine-supplied message.
    Syntax {
        message: &'a str,
        info: &'a dyn ErrorInfo,
    },
    /// The current lookahead token cannot be shifted or reduced.
    CurrentToken { token: &'a dyn ErrorInfo },
    /// An unrecoverable error, e.g. from a semantic action.
    Fatal {
        message: &'a str,
        info: &'a dyn ErrorInfo,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReporterState {
    Running,
    Failed,
}

/// Converts engine error signals into a positioned [`ParseFailure`].
///
/// One reporter belongs to one parse attempt. After the first report it stays
/// `Failed`; there is no way back to `Running`.
#[derive(Debug)]
pub struct PositionedErrorReporter {
    state: ReporterState,
}

impl Default for PositionedErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionedErrorReporter {
    pub fn new() -> Self {
        PositionedErrorReporter {
            state: ReporterState::Running,
        }
    }

    pub fn state(&self) -> ReporterState {
        self.state
    }

    /// Handles an error signal and returns the error that ends the parse.
    ///
    /// Reporting on an already failed reporter means the engine kept driving
    /// after an error, which is an integration fault in itself.
    pub fn report(&mut self, signal: ErrorSignal<'_>) -> ParseError {
        if self.state == ReporterState::Failed {
            let fault = IntegrationFault::new("error reported after parse already failed");
            tracing::warn!(target: targets::REPORTER, %fault, "reporter reused");
            return fault.into();
        }
        self.state = ReporterState::Failed;

        match signal {
            ErrorSignal::Syntax { message, info } => fatal(message, info),
            ErrorSignal::CurrentToken { token } => fatal(SYNTAX_ERROR, token),
            ErrorSignal::Fatal { message, info } => fatal(message, info),
        }
    }
}

fn fatal(message: &str, info: &dyn ErrorInfo) -> ParseError {
    match info.span() {
        Some(span) => {
            let failure = ParseFailure::new(span, message);
            tracing::debug!(
                target: targets::REPORTER,
                start = span.start,
                end = span.end,
                reason = message,
                "parse failed"
            );
            failure.into()
        }
        None => {
            let fault = IntegrationFault::new(format!(
                "positioned symbol expected for error reporting, got instead: {}",
                info
            ));
            tracing::warn!(target: targets::REPORTER, %fault, "error without position");
            fault.into()
        }
    }
}
