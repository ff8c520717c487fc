use thiserror::Error;

use crate::lexer::Span;

/// A parse failure caused by the input, with its source location.
///
/// `start..end` is the half-open char range of the offending text and
/// `line`/`col` is the 1-based position of `start`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}:{col}: {message}")]
pub struct ParseFailure {
    start: usize,
    end: usize,
    line: usize,
    col: usize,
    message: String,
}

impl ParseFailure {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        ParseFailure {
            start: span.start,
            end: span.end,
            line: span.line,
            col: span.col,
            message: message.into(),
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Renders the source line holding `start` with a caret underline of the span.
    ///
    /// Spans crossing a line break are underlined up to the end of the first line.
    /// Empty spans (end of input) get a single caret. A token stream that only
    /// tracks offsets leaves `line`/`col` at 0; that renders as the first line.
    pub fn snippet(&self, source: &str) -> String {
        let line_text = source.lines().nth(self.line.saturating_sub(1)).unwrap_or("");
        let width = line_text.chars().count();
        let indent = self.col.saturating_sub(1).min(width);
        let carets = self
            .end
            .saturating_sub(self.start)
            .min(width - indent)
            .max(1);

        format!("{}\n{}{}", line_text, " ".repeat(indent), "^".repeat(carets))
    }
}

/// The token stream and the parsing engine disagreed about their contract:
/// an error reached the reporter without any position attached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("internal error: {message}")]
pub struct IntegrationFault {
    pub message: String,
}

impl IntegrationFault {
    pub fn new(message: impl Into<String>) -> Self {
        IntegrationFault {
            message: message.into(),
        }
    }
}

/// Outcome of a failed parse attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Malformed input.
    #[error(transparent)]
    Failure(#[from] ParseFailure),

    /// Bug in how the lexer and parser are wired together.
    #[error(transparent)]
    Integration(#[from] IntegrationFault),
}

impl ParseError {
    pub fn as_failure(&self) -> Option<&ParseFailure> {
        match self {
            ParseError::Failure(failure) => Some(failure),
            ParseError::Integration(_) => None,
        }
    }

    pub fn is_integration_fault(&self) -> bool {
        matches!(self, ParseError::Integration(_))
    }
}
