//! Values the parsing engine can hand to the error reporter.
//!
//! Only some of them know where they came from in the source. The reporter
//! asks through [`ErrorInfo::span`] instead of assuming.

use std::fmt;

use crate::lexer::{Span, Spanned};
use crate::token::Token;

/// Anything that may be attached to an error signal.
pub trait ErrorInfo: fmt::Display {
    /// Source span of this value, if it has one.
    fn span(&self) -> Option<Span>;
}

impl ErrorInfo for Spanned {
    fn span(&self) -> Option<Span> {
        Some(self.span)
    }
}

impl ErrorInfo for str {
    fn span(&self) -> Option<Span> {
        None
    }
}

impl ErrorInfo for String {
    fn span(&self) -> Option<Span> {
        None
    }
}

impl<T: ErrorInfo + ?Sized> ErrorInfo for &T {
    fn span(&self) -> Option<Span> {
        (**self).span()
    }
}

/// A grammar symbol with no source location.
///
/// The engine builds one when it has to name a symbol the token stream never
/// produced, such as the end of input after the stream ran dry.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub token: Token,
}

impl Symbol {
    pub fn new(token: Token) -> Self {
        Symbol { token }
    }

    pub fn eof() -> Self {
        Symbol::new(Token::Eof)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "symbol {}", self.token)
    }
}

impl ErrorInfo for Symbol {
    fn span(&self) -> Option<Span> {
        None
    }
}
