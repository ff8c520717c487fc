//! Parser for gettext PO catalogs.
//!
//! Parsing is fail-fast: the first malformed token ends the parse with a
//! [`ParseFailure`] pointing at its exact span. An error that reaches the
//! reporter without a position is a lexer/parser wiring bug and comes out as
//! an [`IntegrationFault`] instead.

pub mod catalog;
pub mod lexer;
pub mod logging;
pub mod parser;
pub mod parser_error;
pub mod reporter;
pub mod symbol;
pub mod token;
pub mod token_dumper;

pub use catalog::{Catalog, CatalogError, Comments, PoEntry};
pub use lexer::{Lexer, Span, Spanned};
pub use parser::{Parser, parse_str};
pub use parser_error::{IntegrationFault, ParseError, ParseFailure};
pub use reporter::{ErrorSignal, PositionedErrorReporter, ReporterState};
pub use symbol::{ErrorInfo, Symbol};
pub use token::{CommentKind, Token};
