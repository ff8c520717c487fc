use std::collections::HashSet;

use crate::catalog::{Catalog, Comments, PoEntry};
use crate::lexer::{Lexer, Spanned};
use crate::logging::targets;
use crate::parser_error::ParseError;
use crate::reporter::{ErrorSignal, PositionedErrorReporter};
use crate::symbol::Symbol;
use crate::token::{CommentKind, Token};

/// Parser states. Each names what the engine has just consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between entries; comments, `msgctxt`, `msgid` or EOF may follow.
    Start,
    Context,
    ContextText,
    Id,
    IdText,
    Plural,
    PluralText,
    Translation,
    TranslationText,
    Form,
    FormText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Shift(State),
    /// Complete the pending entry, then look at the same token again.
    Reduce,
    Accept,
    Error,
}

/// The action table of the PO grammar:
///
/// ```text
/// catalog := entry* EOF
/// entry   := comment* [msgctxt STR+] msgid STR+ (msgstr STR+ | msgid_plural STR+ form+)
/// form    := msgstr[N] STR+
/// ```
fn action(state: State, token: &Token) -> Action {
    use Action::*;
    use State::*;

    let entry_boundary = matches!(
        token,
        Token::Comment(..) | Token::Msgctxt | Token::Msgid | Token::Eof
    );

    match (state, token) {
        (Start, Token::Comment(..)) => Shift(Start),
        (Start, Token::Msgctxt) => Shift(Context),
        (Start, Token::Msgid) => Shift(Id),
        (Start, Token::Eof) => Accept,

        (Context | ContextText, Token::Str(_)) => Shift(ContextText),
        (ContextText, Token::Msgid) => Shift(Id),

        (Id | IdText, Token::Str(_)) => Shift(IdText),
        (IdText, Token::Msgstr) => Shift(Translation),
        (IdText, Token::MsgidPlural) => Shift(Plural),

        (Plural | PluralText, Token::Str(_)) => Shift(PluralText),
        (PluralText, Token::MsgstrIndexed(_)) => Shift(Form),

        (Translation | TranslationText, Token::Str(_)) => Shift(TranslationText),
        (TranslationText, _) if entry_boundary => Reduce,

        (Form | FormText, Token::Str(_)) => Shift(FormText),
        (FormText, Token::MsgstrIndexed(_)) => Shift(Form),
        (FormText, _) if entry_boundary => Reduce,

        _ => Error,
    }
}

/// Entry being assembled by the semantic actions.
#[derive(Debug, Default)]
struct PendingEntry {
    comments: Comments,
    context: Option<String>,
    id: String,
    /// The `msgid` keyword, kept for locating entry-level errors.
    id_token: Option<Spanned>,
    plural_id: Option<String>,
    translations: Vec<String>,
}

/// Table-driven parser for PO catalogs.
///
/// Tokens are pulled one at a time from any iterator of `Spanned`, which must
/// end with `Token::Eof`. The first error ends the parse: there is no
/// recovery, and the error comes out of `parse` as the only result.
pub struct Parser<I> {
    tokens: I,
    state: State,
    reporter: PositionedErrorReporter,
    pending: PendingEntry,
    seen: HashSet<(Option<String>, String)>,
    catalog: Catalog,
}

impl<I: Iterator<Item = Spanned>> Parser<I> {
    /// Creates a parser over a token stream.
    ///
    /// Obsolete (`#~`) comment lines are skipped.
    pub fn new<T>(tokens: T) -> Self
    where
        T: IntoIterator<Item = Spanned, IntoIter = I>,
    {
        Parser {
            tokens: tokens.into_iter(),
            state: State::Start,
            reporter: PositionedErrorReporter::new(),
            pending: PendingEntry::default(),
            seen: HashSet::new(),
            catalog: Catalog::new(),
        }
    }

    fn next_token(&mut self) -> Option<Spanned> {
        self.tokens.by_ref().find(|t| !t.token.is_obsolete())
    }

    /// Parses the whole token stream into a catalog.
    pub fn parse(mut self) -> Result<Catalog, ParseError> {
        self.run()?;
        Ok(self.catalog)
    }

    /// Drives the state machine until it accepts or the reporter fails it.
    fn run(&mut self) -> Result<(), ParseError> {
        loop {
            let Some(spanned) = self.next_token() else {
                // The stream broke its contract: no EOF sentinel, so there is
                // no position to blame.
                let eof = Symbol::eof();
                return Err(self.reporter.report(ErrorSignal::Fatal {
                    message: "unexpected end of token stream",
                    info: &eof,
                }));
            };

            loop {
                let next = action(self.state, &spanned.token);
                tracing::trace!(
                    target: targets::PARSER,
                    state = ?self.state,
                    token = %spanned.token,
                    action = ?next,
                    "step"
                );

                match next {
                    Action::Shift(state) => {
                        self.shift(&spanned, state)?;
                        self.state = state;
                        break;
                    }
                    Action::Reduce => {
                        self.reduce()?;
                        self.state = State::Start;
                    }
                    Action::Accept => {
                        tracing::debug!(
                            target: targets::PARSER,
                            entries = self.catalog.len(),
                            "accepted"
                        );
                        return Ok(());
                    }
                    Action::Error => {
                        return Err(self
                            .reporter
                            .report(ErrorSignal::CurrentToken { token: &spanned }));
                    }
                }
            }
        }
    }

    /// Semantic action for shifting `spanned` into state `next`.
    fn shift(&mut self, spanned: &Spanned, next: State) -> Result<(), ParseError> {
        let pending = &mut self.pending;
        match &spanned.token {
            Token::Comment(kind, text) => push_comment(&mut pending.comments, *kind, text),
            Token::Msgctxt => pending.context = Some(String::new()),
            Token::Msgid => pending.id_token = Some(spanned.clone()),
            Token::MsgidPlural => pending.plural_id = Some(String::new()),
            Token::Msgstr => pending.translations.push(String::new()),
            Token::MsgstrIndexed(n) => {
                let expected = pending.translations.len();
                if *n as usize != expected {
                    let message = format!("expected msgstr[{}]", expected);
                    return Err(self.reporter.report(ErrorSignal::Syntax {
                        message: &message,
                        info: spanned,
                    }));
                }
                pending.translations.push(String::new());
            }
            Token::Str(s) => {
                let target = match next {
                    State::ContextText => pending.context.as_mut(),
                    State::IdText => Some(&mut pending.id),
                    State::PluralText => pending.plural_id.as_mut(),
                    State::TranslationText | State::FormText => pending.translations.last_mut(),
                    _ => None,
                };
                match target {
                    Some(text) => text.push_str(s),
                    None => {
                        return Err(self.reporter.report(ErrorSignal::Fatal {
                            message: "string shifted outside of an entry field",
                            info: &Symbol::new(spanned.token.clone()),
                        }));
                    }
                }
            }
            Token::Unknown(_) | Token::Eof => {}
        }
        Ok(())
    }

    /// Semantic action completing the pending entry.
    fn reduce(&mut self) -> Result<(), ParseError> {
        let pending = std::mem::take(&mut self.pending);

        let Some(id_token) = pending.id_token else {
            return Err(self.reporter.report(ErrorSignal::Fatal {
                message: "entry reduced without msgid",
                info: &Symbol::new(Token::Msgid),
            }));
        };

        let key = (pending.context.clone(), pending.id.clone());
        if !self.seen.insert(key) {
            return Err(self.reporter.report(ErrorSignal::Fatal {
                message: "duplicate entry",
                info: &id_token,
            }));
        }

        tracing::debug!(
            target: targets::PARSER,
            id = %pending.id,
            context = ?pending.context,
            forms = pending.translations.len(),
            "reduced entry"
        );

        self.catalog.entries.push(PoEntry {
            context: pending.context,
            id: pending.id,
            plural_id: pending.plural_id,
            translations: pending.translations,
            comments: pending.comments,
            start: id_token.span.start,
            end: id_token.span.end,
        });
        Ok(())
    }
}

fn push_comment(comments: &mut Comments, kind: CommentKind, text: &str) {
    match kind {
        CommentKind::Translator => comments.translator.push(text.to_string()),
        CommentKind::Extracted => comments.extracted.push(text.to_string()),
        CommentKind::Reference => comments.references.push(text.to_string()),
        CommentKind::Flags => comments.flags.extend(
            text.split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string),
        ),
        CommentKind::Previous => comments.previous.push(text.to_string()),
        CommentKind::Obsolete => {}
    }
}

/// Lexes and parses a PO source.
pub fn parse_str(source: &str) -> Result<Catalog, ParseError> {
    Parser::new(Lexer::new(source)).parse()
}
