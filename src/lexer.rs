use crate::token::{CommentKind, Token};

/// Location of a token in the source.
///
/// `start` and `end` are char offsets forming the half-open range `[start, end)`.
/// `line` and `col` are the 1-based position of `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub span: Span,
}

impl std::fmt::Display for Spanned {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{} ({}:{})",
            self.token, self.span.start, self.span.end, self.span.line, self.span.col
        )
    }
}

/// Pull-based scanner for PO catalogs.
///
/// The lexer never fails: text it cannot make sense of is handed to the parser
/// as `Token::Unknown` with its exact span, so the parser reports it.
pub struct Lexer {
    source: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
    done: bool,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Lexer {
            source: source.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
            done: false,
        }
    }

    fn current(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.current();
        if ch == Some('\n') {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        self.pos += 1;
        ch
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn text(&self, start: usize) -> String {
        self.source[start..self.pos].iter().collect()
    }

    fn read_comment(&mut self) -> Token {
        self.advance(); // '#'
        let kind = match self.current() {
            Some('.') => CommentKind::Extracted,
            Some(':') => CommentKind::Reference,
            Some(',') => CommentKind::Flags,
            Some('|') => CommentKind::Previous,
            Some('~') => CommentKind::Obsolete,
            _ => CommentKind::Translator,
        };
        if kind != CommentKind::Translator {
            self.advance();
        }

        let mut comment = String::new();
        while let Some(ch) = self.current() {
            if ch == '\n' {
                break;
            }
            comment.push(ch);
            self.advance();
        }
        Token::Comment(kind, comment.trim().to_string())
    }

    fn read_string(&mut self) -> Token {
        let start = self.pos;
        self.advance(); // opening quote

        let mut string = String::new();
        let mut valid = true;
        loop {
            match self.current() {
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    match self.current() {
                        Some('n') => string.push('\n'),
                        Some('t') => string.push('\t'),
                        Some('r') => string.push('\r'),
                        Some('a') => string.push('\u{07}'),
                        Some('b') => string.push('\u{08}'),
                        Some('f') => string.push('\u{0C}'),
                        Some('v') => string.push('\u{0B}'),
                        Some('0') => string.push('\0'),
                        Some('\\') => string.push('\\'),
                        Some('"') => string.push('"'),
                        Some('\n') | None => {
                            valid = false;
                            break;
                        }
                        Some(_) => valid = false,
                    }
                    self.advance();
                }
                // Unterminated: the lexeme runs to the end of the line.
                Some('\n') | None => {
                    valid = false;
                    break;
                }
                Some(ch) => {
                    string.push(ch);
                    self.advance();
                }
            }
        }

        if valid {
            Token::Str(string)
        } else {
            Token::Unknown(self.text(start))
        }
    }

    fn read_word(&mut self) -> Token {
        let start = self.pos;
        while let Some(ch) = self.current() {
            if ch.is_whitespace() || ch == '"' {
                break;
            }
            self.advance();
        }

        let word = self.text(start);
        match word.as_str() {
            "msgctxt" => Token::Msgctxt,
            "msgid" => Token::Msgid,
            "msgid_plural" => Token::MsgidPlural,
            "msgstr" => Token::Msgstr,
            _ => match parse_plural_index(&word) {
                Some(n) => Token::MsgstrIndexed(n),
                None => Token::Unknown(word),
            },
        }
    }

    /// Scans the next token.
    ///
    /// Once input is exhausted this keeps returning `Token::Eof` with the
    /// empty span `[len, len)`.
    pub fn next_token(&mut self) -> Spanned {
        self.skip_whitespace();
        let start = self.pos;
        let line = self.line;
        let col = self.col;

        let token = match self.current() {
            None => Token::Eof,
            Some('#') => self.read_comment(),
            Some('"') => self.read_string(),
            Some(_) => self.read_word(),
        };

        Spanned {
            token,
            span: Span {
                start,
                end: self.pos,
                line,
                col,
            },
        }
    }

    /// Collects every token up to and including `Token::Eof`.
    pub fn tokenize(&mut self) -> Vec<Spanned> {
        let mut tokens = Vec::new();
        loop {
            let spanned = self.next_token();
            let done = spanned.token == Token::Eof;
            tokens.push(spanned);
            if done {
                break;
            }
        }
        tokens
    }
}

/// Yields every token through the first `Token::Eof`, then stops.
impl Iterator for Lexer {
    type Item = Spanned;

    fn next(&mut self) -> Option<Spanned> {
        if self.done {
            return None;
        }
        let spanned = self.next_token();
        self.done = spanned.token == Token::Eof;
        Some(spanned)
    }
}

fn parse_plural_index(word: &str) -> Option<u32> {
    let digits = word.strip_prefix("msgstr[")?.strip_suffix(']')?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        lexer
            .tokenize()
            .into_iter()
            .map(|s| s.token)
            .filter(|t| !matches!(t, Token::Eof) && !t.is_obsolete())
            .collect()
    }

    #[test]
    fn test_simple_entry() {
        let t = tokens("msgid \"hello\"\nmsgstr \"bonjour\"\n");
        assert_eq!(
            t,
            vec![
                Token::Msgid,
                Token::Str("hello".to_string()),
                Token::Msgstr,
                Token::Str("bonjour".to_string()),
            ]
        );
    }

    #[test]
    fn test_plural_keywords() {
        let t = tokens("msgid_plural \"files\" msgstr[0] \"a\" msgstr[12] \"b\"");
        assert_eq!(
            t,
            vec![
                Token::MsgidPlural,
                Token::Str("files".to_string()),
                Token::MsgstrIndexed(0),
                Token::Str("a".to_string()),
                Token::MsgstrIndexed(12),
                Token::Str("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_malformed_plural_index_is_unknown() {
        assert_eq!(tokens("msgstr[x]"), vec![Token::Unknown("msgstr[x]".to_string())]);
        assert_eq!(tokens("msgstr[]"), vec![Token::Unknown("msgstr[]".to_string())]);
    }

    #[test]
    fn test_escapes() {
        let t = tokens(r#""a\nb\t\"q\"\\""#);
        assert_eq!(t, vec![Token::Str("a\nb\t\"q\"\\".to_string())]);
    }

    #[test]
    fn test_comment_kinds() {
        let t = tokens("# translator\n#. extracted\n#: src/main.rs:10\n#, fuzzy\n#| msgid \"old\"\n");
        assert_eq!(
            t,
            vec![
                Token::Comment(CommentKind::Translator, "translator".to_string()),
                Token::Comment(CommentKind::Extracted, "extracted".to_string()),
                Token::Comment(CommentKind::Reference, "src/main.rs:10".to_string()),
                Token::Comment(CommentKind::Flags, "fuzzy".to_string()),
                Token::Comment(CommentKind::Previous, "msgid \"old\"".to_string()),
            ]
        );
    }

    #[test]
    fn test_obsolete_comment_kind() {
        let mut lexer = Lexer::new("#~ msgid \"gone\"\n# kept\n");
        let raw = lexer.tokenize();
        assert!(matches!(raw[0].token, Token::Comment(CommentKind::Obsolete, _)));
        assert!(raw[0].token.is_obsolete());
        assert!(!raw[1].token.is_obsolete());
        assert_eq!(tokens("#~ msgid \"gone\"\n"), vec![]);
    }

    #[test]
    fn test_unknown_word_span() {
        let mut lexer = Lexer::new("msgid \"a\" bad-token");
        let sp = lexer.tokenize();
        assert_eq!(sp[2].token, Token::Unknown("bad-token".to_string()));
        assert_eq!((sp[2].span.start, sp[2].span.end), (10, 19));
    }

    #[test]
    fn test_unterminated_string_runs_to_end_of_line() {
        let mut lexer = Lexer::new("msgid \"abc\nmsgstr \"\"");
        let sp = lexer.tokenize();
        assert_eq!(sp[1].token, Token::Unknown("\"abc".to_string()));
        assert_eq!((sp[1].span.start, sp[1].span.end), (6, 10));
        assert_eq!(sp[2].token, Token::Msgstr);
    }

    #[test]
    fn test_unknown_escape_is_unknown() {
        let mut lexer = Lexer::new(r#"msgid "a\qb""#);
        let sp = lexer.tokenize();
        assert_eq!(sp[1].token, Token::Unknown(r#""a\qb""#.to_string()));
        assert_eq!((sp[1].span.start, sp[1].span.end), (6, 12));
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lexer = Lexer::new("  ");
        for _ in 0..3 {
            let s = lexer.next_token();
            assert_eq!(s.token, Token::Eof);
            assert_eq!((s.span.start, s.span.end), (2, 2));
        }
    }

    #[test]
    fn test_iterator_stops_after_eof() {
        let all: Vec<Token> = Lexer::new("msgid \"a\"").map(|s| s.token).collect();
        assert_eq!(
            all,
            vec![Token::Msgid, Token::Str("a".to_string()), Token::Eof]
        );
    }

    #[test]
    fn test_offsets_count_chars_not_bytes() {
        let mut lexer = Lexer::new("msgid \"é\" x");
        let sp = lexer.tokenize();
        assert_eq!((sp[1].span.start, sp[1].span.end), (6, 9));
        assert_eq!((sp[2].span.start, sp[2].span.end), (10, 11));
    }

    #[test]
    fn test_spans_raw() {
        let src = "msgid \"a\"\n  msgstr \"b\"\n";

        let mut lexer = Lexer::new(src);
        let sp = lexer.tokenize();

        macro_rules! at {
            ($i:expr, $tok:expr, $start:expr, $end:expr, $line:expr, $col:expr) => {{
                assert_eq!(sp[$i].token, $tok, "token mismatch at index {}", $i);
                assert_eq!(sp[$i].span.start, $start, "start mismatch at index {}", $i);
                assert_eq!(sp[$i].span.end, $end, "end mismatch at index {}", $i);
                assert_eq!(sp[$i].span.line, $line, "line mismatch at index {}", $i);
                assert_eq!(sp[$i].span.col, $col, "col mismatch at index {}", $i);
            }};
        }

        assert_eq!(sp.len(), 5, "unexpected token count: {:?}", sp);

        at!(0, Token::Msgid, 0, 5, 1, 1);
        at!(1, Token::Str("a".to_string()), 6, 9, 1, 7);
        at!(2, Token::Msgstr, 12, 18, 2, 3);
        at!(3, Token::Str("b".to_string()), 19, 22, 2, 10);
        at!(4, Token::Eof, 23, 23, 3, 1);
    }
}
