/// Kind of a `#` comment line in a PO file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    /// `# text` written by translators.
    Translator,
    /// `#. text` extracted from source code.
    Extracted,
    /// `#: file:line` source references.
    Reference,
    /// `#, fuzzy, c-format` flags.
    Flags,
    /// `#| msgid "..."` previous untranslated string.
    Previous,
    /// `#~ ...` obsolete entry line.
    Obsolete,
}

impl CommentKind {
    /// The marker that follows `#` for this kind of comment.
    pub fn marker(self) -> &'static str {
        match self {
            CommentKind::Translator => "",
            CommentKind::Extracted => ".",
            CommentKind::Reference => ":",
            CommentKind::Flags => ",",
            CommentKind::Previous => "|",
            CommentKind::Obsolete => "~",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Keywords
    Msgctxt,
    Msgid,
    MsgidPlural,
    Msgstr,
    MsgstrIndexed(u32), // msgstr[N]

    // Literals
    Str(std::string::String),

    // Special
    Comment(CommentKind, std::string::String),
    Unknown(std::string::String),
    Eof,
}

impl Token {
    /// Returns true for `#~` lines, which carry obsolete entries the parser skips.
    pub fn is_obsolete(&self) -> bool {
        matches!(self, Token::Comment(CommentKind::Obsolete, _))
    }

    /// Short upper-case kind name, used by diagnostics and the token dumper.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::Msgctxt
            | Token::Msgid
            | Token::MsgidPlural
            | Token::Msgstr
            | Token::MsgstrIndexed(_) => "KEYWORD",
            Token::Str(_) => "STRING",
            Token::Comment(..) => "COMMENT",
            Token::Unknown(_) => "UNKNOWN",
            Token::Eof => "EOF",
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Msgctxt => write!(f, "msgctxt"),
            Token::Msgid => write!(f, "msgid"),
            Token::MsgidPlural => write!(f, "msgid_plural"),
            Token::Msgstr => write!(f, "msgstr"),
            Token::MsgstrIndexed(n) => write!(f, "msgstr[{}]", n),
            Token::Str(s) => write!(f, "\"{}\"", s.escape_default()),
            Token::Comment(kind, text) => write!(f, "#{} {}", kind.marker(), text),
            Token::Unknown(s) => write!(f, "{}", s),
            Token::Eof => write!(f, "EOF"),
        }
    }
}
