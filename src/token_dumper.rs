use crate::lexer::Spanned;
use crate::token::Token;

pub struct TokenDumper {
    pub color: bool,
    pub show_debug_repr: bool, // if false, prints surface syntax instead of Debug
}

impl Default for TokenDumper {
    fn default() -> Self {
        Self {
            color: true,
            show_debug_repr: true,
        }
    }
}

impl TokenDumper {
    // ANSI colors
    const RESET: &'static str = "\x1b[0m";
    const DIM: &'static str = "\x1b[2m";
    const GRN: &'static str = "\x1b[32m";
    const YEL: &'static str = "\x1b[33m";
    const RED: &'static str = "\x1b[31m";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn no_color(mut self) -> Self {
        self.color = false;
        self
    }

    pub fn pretty(mut self) -> Self {
        self.show_debug_repr = false;
        self
    }

    pub fn dump(&self, tokens: &[Spanned]) {
        print!("{}", self.render(tokens));
    }

    /// One line per token: `[line:col] start..end KIND token`.
    pub fn render(&self, tokens: &[Spanned]) -> String {
        let mut out = String::new();
        for s in tokens {
            self.render_one(&mut out, s);
        }
        out
    }

    fn render_one(&self, out: &mut String, s: &Spanned) {
        let colr = if self.color { self.color(&s.token) } else { "" };
        let reset = if self.color { Self::RESET } else { "" };
        let kind = s.token.kind_name();
        let pos = format!("{}..{}", s.span.start, s.span.end);
        let text = if self.show_debug_repr {
            format!("{:?}", s.token)
        } else {
            s.token.to_string()
        };

        out.push_str(&format!(
            "[{:02}:{:02}] {:<9} {}{:<8} {}{}\n",
            s.span.line, s.span.col, pos, colr, kind, text, reset
        ));
    }

    fn color(&self, t: &Token) -> &'static str {
        match t {
            Token::Comment(..) | Token::Eof => Self::DIM,
            Token::Str(_) => Self::GRN,
            Token::Unknown(_) => Self::RED,
            _ => Self::YEL,
        }
    }
}
