//! Logos-based lexer for component files
//!
//! Logos handles ordinary code. Two constructs need context the DFA does
//! not have, so the wrapper handles them by hand:
//!
//! - template literals: text chunks are scanned directly and `${ … }`
//!   interpolations switch back to code, with a brace stack telling which
//!   `}` closes an interpolation;
//! - regex literals: a `/` starts a regex only where an expression may
//!   begin, judged from the previous significant token.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    source: &'a str,
    inner: logos::Lexer<'a, LogosToken>,
    base: usize,
    /// Open braces; `true` marks a template interpolation
    braces: Vec<bool>,
    in_template: bool,
    /// Absolute position while scanning template text
    cursor: usize,
    regex_allowed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            source: input,
            inner: LogosToken::lexer(input),
            base: 0,
            braces: Vec::new(),
            in_template: false,
            cursor: 0,
            regex_allowed: true,
        }
    }

    fn restart_at(&mut self, offset: usize) {
        self.inner = LogosToken::lexer(&self.source[offset..]);
        self.base = offset;
    }

    fn enter_template(&mut self, offset: usize) {
        self.in_template = true;
        self.cursor = offset;
    }

    fn token(&self, kind: SyntaxKind, start: usize, end: usize) -> Token<'a> {
        let source: &'a str = self.source;
        Token {
            kind,
            text: &source[start..end],
            offset: TextSize::new(start as u32),
        }
    }

    fn lex_code(&mut self) -> Option<Token<'a>> {
        let logos_token = self.inner.next()?;
        let span = self.inner.span();
        let start = self.base + span.start;
        let end = self.base + span.end;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        match kind {
            SyntaxKind::BACKTICK => self.enter_template(end),
            SyntaxKind::L_BRACE => self.braces.push(false),
            SyntaxKind::R_BRACE => {
                if self.braces.pop() == Some(true) {
                    self.enter_template(end);
                }
            }
            SyntaxKind::SLASH | SyntaxKind::OPERATOR
                if self.regex_allowed && self.source[start..].starts_with('/') =>
            {
                if let Some(regex_end) = scan_regex(self.source, start) {
                    self.restart_at(regex_end);
                    return Some(self.token(SyntaxKind::REGEX, start, regex_end));
                }
            }
            _ => {}
        }

        Some(self.token(kind, start, end))
    }

    fn lex_template(&mut self) -> Option<Token<'a>> {
        let start = self.cursor;
        let rest = &self.source[start..];
        if rest.is_empty() {
            return None;
        }
        if rest.starts_with('`') {
            self.in_template = false;
            self.restart_at(start + 1);
            return Some(self.token(SyntaxKind::BACKTICK, start, start + 1));
        }
        if rest.starts_with("${") {
            self.in_template = false;
            self.braces.push(true);
            self.restart_at(start + 2);
            return Some(self.token(SyntaxKind::DOLLAR_BRACE, start, start + 2));
        }

        let bytes = rest.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\\' => i += 2,
                b'`' => break,
                b'$' if bytes.get(i + 1) == Some(&b'{') => break,
                _ => i += 1,
            }
        }
        let end = start + i.min(bytes.len());
        self.cursor = end;
        Some(self.token(SyntaxKind::TEMPLATE_CHUNK, start, end))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = if self.in_template {
            self.lex_template()?
        } else {
            self.lex_code()?
        };
        if !token.kind.is_trivia() {
            self.regex_allowed = regex_may_follow(token.kind, token.text);
        }
        Some(token)
    }
}

/// Tokenize an entire string into a Vec
#[allow(dead_code)]
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Whether a `/` after this token begins a regex literal rather than a
/// division.
fn regex_may_follow(kind: SyntaxKind, text: &str) -> bool {
    match kind {
        SyntaxKind::IDENT => matches!(
            text,
            "return"
                | "typeof"
                | "instanceof"
                | "in"
                | "of"
                | "new"
                | "delete"
                | "void"
                | "throw"
                | "case"
                | "do"
                | "else"
                | "yield"
                | "await"
        ),
        k if k.is_keyword() => false,
        SyntaxKind::NUMBER
        | SyntaxKind::STRING
        | SyntaxKind::REGEX
        | SyntaxKind::BACKTICK
        | SyntaxKind::TEMPLATE_CHUNK
        | SyntaxKind::R_PAREN
        | SyntaxKind::R_BRACKET
        | SyntaxKind::R_BRACE => false,
        // `</div>` closes a JSX element
        SyntaxKind::LT => false,
        _ => true,
    }
}

/// Scan a regex literal starting at the `/` at `start`; returns the end
/// offset (after flags), or `None` when the line ends first.
fn scan_regex(source: &str, start: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut i = start + 1;
    let mut in_class = false;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' | b'\r' => return None,
            b'\\' => i += 1,
            b'[' => in_class = true,
            b']' => in_class = false,
            b'/' if !in_class => {
                if i == start + 1 {
                    return None;
                }
                i += 1;
                while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                    i += 1;
                }
                return Some(i);
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\f\x0B]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"([a-zA-Z_$]|[^\x00-\x7F])([a-zA-Z0-9_$]|[^\x00-\x7F])*")]
    Ident,

    #[regex(r"[0-9][0-9_]*(\.[0-9_]*)?([eE][+-]?[0-9]+)?n?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9]+)?")]
    #[regex(r"0[xX][0-9a-fA-F_]+n?")]
    #[regex(r"0[bB][01_]+n?")]
    #[regex(r"0[oO][0-7_]+n?")]
    Number,

    #[regex(r#""([^"\\\n]|\\[^\n]|\\\n)*""#)]
    #[regex(r#"'([^'\\\n]|\\[^\n]|\\\n)*'"#)]
    String,

    #[token("`")]
    Backtick,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("import")]
    Import,
    #[token("from")]
    From,
    #[token("as")]
    As,
    #[token("const")]
    Const,
    #[token("let")]
    Let,
    #[token("var")]
    Var,
    #[token("require")]
    Require,
    #[token("type")]
    Type,
    #[token("export")]
    Export,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("?.")]
    QuestionDot,
    #[token("...")]
    Ellipsis,
    #[token(":")]
    Colon,
    #[token("?")]
    Question,
    #[token("=")]
    Eq,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("!")]
    Bang,
    #[token("@")]
    At,
    #[token("#")]
    Hash,

    #[token("=>")]
    #[token("==")]
    #[token("===")]
    #[token("!=")]
    #[token("!==")]
    #[token("<=")]
    #[token(">=")]
    #[token("+")]
    #[token("-")]
    #[token("%")]
    #[token("**")]
    #[token("++")]
    #[token("--")]
    #[token("<<")]
    #[token(">>")]
    #[token(">>>")]
    #[token("&")]
    #[token("|")]
    #[token("^")]
    #[token("~")]
    #[token("&&")]
    #[token("||")]
    #[token("??")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("&&=")]
    #[token("||=")]
    #[token("??=")]
    #[token("**=")]
    #[token("<<=")]
    #[token(">>=")]
    #[token(">>>=")]
    Operator,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => SyntaxKind::WHITESPACE,
            LogosToken::LineComment => SyntaxKind::LINE_COMMENT,
            LogosToken::BlockComment => SyntaxKind::BLOCK_COMMENT,
            LogosToken::Ident => SyntaxKind::IDENT,
            LogosToken::Number => SyntaxKind::NUMBER,
            LogosToken::String => SyntaxKind::STRING,
            LogosToken::Backtick => SyntaxKind::BACKTICK,
            LogosToken::Import => SyntaxKind::IMPORT_KW,
            LogosToken::From => SyntaxKind::FROM_KW,
            LogosToken::As => SyntaxKind::AS_KW,
            LogosToken::Const => SyntaxKind::CONST_KW,
            LogosToken::Let => SyntaxKind::LET_KW,
            LogosToken::Var => SyntaxKind::VAR_KW,
            LogosToken::Require => SyntaxKind::REQUIRE_KW,
            LogosToken::Type => SyntaxKind::TYPE_KW,
            LogosToken::Export => SyntaxKind::EXPORT_KW,
            LogosToken::LBrace => SyntaxKind::L_BRACE,
            LogosToken::RBrace => SyntaxKind::R_BRACE,
            LogosToken::LParen => SyntaxKind::L_PAREN,
            LogosToken::RParen => SyntaxKind::R_PAREN,
            LogosToken::LBracket => SyntaxKind::L_BRACKET,
            LogosToken::RBracket => SyntaxKind::R_BRACKET,
            LogosToken::Semicolon => SyntaxKind::SEMICOLON,
            LogosToken::Comma => SyntaxKind::COMMA,
            LogosToken::Dot => SyntaxKind::DOT,
            LogosToken::QuestionDot => SyntaxKind::QUESTION_DOT,
            LogosToken::Ellipsis => SyntaxKind::ELLIPSIS,
            LogosToken::Colon => SyntaxKind::COLON,
            LogosToken::Question => SyntaxKind::QUESTION,
            LogosToken::Eq => SyntaxKind::EQ,
            LogosToken::Star => SyntaxKind::STAR,
            LogosToken::Slash => SyntaxKind::SLASH,
            LogosToken::Lt => SyntaxKind::LT,
            LogosToken::Gt => SyntaxKind::GT,
            LogosToken::Bang => SyntaxKind::BANG,
            LogosToken::At => SyntaxKind::AT,
            LogosToken::Hash => SyntaxKind::HASH,
            LogosToken::Operator => SyntaxKind::OPERATOR,
        }
    }
}
