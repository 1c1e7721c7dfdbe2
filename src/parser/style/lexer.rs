//! Logos-based lexer for CSS, SCSS and LESS
//!
//! The token set is shared by all three dialects. The only lexical
//! difference that matters for selector indexing is `//`: a comment in SCSS
//! and LESS, but two slashes in plain CSS.

use super::syntax_kind::SyntaxKind;
use crate::base::StyleDialect;
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
    dialect: StyleDialect,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str, dialect: StyleDialect) -> Self {
        Self {
            source: input,
            inner: LogosToken::lexer(input),
            base: 0,
            dialect,
        }
    }

    /// Restart the logos lexer at an absolute offset.
    fn restart_at(&mut self, offset: usize) {
        self.inner = LogosToken::lexer(&self.source[offset..]);
        self.base = offset;
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let span = self.inner.span();
        let start = self.base + span.start;
        let end = self.base + span.end;

        // Plain CSS: `//` is not a comment. Emit the first slash and lex
        // the rest of the line again.
        if logos_token == Ok(LogosToken::LineComment) && !self.dialect.has_line_comments() {
            self.restart_at(start + 1);
            return Some(Token {
                kind: SyntaxKind::SLASH,
                text: &self.source[start..start + 1],
                offset: TextSize::new(start as u32),
            });
        }

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token {
            kind,
            text: &self.source[start..end],
            offset: TextSize::new(start as u32),
        })
    }
}

/// Tokenize an entire string into a Vec
#[allow(dead_code)]
pub fn tokenize(input: &str, dialect: StyleDialect) -> Vec<Token<'_>> {
    Lexer::new(input, dialect).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"(--|-)?([a-zA-Z_]|[^\x00-\x7F]|\\[^\n])([a-zA-Z0-9_\-]|[^\x00-\x7F]|\\[^\n])*")]
    Ident,

    #[regex(r"@[a-zA-Z_\-][a-zA-Z0-9_\-]*")]
    AtKeyword,

    #[regex(r"\$[a-zA-Z_\-][a-zA-Z0-9_\-]*")]
    Variable,

    #[regex(r"([0-9]+(\.[0-9]+)?|\.[0-9]+)(%|[a-zA-Z]+)?")]
    Number,

    #[regex(r#""([^"\\\n]|\\[^\n])*""#)]
    #[regex(r#"'([^'\\\n]|\\[^\n])*'"#)]
    String,

    #[regex(r#"url\([^)"'\n]*\)"#)]
    Url,

    #[regex(r"#[a-zA-Z0-9_\-]+")]
    Hash,

    #[token("#{")]
    InterpStart,

    #[token("@{")]
    LessInterp,

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
    #[token(":")]
    Colon,
    #[token("::")]
    ColonColon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("&")]
    Amp,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("~")]
    Tilde,
    #[token("*")]
    Star,
    #[token("=")]
    Eq,
    #[token("!")]
    Bang,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("$")]
    Dollar,
    #[token("?")]
    Question,
    #[token("<")]
    Lt,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => SyntaxKind::WHITESPACE,
            LogosToken::LineComment => SyntaxKind::LINE_COMMENT,
            LogosToken::BlockComment => SyntaxKind::BLOCK_COMMENT,
            LogosToken::Ident => SyntaxKind::IDENT,
            LogosToken::AtKeyword => SyntaxKind::AT_KEYWORD,
            LogosToken::Variable => SyntaxKind::VARIABLE,
            LogosToken::Number => SyntaxKind::NUMBER,
            LogosToken::String => SyntaxKind::STRING,
            LogosToken::Url => SyntaxKind::URL,
            LogosToken::Hash => SyntaxKind::HASH,
            LogosToken::InterpStart => SyntaxKind::INTERP_START,
            LogosToken::LessInterp => SyntaxKind::LESS_INTERP,
            LogosToken::LBrace => SyntaxKind::L_BRACE,
            LogosToken::RBrace => SyntaxKind::R_BRACE,
            LogosToken::LParen => SyntaxKind::L_PAREN,
            LogosToken::RParen => SyntaxKind::R_PAREN,
            LogosToken::LBracket => SyntaxKind::L_BRACKET,
            LogosToken::RBracket => SyntaxKind::R_BRACKET,
            LogosToken::Semicolon => SyntaxKind::SEMICOLON,
            LogosToken::Colon => SyntaxKind::COLON,
            LogosToken::ColonColon => SyntaxKind::COLON_COLON,
            LogosToken::Comma => SyntaxKind::COMMA,
            LogosToken::Dot => SyntaxKind::DOT,
            LogosToken::Amp => SyntaxKind::AMP,
            LogosToken::Gt => SyntaxKind::GT,
            LogosToken::Plus => SyntaxKind::PLUS,
            LogosToken::Minus => SyntaxKind::MINUS,
            LogosToken::Tilde => SyntaxKind::TILDE,
            LogosToken::Star => SyntaxKind::STAR,
            LogosToken::Eq => SyntaxKind::EQ,
            LogosToken::Bang => SyntaxKind::BANG,
            LogosToken::Slash => SyntaxKind::SLASH,
            LogosToken::Percent => SyntaxKind::PERCENT,
            LogosToken::Pipe => SyntaxKind::PIPE,
            LogosToken::Caret => SyntaxKind::CARET,
            LogosToken::Dollar => SyntaxKind::DOLLAR,
            LogosToken::Question => SyntaxKind::QUESTION,
            LogosToken::Lt => SyntaxKind::LT,
        }
    }
}
