//! Syntax kinds for the style-sheet CST
//!
//! One enum covers CSS, SCSS and LESS; dialect differences are handled in
//! the lexer and are invisible to the tree.

/// All syntax kinds (tokens and nodes) in a style sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,        // button, -x, --mod, __el
    AT_KEYWORD,   // @media, @import, @mixin
    VARIABLE,     // $size
    NUMBER,       // 1, 1.5, 10px, 50%
    STRING,       // "a.css" or 'a.css'
    URL,          // url(a.png)
    HASH,         // #fff, #main
    INTERP_START, // #{ (SCSS interpolation)
    LESS_INTERP,  // @{ (LESS interpolation)

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,     // {
    R_BRACE,     // }
    L_PAREN,     // (
    R_PAREN,     // )
    L_BRACKET,   // [
    R_BRACKET,   // ]
    SEMICOLON,   // ;
    COLON,       // :
    COLON_COLON, // ::
    COMMA,       // ,
    DOT,         // .
    AMP,         // &
    GT,          // >
    PLUS,        // +
    MINUS,       // -
    TILDE,       // ~
    STAR,        // *
    EQ,          // =
    BANG,        // !
    SLASH,       // /
    PERCENT,     // %
    PIPE,        // |
    CARET,       // ^
    DOLLAR,      // $
    QUESTION,    // ?
    LT,          // <

    // =========================================================================
    // NODES
    // =========================================================================
    SOURCE_FILE,
    RULE,
    SELECTOR_LIST,
    SELECTOR,
    BLOCK,
    DECLARATION,
    AT_RULE,
    AT_PRELUDE,

    ERROR,
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_BRACE as u16) && (self as u16) <= (Self::LT as u16)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleLanguage {}

impl rowan::Language for StyleLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<StyleLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<StyleLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<StyleLanguage>;
