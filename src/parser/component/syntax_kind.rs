//! Syntax kinds for the component-file CST (JS, JSX, TS, TSX)

/// All syntax kinds (tokens and nodes) in a component file
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
    IDENT,
    NUMBER,
    STRING,
    REGEX,
    BACKTICK,       // ` (opens or closes a template literal)
    TEMPLATE_CHUNK, // literal text inside a template
    DOLLAR_BRACE,   // ${ (template interpolation)

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    // Only the keywords the grammar looks at; everything else is an IDENT.
    IMPORT_KW,
    FROM_KW,
    AS_KW,
    CONST_KW,
    LET_KW,
    VAR_KW,
    REQUIRE_KW,
    TYPE_KW,
    EXPORT_KW,

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
    COMMA,       // ,
    DOT,         // .
    QUESTION_DOT, // ?.
    ELLIPSIS,    // ...
    COLON,       // :
    QUESTION,    // ?
    EQ,          // =
    STAR,        // *
    SLASH,       // /
    LT,          // <
    GT,          // >
    BANG,        // !
    AT,          // @
    HASH,        // #
    OPERATOR,    // any other operator (=>, ===, &&, +=, ...)

    // =========================================================================
    // NODES
    // =========================================================================
    SOURCE_FILE,
    IMPORT_DECL,
    BINDING,
    NAMESPACE_IMPORT,
    NAMED_IMPORTS,
    REQUIRE_DECL,
    NAME_REF,
    MEMBER_EXPR,
    INDEX_EXPR,
    INDEX_KEY,

    ERROR,
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }

    /// Check if this is a keyword token
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::IMPORT_KW as u16) && (self as u16) <= (Self::EXPORT_KW as u16)
    }

    /// Identifiers and keywords; all grammar keywords are contextual, so
    /// any of them can name a binding or a property.
    pub fn is_name(self) -> bool {
        self == Self::IDENT || self.is_keyword()
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
pub enum ComponentLanguage {}

impl rowan::Language for ComponentLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<ComponentLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<ComponentLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<ComponentLanguage>;
