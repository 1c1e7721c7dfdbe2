//! Typed AST wrappers over the component-file CST

use super::syntax_kind::{SyntaxKind, SyntaxNode, SyntaxToken};
use rowan::{TextRange, TextSize};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;

    /// Find all descendant nodes of a specific AST type
    fn descendants<T: AstNode>(&self) -> impl Iterator<Item = T> {
        self.syntax().descendants().filter_map(T::cast)
    }
}

ast_node!(SourceFile, SOURCE_FILE);
ast_node!(ImportDecl, IMPORT_DECL);
ast_node!(RequireDecl, REQUIRE_DECL);
ast_node!(Binding, BINDING);
ast_node!(NameRef, NAME_REF);
ast_node!(MemberExpr, MEMBER_EXPR);
ast_node!(IndexExpr, INDEX_EXPR);
ast_node!(IndexKey, INDEX_KEY);

/// The module specifier of an import or require, with quotes removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSpecifier {
    pub value: String,
    pub range: TextRange,
}

fn direct_tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> {
    node.children_with_tokens().filter_map(|e| e.into_token())
}

fn specifier_of(node: &SyntaxNode) -> Option<ModuleSpecifier> {
    let token = direct_tokens(node).find(|t| t.kind() == SyntaxKind::STRING)?;
    Some(ModuleSpecifier {
        value: string_value(token.text()).to_string(),
        range: token.text_range(),
    })
}

/// Contents of a quoted string literal.
pub fn string_value(text: &str) -> &str {
    if text.len() >= 2 {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

/// Range of a string literal's contents, without the quotes.
fn inner_range(range: TextRange) -> TextRange {
    if range.len() >= TextSize::new(2) {
        TextRange::new(range.start() + TextSize::new(1), range.end() - TextSize::new(1))
    } else {
        range
    }
}

impl SourceFile {
    pub fn imports(&self) -> impl Iterator<Item = ImportDecl> {
        self.descendants()
    }

    pub fn requires(&self) -> impl Iterator<Item = RequireDecl> {
        self.descendants()
    }
}

impl ImportDecl {
    /// The local name bound by a default or namespace import
    pub fn binding(&self) -> Option<Binding> {
        self.0.descendants().find_map(Binding::cast)
    }

    pub fn specifier(&self) -> Option<ModuleSpecifier> {
        specifier_of(&self.0)
    }

    /// `import type …`
    pub fn is_type_only(&self) -> bool {
        direct_tokens(&self.0).any(|t| t.kind() == SyntaxKind::TYPE_KW)
    }

    pub fn range(&self) -> TextRange {
        self.0.text_range()
    }
}

impl RequireDecl {
    pub fn binding(&self) -> Option<Binding> {
        self.0.children().find_map(Binding::cast)
    }

    pub fn specifier(&self) -> Option<ModuleSpecifier> {
        specifier_of(&self.0)
    }

    pub fn range(&self) -> TextRange {
        self.0.text_range()
    }
}

impl Binding {
    pub fn name(&self) -> Option<SyntaxToken> {
        direct_tokens(&self.0).find(|t| t.kind().is_name())
    }
}

impl NameRef {
    pub fn name(&self) -> Option<SyntaxToken> {
        direct_tokens(&self.0).find(|t| t.kind().is_name())
    }
}

impl MemberExpr {
    /// The base identifier, when the base is not itself a chain
    pub fn base_name(&self) -> Option<NameRef> {
        self.0.first_child().and_then(NameRef::cast)
    }

    /// The accessed property name
    pub fn property(&self) -> Option<SyntaxToken> {
        direct_tokens(&self.0)
            .filter(|t| t.kind().is_name())
            .last()
    }

    pub fn is_optional(&self) -> bool {
        direct_tokens(&self.0).any(|t| t.kind() == SyntaxKind::QUESTION_DOT)
    }

    pub fn range(&self) -> TextRange {
        self.0.text_range()
    }
}

/// A constant index key: a string literal or a template literal with no
/// interpolations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticKey {
    pub value: String,
    pub range: TextRange,
}

impl IndexExpr {
    pub fn base_name(&self) -> Option<NameRef> {
        self.0.first_child().and_then(NameRef::cast)
    }

    pub fn key(&self) -> Option<IndexKey> {
        self.0.children().find_map(IndexKey::cast)
    }

    pub fn is_optional(&self) -> bool {
        direct_tokens(&self.0).any(|t| t.kind() == SyntaxKind::QUESTION_DOT)
    }

    pub fn range(&self) -> TextRange {
        self.0.text_range()
    }
}

impl IndexKey {
    /// Non-trivia tokens of the key, nested expressions included
    pub fn significant_tokens(&self) -> Vec<SyntaxToken> {
        self.0
            .descendants_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| !t.kind().is_trivia())
            .collect()
    }

    /// The key's value when it is known without evaluation
    pub fn static_value(&self) -> Option<StaticKey> {
        let tokens = self.significant_tokens();
        match tokens.as_slice() {
            [string] if string.kind() == SyntaxKind::STRING => Some(StaticKey {
                value: string_value(string.text()).to_string(),
                range: inner_range(string.text_range()),
            }),
            [open, close]
                if open.kind() == SyntaxKind::BACKTICK && close.kind() == SyntaxKind::BACKTICK =>
            {
                Some(StaticKey {
                    value: String::new(),
                    range: TextRange::empty(close.text_range().start()),
                })
            }
            [open, chunk, close]
                if open.kind() == SyntaxKind::BACKTICK
                    && chunk.kind() == SyntaxKind::TEMPLATE_CHUNK
                    && close.kind() == SyntaxKind::BACKTICK =>
            {
                Some(StaticKey {
                    value: chunk.text().to_string(),
                    range: chunk.text_range(),
                })
            }
            _ => None,
        }
    }

    pub fn range(&self) -> TextRange {
        self.0.text_range()
    }
}
