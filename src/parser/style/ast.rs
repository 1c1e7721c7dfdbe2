//! Typed AST wrappers over the style-sheet CST

use super::syntax_kind::{SyntaxKind, SyntaxNode, SyntaxToken};
use rowan::TextRange;

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
ast_node!(Rule, RULE);
ast_node!(SelectorList, SELECTOR_LIST);
ast_node!(Selector, SELECTOR);
ast_node!(Block, BLOCK);
ast_node!(Declaration, DECLARATION);
ast_node!(AtRule, AT_RULE);
ast_node!(AtPrelude, AT_PRELUDE);

/// Anything that can appear at the top level or inside a block
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Item {
    Rule(Rule),
    AtRule(AtRule),
    Declaration(Declaration),
}

impl Item {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::RULE => Some(Item::Rule(Rule(node))),
            SyntaxKind::AT_RULE => Some(Item::AtRule(AtRule(node))),
            SyntaxKind::DECLARATION => Some(Item::Declaration(Declaration(node))),
            _ => None,
        }
    }
}

impl SourceFile {
    pub fn items(&self) -> impl Iterator<Item = Item> {
        self.0.children().filter_map(Item::cast)
    }
}

impl Rule {
    pub fn selector_list(&self) -> Option<SelectorList> {
        self.0.children().find_map(SelectorList::cast)
    }

    /// Selectors of this rule, in source order
    pub fn selectors(&self) -> impl Iterator<Item = Selector> {
        self.selector_list()
            .into_iter()
            .flat_map(|list| list.0.children().filter_map(Selector::cast))
    }

    pub fn block(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }

    /// Range of the whole rule, selectors through closing brace
    pub fn range(&self) -> TextRange {
        self.0.text_range()
    }
}

impl Selector {
    /// Source text of the selector, trivia included
    pub fn text(&self) -> String {
        self.0.text().to_string()
    }

    pub fn range(&self) -> TextRange {
        self.0.text_range()
    }
}

impl Block {
    pub fn items(&self) -> impl Iterator<Item = Item> {
        self.0.children().filter_map(Item::cast)
    }
}

impl AtRule {
    pub fn keyword(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind() == SyntaxKind::AT_KEYWORD)
    }

    /// Lower-cased at-rule name without the `@`
    pub fn name(&self) -> Option<String> {
        self.keyword()
            .map(|t| t.text().trim_start_matches('@').to_ascii_lowercase())
    }

    pub fn prelude(&self) -> Option<AtPrelude> {
        self.0.children().find_map(AtPrelude::cast)
    }

    pub fn block(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }
}

impl AtPrelude {
    /// Unquoted values of the string literals in the prelude
    pub fn strings(&self) -> impl Iterator<Item = (String, TextRange)> {
        self.0
            .descendants_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind() == SyntaxKind::STRING)
            .map(|t| (unquote(t.text()), t.text_range()))
    }
}

/// Strip the surrounding quotes from a string literal.
pub fn unquote(text: &str) -> String {
    let inner = text
        .strip_prefix(['"', '\''])
        .map(|rest| rest.strip_suffix(['"', '\'']).unwrap_or(rest))
        .unwrap_or(text);
    inner.to_string()
}
