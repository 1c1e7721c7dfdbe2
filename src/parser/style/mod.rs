//! Style-sheet parser (CSS, SCSS, LESS)

pub mod ast;
mod lexer;
mod parser;
mod syntax_kind;

pub use ast::{
    AstNode, AtPrelude, AtRule, Block, Declaration, Item, Rule, Selector, SelectorList, SourceFile,
};
pub use lexer::{Lexer, Token, tokenize};
pub use parser::{Parse, parse};
pub use syntax_kind::{StyleLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
