//! Component-file parser (JS, JSX, TS, TSX)

pub mod ast;
mod lexer;
mod parser;
mod syntax_kind;

pub use ast::{
    AstNode, Binding, ImportDecl, IndexExpr, IndexKey, MemberExpr, ModuleSpecifier, NameRef,
    RequireDecl, SourceFile, StaticKey,
};
pub use lexer::{Lexer, Token, tokenize};
pub use parser::{Parse, parse};
pub use syntax_kind::{ComponentLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
