//! Rowan-based parsers for style sheets and component files
//!
//! Both parsers follow the same lossless pipeline:
//! - **logos** for fast lexing
//! - **rowan** for the CST (Concrete Syntax Tree)
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Parser → GreenNode tree (immutable, cheap to clone)
//!     ↓
//! SyntaxNode (rowan) → CST with parent pointers
//!     ↓
//! AST layer → Typed wrappers over SyntaxNode
//!     ↓
//! HIR → Selector index / accessors
//! ```
//!
//! Neither parser ever fails: malformed input produces a partial tree plus
//! a list of [`SyntaxError`]s so that unaffected rules and accesses in the
//! same file remain usable.

use rowan::TextRange;

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextSize};

// ============================================================================
// Helper macros
// ============================================================================

/// Generate a typed wrapper over a syntax node of a single kind.
///
/// `SyntaxNode`, `SyntaxKind` and `AstNode` resolve at the call site, so
/// each language's `ast` module brings its own.
macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(pub(crate) SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

// Submodules declared after macros so macro_rules! are in scope
pub mod component;
pub mod style;

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}
