//! # cssmodules-base
//!
//! Core library for resolving CSS module class references: component files
//! that import a style sheet as a namespace object (`styles.button`) are
//! linked to the selector declarations those accesses name.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → IDE features (goto, hover, completion, diagnostics, quick fixes)
//!   ↓
//! project   → Workspace index, path resolution, bootstrap loading, config
//!   ↓
//! hir       → Selector index, accessor extraction, matcher, diagnostics
//!   ↓
//! parser    → Logos lexers + rowan CSTs for style sheets and components
//!   ↓
//! base      → Primitives (FileId, NormalizedPath, TextRange, LineIndex)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → hir → project → ide)
// ============================================================================

/// Foundation types: FileId, NormalizedPath, TextRange
pub mod base;

/// Parsers: style sheets (CSS/SCSS/LESS) and components (JS/TS/JSX)
pub mod parser;

/// Semantic model: selector index, accessors, matcher, diagnostics
pub mod hir;

/// Project management: workspace index, path resolution, loading
pub mod project;

/// IDE features: goto-definition, hover, completion, code actions
pub mod ide;

// Re-export foundation types
pub use base::{FileId, FileSet, LineCol, LineIndex, NormalizedPath, TextRange, TextSize};
