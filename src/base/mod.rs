//! Foundation types for the cssmodules toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`], [`FileSet`] - Interned file identifiers
//! - [`NormalizedPath`] - Platform-independent absolute paths (index keys)
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - [`FileKind`], [`StyleDialect`] - File classification by extension
//!
//! This module has NO dependencies on other cssmodules modules.

pub mod constants;
mod file_id;
mod file_set;
mod kind;
mod path;
mod span;

pub use file_id::FileId;
pub use file_set::FileSet;
pub use kind::{FileKind, StyleDialect};
pub use path::NormalizedPath;
pub use span::{LineCol, LineIndex, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
