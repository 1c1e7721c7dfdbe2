//! IDE features — High-level APIs for editor hosts.
//!
//! This module provides the interface between the workspace index and an
//! editor integration. Each function corresponds to a host request.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take the index in, return data out
//! 2. **No protocol types**: Uses our own types, converted at the host boundary
//! 3. **Degrade quietly**: Unknown documents yield empty results, never errors

mod analysis;
mod code_actions;
mod completion;
mod goto;
mod hover;
pub mod text_utils;

pub use analysis::{Analysis, AnalysisHost};
pub use code_actions::{CodeAction, CodeActionKind, TextEdit, code_actions};
pub use completion::{CompletionItem, CompletionKind, completions};
pub use goto::{GotoResult, GotoTarget, goto_definition};
pub use hover::{HoverResult, hover};
