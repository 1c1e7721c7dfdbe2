//! High-level IR (HIR) — Semantic model over parsed style sheets and components.
//!
//! Every function here is pure: it takes parsed syntax (or an already built
//! index) and produces data. Workspace state, path resolution and
//! invalidation live in [`crate::project`].
//!
//! ## Key Types
//!
//! - [`SelectorIndex`] — Ordered `name → SelectorEntry` map of one style sheet
//! - [`StyleImportBinding`] / [`StyleAccessor`] — Imports and class accesses
//! - [`ParsedDocument`] — Cancellable off-index parse of one file
//! - [`ResolveResult`] — Outcome of matching one accessed name
//! - [`Diagnostic`] — Unresolved selector or unresolved import
//!
//! ## Pipeline
//!
//! ```text
//! style text ──► index_style ──► SelectorIndex ─┐
//!                                               ├─► resolve_selector ──► check_component
//! component text ──► extract_accessors ─────────┘
//! ```

mod accessors;
mod diagnostics;
mod document;
mod resolve;
mod selectors;

pub use accessors::{
    ComponentExtraction, StyleAccessor, StyleImportBinding, extract_accessors,
    extract_accessors_text,
};
pub use diagnostics::{
    Diagnostic, DiagnosticCollector, DiagnosticKind, MAX_SUGGESTION_DISTANCE, Severity,
    StyleLookup, StyleTarget, check_component, closest_match, codes, edit_distance,
};
pub use document::{ComponentDocument, ParsedDocument, StyleDocument};
pub use resolve::{MatchBucket, ResolveResult, match_selectors, resolve_selector};
pub use selectors::{
    RuleNode, SelectorEntry, SelectorIndex, SelectorKind, StyleExtraction, StyleForward,
    index_style, index_style_text,
};
