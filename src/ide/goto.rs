//! Go-to-definition implementation.

use rowan::{TextRange, TextSize};
use smol_str::SmolStr;

use crate::base::{FileId, LineCol, NormalizedPath};
use crate::hir::{SelectorEntry, SelectorKind, StyleAccessor, match_selectors};
use crate::project::WorkspaceIndex;

/// Result of a go-to-definition request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GotoResult {
    /// The targets to jump to, best match first.
    pub targets: Vec<GotoTarget>,
}

impl GotoResult {
    /// Create an empty result (no targets found).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if any targets were found.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// The best match.
    pub fn first(&self) -> Option<&GotoTarget> {
        self.targets.first()
    }
}

/// A selector declaration to jump to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GotoTarget {
    /// The style sheet declaring the selector.
    pub path: NormalizedPath,
    pub file: FileId,
    /// The whole rule.
    pub declaration_range: TextRange,
    /// The selector token.
    pub selection_range: TextRange,
    /// Start of the selector token (0-indexed).
    pub selection_start: LineCol,
    pub name: SmolStr,
    pub kind: SelectorKind,
}

impl GotoTarget {
    pub(crate) fn from_entry(index: &WorkspaceIndex, entry: &SelectorEntry) -> Option<Self> {
        let doc = index.style_by_file(entry.file)?;
        Some(Self {
            path: doc.path.clone(),
            file: entry.file,
            declaration_range: entry.rule_range,
            selection_range: entry.selector_range,
            selection_start: doc.line_index.line_col(entry.selector_range.start()),
            name: entry.name.clone(),
            kind: entry.kind,
        })
    }
}

/// The static accessor under `offset` in a component document, with the
/// selector entries it resolves to.
pub(crate) fn resolve_at(
    index: &WorkspaceIndex,
    path: &NormalizedPath,
    offset: TextSize,
) -> Option<(StyleAccessor, Vec<SelectorEntry>)> {
    let doc = index.component(path)?;
    let accessor = doc.accessor_at(offset)?;
    if accessor.is_dynamic {
        return None;
    }
    let target = doc.binding_of(accessor)?.resolved?;
    let selectors = index.resolved_selectors(target)?;
    let matches = match_selectors(&selectors, &accessor.name);
    tracing::trace!(name = %accessor.name, matches = matches.len(), "accessor resolved");
    Some((accessor.clone(), matches))
}

/// Find the declarations of the class accessed at `offset`.
pub fn goto_definition(index: &WorkspaceIndex, path: &NormalizedPath, offset: TextSize) -> GotoResult {
    let Some((_, matches)) = resolve_at(index, path, offset) else {
        return GotoResult::empty();
    };
    GotoResult {
        targets: matches
            .iter()
            .filter_map(|entry| GotoTarget::from_entry(index, entry))
            .collect(),
    }
}
