//! Hover information implementation.

use rowan::{TextRange, TextSize};
use smol_str::SmolStr;

use crate::base::NormalizedPath;
use crate::hir::SelectorKind;
use crate::project::WorkspaceIndex;

use super::goto::{GotoTarget, resolve_at};

/// Result of a hover request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverResult {
    /// The accessed class name.
    pub name: SmolStr,
    pub kind: SelectorKind,
    /// Source text of the declaring rule.
    pub preview: String,
    /// The hover content (markdown).
    pub contents: String,
    /// The accessor being hovered.
    pub range: TextRange,
    pub target: GotoTarget,
}

/// Preview the rule declaring the class accessed at `offset`.
pub fn hover(index: &WorkspaceIndex, path: &NormalizedPath, offset: TextSize) -> Option<HoverResult> {
    let (accessor, matches) = resolve_at(index, path, offset)?;
    let entry = matches.first()?;
    let target = GotoTarget::from_entry(index, entry)?;
    let style = index.style_by_file(entry.file)?;
    let preview = style.text.get(range_usize(entry.rule_range))?.to_string();

    let file_name = target.path.file_name().unwrap_or(target.path.as_str());
    let contents = format!(
        "```{}\n{}\n```\n*{}* selector in `{}`",
        style.dialect.extension(),
        preview,
        entry.kind,
        file_name
    );

    Some(HoverResult {
        name: accessor.name,
        kind: entry.kind,
        preview,
        contents,
        range: accessor.range,
        target,
    })
}

fn range_usize(range: TextRange) -> std::ops::Range<usize> {
    range.start().into()..range.end().into()
}
