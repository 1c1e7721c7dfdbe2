//! Quick fixes for unresolved selectors.
//!
//! Each "selector not found" diagnostic under the cursor offers:
//! - replacing the accessed name with the suggested selector,
//! - appending an empty rule for the name to the target style sheet,
//! - ignoring the name (a host command, see `AnalysisHost::ignore_selector`).

use rowan::{TextRange, TextSize};
use smol_str::SmolStr;

use crate::base::NormalizedPath;
use crate::hir::DiagnosticKind;
use crate::project::WorkspaceIndex;

use super::text_utils::member_key_edit;

/// A single text replacement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextEdit {
    pub path: NormalizedPath,
    pub range: TextRange,
    pub new_text: String,
}

/// What applying a code action does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CodeActionKind {
    /// Apply these edits.
    Edit(Vec<TextEdit>),
    /// Add the name to the ignored set.
    IgnoreSelector { name: SmolStr, range: TextRange },
}

/// A quick fix offered at a position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeAction {
    pub title: String,
    pub kind: CodeActionKind,
    /// Whether hosts should surface this as the preferred fix.
    pub is_preferred: bool,
}

/// Quick fixes for the diagnostics covering `offset`.
pub fn code_actions(index: &WorkspaceIndex, path: &NormalizedPath, offset: TextSize) -> Vec<CodeAction> {
    let Some(doc) = index.component(path) else {
        return Vec::new();
    };

    let mut actions = Vec::new();
    for diagnostic in index.diagnostics(path) {
        if !diagnostic.range.contains_inclusive(offset) {
            continue;
        }
        let DiagnosticKind::SelectorNotFound {
            name,
            suggestion,
            target_file,
            create_at,
        } = diagnostic.kind
        else {
            continue;
        };

        if let Some(suggestion) = suggestion {
            let (range, new_text) = member_key_edit(&doc.text, diagnostic.range, &suggestion);
            actions.push(CodeAction {
                title: format!("Replace with '{}'", suggestion),
                kind: CodeActionKind::Edit(vec![TextEdit {
                    path: path.clone(),
                    range,
                    new_text,
                }]),
                is_preferred: true,
            });
        }

        if let Some(target) = index.file_path(target_file) {
            let file_name = target.file_name().unwrap_or(target.as_str()).to_string();
            actions.push(CodeAction {
                title: format!("Create selector '.{}' in '{}'", name, file_name),
                kind: CodeActionKind::Edit(vec![TextEdit {
                    path: target,
                    range: TextRange::empty(create_at),
                    new_text: format!("\n.{} {{\n\n}}\n", name),
                }]),
                is_preferred: false,
            });
        }

        actions.push(CodeAction {
            title: format!("Ignore selector '{}'", name),
            kind: CodeActionKind::IgnoreSelector {
                name,
                range: diagnostic.range,
            },
            is_preferred: false,
        });
    }
    actions
}
