//! Completion suggestions implementation.
//!
//! Completion is offered right after a style binding is accessed:
//! `styles.`, `styles?.`, `styles['` and `styles["`, with an optional typed
//! prefix. Items come in the selector index's first-seen order.

use std::sync::Arc;

use rowan::{TextRange, TextSize};

use crate::base::{FileId, NormalizedPath};
use crate::hir::{ComponentDocument, SelectorEntry, SelectorKind};
use crate::project::WorkspaceIndex;

use super::text_utils::{is_identifier, trailing_identifier_len, trailing_member_operator};

/// Kind of completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionKind {
    RootClass,
    ChildClass,
    SiblingClass,
    SuffixClass,
}

impl CompletionKind {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::RootClass => 7,     // Class
            CompletionKind::ChildClass => 5,    // Field
            CompletionKind::SiblingClass => 10, // Property
            CompletionKind::SuffixClass => 20,  // EnumMember
        }
    }
}

impl From<SelectorKind> for CompletionKind {
    fn from(kind: SelectorKind) -> Self {
        match kind {
            SelectorKind::Root => CompletionKind::RootClass,
            SelectorKind::Child => CompletionKind::ChildClass,
            SelectorKind::Sibling => CompletionKind::SiblingClass,
            SelectorKind::Suffix => CompletionKind::SuffixClass,
        }
    }
}

/// A completion suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionItem {
    /// The selector name.
    pub label: Arc<str>,
    pub kind: CompletionKind,
    /// Source text of the declaring rule.
    pub preview: Arc<str>,
    /// Text to insert (if different from label).
    pub insert_text: Option<Arc<str>>,
    /// Range the insertion replaces.
    pub replace_range: TextRange,
}

/// How the binding is being accessed at the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AccessContext<'a> {
    /// `binding.` or `binding?.`; `operator` spans the `.`/`?.`.
    Member {
        binding: &'a str,
        operator: TextRange,
        prefix: &'a str,
    },
    /// `binding['` or `binding["`.
    Index { binding: &'a str, prefix: &'a str },
}

impl AccessContext<'_> {
    fn binding(&self) -> &str {
        match self {
            AccessContext::Member { binding, .. } | AccessContext::Index { binding, .. } => *binding,
        }
    }

    fn prefix(&self) -> &str {
        match self {
            AccessContext::Member { prefix, .. } | AccessContext::Index { prefix, .. } => *prefix,
        }
    }
}

/// Suggest selector names for the access being typed at `offset`.
pub fn completions(
    index: &WorkspaceIndex,
    path: &NormalizedPath,
    offset: TextSize,
) -> Vec<CompletionItem> {
    let Some(doc) = index.component(path) else {
        return Vec::new();
    };
    let Some(context) = access_context(&doc.text, offset) else {
        return Vec::new();
    };
    let Some(target) = binding_target(doc, context.binding()) else {
        return Vec::new();
    };
    let Some(selectors) = index.resolved_selectors(target) else {
        return Vec::new();
    };

    let prefix = context.prefix();
    let prefix_start = offset - TextSize::of(prefix);
    selectors
        .iter()
        .filter(|entry| entry.name.starts_with(prefix))
        .map(|entry| {
            let preview = index
                .style_by_file(entry.file)
                .and_then(|style| style.text.get(rule_span(entry)).map(Arc::from))
                .unwrap_or_else(|| Arc::from(""));
            let (insert_text, replace_range) = match context {
                AccessContext::Member { operator, .. } if !is_identifier(&entry.name) => {
                    let bracketed = if operator.len() == TextSize::new(2) {
                        format!("?.['{}']", entry.name)
                    } else {
                        format!("['{}']", entry.name)
                    };
                    (Some(Arc::from(bracketed)), TextRange::new(operator.start(), offset))
                }
                _ => (None, TextRange::new(prefix_start, offset)),
            };
            CompletionItem {
                label: Arc::from(entry.name.as_str()),
                kind: entry.kind.into(),
                preview,
                insert_text,
                replace_range,
            }
        })
        .collect()
}

fn rule_span(entry: &SelectorEntry) -> std::ops::Range<usize> {
    entry.rule_range.start().into()..entry.rule_range.end().into()
}

/// The resolved style sheet of the binding named `name`.
fn binding_target(doc: &ComponentDocument, name: &str) -> Option<FileId> {
    doc.bindings
        .iter()
        .find(|b| b.local_name.as_deref() == Some(name))?
        .resolved
}

fn access_context(text: &str, offset: TextSize) -> Option<AccessContext<'_>> {
    let before = text.get(..usize::from(offset))?;

    // binding['prefix / binding["prefix
    let quote_at = before.rfind(['\'', '"']);
    if let Some(quote_at) = quote_at {
        let prefix = &before[quote_at + 1..];
        let head = &before[..quote_at];
        let open = if head.ends_with("?.[") {
            Some(3)
        } else if head.ends_with('[') {
            Some(1)
        } else {
            None
        };
        if let Some(open) = open {
            if !prefix.contains(['\'', '"', ']', '\n']) {
                let binding = binding_before(&head[..head.len() - open])?;
                return Some(AccessContext::Index { binding, prefix });
            }
        }
    }

    // binding.prefix / binding?.prefix
    let prefix_len = trailing_identifier_len(before);
    let head = &before[..before.len() - prefix_len];
    let operator = trailing_member_operator(head)?;
    let operator_start = head.len() - operator.len();
    let binding = binding_before(&head[..operator_start])?;
    Some(AccessContext::Member {
        binding,
        operator: TextRange::at(
            TextSize::new(operator_start as u32),
            TextSize::of(operator),
        ),
        prefix: &before[head.len()..],
    })
}

/// The identifier ending `text`, unless it is itself a property.
fn binding_before(text: &str) -> Option<&str> {
    let len = trailing_identifier_len(text);
    if len == 0 {
        return None;
    }
    let head = &text[..text.len() - len];
    if head.ends_with('.') {
        return None;
    }
    Some(&text[text.len() - len..])
}
