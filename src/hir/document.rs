//! Parsed documents
//!
//! The per-file data the workspace index stores.
//!
//! Documents are immutable once built. Every edit produces a fresh
//! document that replaces the old one wholesale, so readers holding an
//! `Arc` to the previous version never observe a half-updated value.

use std::sync::Arc;

use rowan::TextSize;
use tokio_util::sync::CancellationToken;

use super::accessors::{StyleAccessor, StyleImportBinding, extract_accessors};
use super::selectors::{SelectorIndex, StyleForward, index_style};
use crate::base::{FileId, FileKind, LineIndex, NormalizedPath, StyleDialect};
use crate::parser::SyntaxError;
use crate::parser::component::AstNode as _;
use crate::parser::style::AstNode as _;
use crate::parser::{component, style};

/// A parsed style sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleDocument {
    pub path: NormalizedPath,
    pub file: FileId,
    pub dialect: StyleDialect,
    pub text: Arc<str>,
    /// Selectors declared in this document only.
    pub selectors: Arc<SelectorIndex>,
    pub forwards: Vec<StyleForward>,
    pub errors: Vec<SyntaxError>,
    pub line_index: LineIndex,
}

impl StyleDocument {
    /// Offset of the end of the document (where new selectors are appended).
    pub fn end(&self) -> TextSize {
        TextSize::of(&*self.text)
    }
}

/// A parsed component file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentDocument {
    pub path: NormalizedPath,
    pub file: FileId,
    pub text: Arc<str>,
    pub bindings: Vec<StyleImportBinding>,
    pub accessors: Vec<StyleAccessor>,
    pub errors: Vec<SyntaxError>,
    pub line_index: LineIndex,
}

impl ComponentDocument {
    /// The binding an accessor was made on.
    pub fn binding_of(&self, accessor: &StyleAccessor) -> Option<&StyleImportBinding> {
        self.bindings.get(accessor.binding)
    }

    /// The innermost accessor whose range contains `offset`.
    pub fn accessor_at(&self, offset: TextSize) -> Option<&StyleAccessor> {
        self.accessors
            .iter()
            .filter(|a| a.range.contains_inclusive(offset))
            .min_by_key(|a| a.range.len())
    }
}

/// Either kind of document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParsedDocument {
    Style(StyleDocument),
    Component(ComponentDocument),
}

impl ParsedDocument {
    /// Parse a document off-index.
    ///
    /// Pure with respect to the workspace: the result carries no resolved
    /// bindings yet. Returns `None` once `cancel` fires, so a superseded
    /// parse stops early instead of producing a stale result.
    pub fn parse(
        file: FileId,
        path: NormalizedPath,
        kind: FileKind,
        text: Arc<str>,
        cancel: &CancellationToken,
    ) -> Option<ParsedDocument> {
        if cancel.is_cancelled() {
            return None;
        }
        let line_index = LineIndex::new(&text);

        let document = match kind {
            FileKind::Style(dialect) => {
                let parse = style::parse(&text, dialect);
                if cancel.is_cancelled() {
                    return None;
                }
                let root = style::SourceFile::cast(parse.syntax())?;
                let extraction = index_style(file, &root);
                ParsedDocument::Style(StyleDocument {
                    path,
                    file,
                    dialect,
                    text,
                    selectors: Arc::new(extraction.selectors),
                    forwards: extraction.forwards,
                    errors: parse.errors,
                    line_index,
                })
            }
            FileKind::Component => {
                let parse = component::parse(&text);
                if cancel.is_cancelled() {
                    return None;
                }
                let root = component::SourceFile::cast(parse.syntax())?;
                let extraction = extract_accessors(&root);
                ParsedDocument::Component(ComponentDocument {
                    path,
                    file,
                    text,
                    bindings: extraction.bindings,
                    accessors: extraction.accessors,
                    errors: parse.errors,
                    line_index,
                })
            }
        };

        if cancel.is_cancelled() {
            return None;
        }
        Some(document)
    }

    pub fn path(&self) -> &NormalizedPath {
        match self {
            ParsedDocument::Style(doc) => &doc.path,
            ParsedDocument::Component(doc) => &doc.path,
        }
    }

    pub fn file(&self) -> FileId {
        match self {
            ParsedDocument::Style(doc) => doc.file,
            ParsedDocument::Component(doc) => doc.file,
        }
    }

    pub fn text(&self) -> &Arc<str> {
        match self {
            ParsedDocument::Style(doc) => &doc.text,
            ParsedDocument::Component(doc) => &doc.text,
        }
    }
}
