//! File classification by extension.

use super::NormalizedPath;
use super::constants::{COMPONENT_EXTENSIONS, CSS_EXT, LESS_EXT, SCSS_EXT};

/// Style-sheet dialect, which controls a few lexical details
/// (line comments are only recognized in SCSS and LESS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleDialect {
    Css,
    Scss,
    Less,
}

impl StyleDialect {
    /// Whether `//` starts a comment in this dialect.
    pub fn has_line_comments(self) -> bool {
        !matches!(self, StyleDialect::Css)
    }

    /// The canonical file extension.
    pub fn extension(self) -> &'static str {
        match self {
            StyleDialect::Css => CSS_EXT,
            StyleDialect::Scss => SCSS_EXT,
            StyleDialect::Less => LESS_EXT,
        }
    }
}

/// What a workspace file is, as far as the index is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Style(StyleDialect),
    Component,
}

impl FileKind {
    /// Classify a path by its extension; `None` for files the index ignores.
    pub fn of(path: &NormalizedPath) -> Option<FileKind> {
        Self::from_extension(path.extension()?)
    }

    /// Classify an extension (without the dot, case-insensitive).
    pub fn from_extension(ext: &str) -> Option<FileKind> {
        let ext = ext.to_ascii_lowercase();
        match ext.as_str() {
            CSS_EXT => Some(FileKind::Style(StyleDialect::Css)),
            SCSS_EXT => Some(FileKind::Style(StyleDialect::Scss)),
            LESS_EXT => Some(FileKind::Style(StyleDialect::Less)),
            e if COMPONENT_EXTENSIONS.contains(&e) => Some(FileKind::Component),
            _ => None,
        }
    }

    pub fn is_style(self) -> bool {
        matches!(self, FileKind::Style(_))
    }
}
