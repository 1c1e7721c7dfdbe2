//! Path resolution
//!
//! Turning an import specifier into a known style document.
//!
//! Candidates are tried in a fixed order and the first one that names a
//! known style document wins:
//!
//! 1. relative to the importing file's directory (specifier starts with `.`)
//! 2. relative to the workspace root
//! 3. the first configured alias whose pattern matches
//! 4. relative to the workspace root plus the configured base directory
//!
//! Stylesheet forwarding directives (`@import`, `@use`, `@forward`) also try
//! the SCSS/LESS partial and extension spellings of each candidate.

use crate::base::NormalizedPath;
use crate::base::constants::{STYLE_EXTENSIONS, strip_specifier_suffix};

use super::ProjectConfig;

/// Resolves specifiers against a [`ProjectConfig`].
#[derive(Clone, Copy, Debug)]
pub struct PathResolver<'a> {
    config: &'a ProjectConfig,
}

impl<'a> PathResolver<'a> {
    pub fn new(config: &'a ProjectConfig) -> Self {
        Self { config }
    }

    /// Resolve a component's style import.
    pub fn resolve_import(
        &self,
        source: &str,
        importer: &NormalizedPath,
        is_known: impl Fn(&NormalizedPath) -> bool,
    ) -> Option<NormalizedPath> {
        let source = strip_specifier_suffix(source);
        let resolved = self
            .candidates(source, importer)
            .into_iter()
            .find(|c| is_known(c));
        match &resolved {
            Some(path) => tracing::trace!(source, %importer, %path, "import resolved"),
            None => tracing::debug!(source, %importer, "import unresolved"),
        }
        resolved
    }

    /// Resolve a style sheet's forwarding directive, trying partial and
    /// extension variants of every candidate.
    pub fn resolve_forward(
        &self,
        source: &str,
        importer: &NormalizedPath,
        is_known: impl Fn(&NormalizedPath) -> bool,
    ) -> Option<NormalizedPath> {
        let source = strip_specifier_suffix(source);
        // `@use 'sass:math'` and remote URLs never name a workspace file
        if source.contains("://") || source.starts_with("sass:") {
            return None;
        }
        let mut candidates = Vec::new();
        // Bare names are relative to the importing sheet first
        if !source.starts_with(['.', '/']) {
            if let Some(dir) = importer.parent() {
                candidates.push(dir.join(source));
            }
        }
        candidates.extend(self.candidates(source, importer));
        candidates.iter().flat_map(forward_variants).find(|c| is_known(c))
    }

    /// All candidate paths in resolution order.
    pub fn candidates(&self, source: &str, importer: &NormalizedPath) -> Vec<NormalizedPath> {
        let mut candidates = Vec::new();
        let root = &self.config.root;

        if source.starts_with('.') {
            if let Some(dir) = importer.parent() {
                candidates.push(dir.join(source));
            }
        }
        candidates.push(root.join(source.trim_start_matches('/')));
        candidates.extend(self.config.expand_alias(source));
        if let Some(base) = self.config.base_path() {
            candidates.push(base.join(source.trim_start_matches('/')));
        }
        candidates
    }
}

/// The path itself, then partial (`_name`) and extension variants.
fn forward_variants(candidate: &NormalizedPath) -> Vec<NormalizedPath> {
    let mut variants = vec![candidate.clone()];
    let (Some(dir), Some(name)) = (candidate.parent(), candidate.file_name()) else {
        return variants;
    };

    let has_style_extension = candidate
        .extension()
        .is_some_and(|ext| STYLE_EXTENSIONS.contains(&ext));
    if has_style_extension {
        if !name.starts_with('_') {
            variants.push(dir.join(&format!("_{}", name)));
        }
        return variants;
    }

    for ext in STYLE_EXTENSIONS {
        variants.push(dir.join(&format!("{}.{}", name, ext)));
        variants.push(dir.join(&format!("_{}.{}", name, ext)));
    }
    for index in ["_index.scss", "index.scss", "_index.less", "index.less", "index.css"] {
        variants.push(candidate.join(index));
    }
    variants
}
