//! AnalysisHost and Analysis — Unified state management for IDE features.
//!
//! The `AnalysisHost` owns the workspace index and provides `Analysis`
//! snapshots for querying. This pattern ensures consistent reads across
//! multiple queries.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = AnalysisHost::new(ProjectConfig::new(root));
//! host.load_workspace(&WorkspaceLoader::new(), root_dir)?;
//!
//! // Apply editor events
//! host.apply_event(WorkspaceEvent::Changed { path, text });
//!
//! // Get a snapshot for queries
//! let analysis = host.analysis();
//! let target = analysis.goto_definition(&path, offset);
//! let diagnostics = analysis.diagnostics(&path);
//! ```

use std::path::Path;
use std::sync::Arc;

use rowan::{TextRange, TextSize};
use smol_str::SmolStr;

use crate::base::{LineCol, NormalizedPath};
use crate::hir::{Diagnostic, SelectorEntry, StyleAccessor};
use crate::project::{
    ProjectConfig, ProjectError, WorkspaceEvent, WorkspaceIndex, WorkspaceLoader,
};

use super::{
    CodeAction, CompletionItem, GotoResult, GotoTarget, HoverResult, code_actions, completions,
    goto_definition, hover,
};

/// Owns all mutable state for the IDE layer.
///
/// Apply changes via `apply_event()` and `ignore_selector()`, then get a
/// consistent snapshot via `analysis()`.
#[derive(Debug)]
pub struct AnalysisHost {
    index: WorkspaceIndex,
}

impl AnalysisHost {
    /// Create a host with an empty, not yet bootstrapped index.
    pub fn new(config: ProjectConfig) -> Self {
        Self {
            index: WorkspaceIndex::new(config),
        }
    }

    /// Bootstrap from files the host already has in memory.
    pub fn bootstrap(&mut self, files: Vec<(NormalizedPath, Arc<str>)>) -> Vec<NormalizedPath> {
        self.index.bootstrap(files)
    }

    /// Bootstrap by scanning `root` on disk. Returns the number of files read.
    pub fn load_workspace(
        &mut self,
        loader: &WorkspaceLoader,
        root: &Path,
    ) -> Result<usize, ProjectError> {
        loader.load_into_index(root, &mut self.index)
    }

    /// Apply a host event. Returns the documents whose diagnostics must be
    /// recomputed.
    pub fn apply_event(&mut self, event: WorkspaceEvent) -> Vec<NormalizedPath> {
        self.index.apply_event(event)
    }

    /// Silence `name` everywhere. `range` is the diagnostic the user acted
    /// on. Returns the documents whose diagnostics must be recomputed.
    pub fn ignore_selector(&mut self, name: impl Into<SmolStr>, range: TextRange) -> Vec<NormalizedPath> {
        let name = name.into();
        tracing::debug!(%name, ?range, "selector ignored");
        self.index.ignore_selector(name)
    }

    /// Flush every document. Configuration and ignored names are kept.
    pub fn clear(&mut self) {
        self.index.clear();
    }

    pub fn index(&self) -> &WorkspaceIndex {
        &self.index
    }

    /// Get a consistent snapshot for querying.
    pub fn analysis(&self) -> Analysis<'_> {
        Analysis { index: &self.index }
    }
}

/// A read-only snapshot of the workspace.
///
/// Every query degrades to an empty result when the document is unknown or
/// the feature is disabled.
#[derive(Clone, Copy, Debug)]
pub struct Analysis<'a> {
    index: &'a WorkspaceIndex,
}

impl<'a> Analysis<'a> {
    /// Wrap an index owned elsewhere (e.g. behind a `SharedWorkspace` read
    /// guard).
    pub fn new(index: &'a WorkspaceIndex) -> Self {
        Self { index }
    }

    /// Resolve the accessor at `offset` to its best declaration.
    pub fn resolve(&self, path: &NormalizedPath, offset: TextSize) -> Option<GotoTarget> {
        self.goto_definition(path, offset).targets.into_iter().next()
    }

    pub fn goto_definition(&self, path: &NormalizedPath, offset: TextSize) -> GotoResult {
        if !self.index.config().features.goto_definition {
            return GotoResult::empty();
        }
        goto_definition(self.index, path, offset)
    }

    pub fn hover(&self, path: &NormalizedPath, offset: TextSize) -> Option<HoverResult> {
        if !self.index.config().features.hover {
            return None;
        }
        hover(self.index, path, offset)
    }

    pub fn completions(&self, path: &NormalizedPath, offset: TextSize) -> Vec<CompletionItem> {
        if !self.index.config().features.completion {
            return Vec::new();
        }
        completions(self.index, path, offset)
    }

    pub fn diagnostics(&self, path: &NormalizedPath) -> Vec<Diagnostic> {
        if !self.index.config().features.diagnostics {
            return Vec::new();
        }
        self.index.diagnostics(path)
    }

    pub fn code_actions(&self, path: &NormalizedPath, offset: TextSize) -> Vec<CodeAction> {
        if !self.index.config().features.code_actions {
            return Vec::new();
        }
        code_actions(self.index, path, offset)
    }

    /// Selectors declared by a style sheet itself, in first-seen order.
    pub fn selectors(&self, path: &NormalizedPath) -> Vec<SelectorEntry> {
        self.index
            .style(path)
            .map(|doc| doc.selectors.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Accessors of a component document.
    pub fn accessors(&self, path: &NormalizedPath) -> Vec<StyleAccessor> {
        self.index
            .component(path)
            .map(|doc| doc.accessors.clone())
            .unwrap_or_default()
    }

    /// Convert a line/column position to an offset.
    pub fn offset(&self, path: &NormalizedPath, position: LineCol) -> Option<TextSize> {
        match self.index.component(path) {
            Some(doc) => doc.line_index.offset(position),
            None => self.index.style(path)?.line_index.offset(position),
        }
    }

    /// Convert an offset to a line/column position.
    pub fn line_col(&self, path: &NormalizedPath, offset: TextSize) -> Option<LineCol> {
        match self.index.component(path) {
            Some(doc) => Some(doc.line_index.line_col(offset)),
            None => Some(self.index.style(path)?.line_index.line_col(offset)),
        }
    }
}
