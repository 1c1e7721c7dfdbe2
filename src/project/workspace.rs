//! Workspace index — Every known style and component document of a session.
//!
//! The index is an explicitly owned value with a `bootstrap`/`clear`
//! lifecycle. Hosts that share it across threads wrap it in a
//! [`SharedWorkspace`] and follow a single-writer/multiple-reader
//! discipline: parsing happens outside the lock ([`ParseJob::run`]), only
//! [`WorkspaceIndex::commit`] needs the write lock.
//!
//! ## Ordering
//!
//! - Re-parses of one document are last-write-wins: a job commits only if
//!   its ticket is still the latest for that document.
//! - Events arriving before bootstrap completes are queued, at most one per
//!   document, and replayed once the index is ready.
//! - Documents opened in the editor are never overwritten by disk contents
//!   during bootstrap.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use crate::base::{FileId, FileKind, FileSet, NormalizedPath};
use crate::hir::{
    ComponentDocument, Diagnostic, ParsedDocument, SelectorIndex, StyleDocument, StyleLookup,
    StyleTarget, check_component,
};

use super::tracker::{DocumentTracker, ParseTicket};
use super::{PathResolver, ProjectConfig};

/// A workspace index shared between an event handler and readers.
pub type SharedWorkspace = Arc<RwLock<WorkspaceIndex>>;

/// Where a document's current text came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocumentOrigin {
    /// Read from disk by the bootstrap scan or a file-created event.
    Disk,
    /// Supplied by the editor (opened or edited buffer).
    Editor,
}

/// Bootstrap gate for incremental updates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BootstrapState {
    #[default]
    Idle,
    Running,
    Ready,
}

/// A discrete notification from the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkspaceEvent {
    /// A file was opened or activated in the editor.
    Opened { path: NormalizedPath, text: Arc<str> },
    /// The editor buffer changed.
    Changed { path: NormalizedPath, text: Arc<str> },
    /// A file appeared on disk.
    Created { path: NormalizedPath, text: Arc<str> },
    /// A file was deleted.
    Deleted { path: NormalizedPath },
    /// Aliases, base directory or toggles changed.
    ConfigChanged(ProjectConfig),
}

impl WorkspaceEvent {
    /// The document this event targets, if any.
    pub fn path(&self) -> Option<&NormalizedPath> {
        match self {
            WorkspaceEvent::Opened { path, .. }
            | WorkspaceEvent::Changed { path, .. }
            | WorkspaceEvent::Created { path, .. }
            | WorkspaceEvent::Deleted { path } => Some(path),
            WorkspaceEvent::ConfigChanged(_) => None,
        }
    }

    fn is_editor(&self) -> bool {
        matches!(
            self,
            WorkspaceEvent::Opened { .. } | WorkspaceEvent::Changed { .. }
        )
    }
}

/// A parse that can run on any thread without touching the index.
#[derive(Clone, Debug)]
pub struct ParseJob {
    pub ticket: ParseTicket,
    pub path: NormalizedPath,
    pub kind: FileKind,
    pub text: Arc<str>,
    pub origin: DocumentOrigin,
}

impl ParseJob {
    /// Parse the job's text. `None` when a newer job superseded this one.
    pub fn run(&self) -> Option<ParsedDocument> {
        ParsedDocument::parse(
            self.ticket.file,
            self.path.clone(),
            self.kind,
            self.text.clone(),
            self.ticket.cancel_token(),
        )
    }
}

/// All style and component documents of one workspace session.
#[derive(Debug)]
pub struct WorkspaceIndex {
    config: ProjectConfig,
    files: FileSet,
    styles: FxHashMap<NormalizedPath, Arc<StyleDocument>>,
    components: FxHashMap<NormalizedPath, Arc<ComponentDocument>>,
    origins: FxHashMap<NormalizedPath, DocumentOrigin>,
    ignored: FxHashSet<SmolStr>,
    state: BootstrapState,
    pending: IndexMap<NormalizedPath, WorkspaceEvent>,
    pending_config: Option<ProjectConfig>,
    tracker: DocumentTracker,
}

impl WorkspaceIndex {
    /// Create an empty index. Incremental events are queued until
    /// [`bootstrap`](Self::bootstrap) completes.
    pub fn new(config: ProjectConfig) -> Self {
        Self {
            config,
            files: FileSet::new(),
            styles: FxHashMap::default(),
            components: FxHashMap::default(),
            origins: FxHashMap::default(),
            ignored: FxHashSet::default(),
            state: BootstrapState::Idle,
            pending: IndexMap::new(),
            pending_config: None,
            tracker: DocumentTracker::new(),
        }
    }

    /// Wrap the index for cross-thread use.
    pub fn into_shared(self) -> SharedWorkspace {
        Arc::new(RwLock::new(self))
    }

    // ------------------------------------------------------------------
    // Read APIs
    // ------------------------------------------------------------------

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.config.root
    }

    pub fn state(&self) -> BootstrapState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == BootstrapState::Ready
    }

    /// Number of queued events (config changes included).
    pub fn pending_len(&self) -> usize {
        self.pending.len() + usize::from(self.pending_config.is_some())
    }

    pub fn style(&self, path: &NormalizedPath) -> Option<&Arc<StyleDocument>> {
        self.styles.get(path)
    }

    pub fn component(&self, path: &NormalizedPath) -> Option<&Arc<ComponentDocument>> {
        self.components.get(path)
    }

    pub fn style_by_file(&self, file: FileId) -> Option<&Arc<StyleDocument>> {
        self.styles.get(&self.files.path(file)?)
    }

    /// All style documents, sorted by path.
    pub fn styles(&self) -> Vec<(&NormalizedPath, &Arc<StyleDocument>)> {
        let mut styles: Vec<_> = self.styles.iter().collect();
        styles.sort_by(|a, b| a.0.cmp(b.0));
        styles
    }

    /// All component documents, sorted by path.
    pub fn components(&self) -> Vec<(&NormalizedPath, &Arc<ComponentDocument>)> {
        let mut components: Vec<_> = self.components.iter().collect();
        components.sort_by(|a, b| a.0.cmp(b.0));
        components
    }

    pub fn origin(&self, path: &NormalizedPath) -> Option<DocumentOrigin> {
        self.origins.get(path).copied()
    }

    pub fn file_id(&self, path: &NormalizedPath) -> Option<FileId> {
        self.files.lookup(path)
    }

    pub fn file_path(&self, file: FileId) -> Option<NormalizedPath> {
        self.files.path(file)
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignored.contains(name)
    }

    pub fn ignored(&self) -> &FxHashSet<SmolStr> {
        &self.ignored
    }

    /// Selectors of a style sheet merged with everything it forwards to,
    /// recursively. Local declarations come first, then each forwarded
    /// sheet in directive order; a sheet already visited in the chain is
    /// skipped.
    pub fn resolved_selectors(&self, file: FileId) -> Option<Arc<SelectorIndex>> {
        let doc = self.style_by_file(file)?;
        if doc.forwards.is_empty() {
            return Some(doc.selectors.clone());
        }
        let mut merged = SelectorIndex::new();
        let mut visited = FxHashSet::default();
        self.visit_forwards(file, &mut visited, &mut |doc| merged.extend(&doc.selectors));
        Some(Arc::new(merged))
    }

    fn visit_forwards(
        &self,
        file: FileId,
        visited: &mut FxHashSet<FileId>,
        visit: &mut impl FnMut(&StyleDocument),
    ) {
        if !visited.insert(file) {
            return;
        }
        let Some(doc) = self.style_by_file(file) else {
            return;
        };
        visit(doc);
        let resolver = PathResolver::new(&self.config);
        for forward in &doc.forwards {
            let target = resolver.resolve_forward(&forward.source, &doc.path, |p| {
                self.styles.contains_key(p)
            });
            match target.and_then(|path| self.files.lookup(&path)) {
                Some(target) => self.visit_forwards(target, visited, visit),
                None => tracing::trace!(source = %forward.source, "forward unresolved"),
            }
        }
    }

    /// Components whose bindings reach `style` directly or through
    /// forwarding, sorted by path.
    pub fn dependents(&self, style: &NormalizedPath) -> Vec<NormalizedPath> {
        let Some(target) = self.files.lookup(style) else {
            return Vec::new();
        };
        let mut reach: FxHashMap<FileId, bool> = FxHashMap::default();
        let mut dependents: Vec<NormalizedPath> = self
            .components
            .iter()
            .filter(|(_, doc)| {
                doc.bindings.iter().filter_map(|b| b.resolved).any(|file| {
                    *reach.entry(file).or_insert_with(|| {
                        let mut visited = FxHashSet::default();
                        self.visit_forwards(file, &mut visited, &mut |_| {});
                        visited.contains(&target)
                    })
                })
            })
            .map(|(path, _)| path.clone())
            .collect();
        dependents.sort();
        dependents
    }

    /// Diagnostics of a component document; empty for anything else.
    pub fn diagnostics(&self, path: &NormalizedPath) -> Vec<Diagnostic> {
        match self.components.get(path) {
            Some(doc) => check_component(doc, self, &self.ignored),
            None => Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Apply a host event, or queue it while bootstrap has not completed.
    ///
    /// Returns the component documents whose diagnostics may have changed.
    pub fn apply_event(&mut self, event: WorkspaceEvent) -> Vec<NormalizedPath> {
        if !self.is_ready() {
            self.queue(event);
            return Vec::new();
        }
        self.dispatch(event)
    }

    fn queue(&mut self, event: WorkspaceEvent) {
        if let WorkspaceEvent::ConfigChanged(config) = event {
            self.pending_config = Some(config);
            return;
        }
        let Some(path) = event.path().cloned() else {
            return;
        };
        // A disk notification never replaces queued editor text
        let keep_queued = !event.is_editor()
            && !matches!(event, WorkspaceEvent::Deleted { .. })
            && self.pending.get(&path).is_some_and(WorkspaceEvent::is_editor);
        if keep_queued {
            return;
        }
        tracing::trace!(%path, "event queued until bootstrap completes");
        self.pending.insert(path, event);
    }

    fn dispatch(&mut self, event: WorkspaceEvent) -> Vec<NormalizedPath> {
        match event {
            WorkspaceEvent::Opened { path, text } | WorkspaceEvent::Changed { path, text } => {
                self.update(path, text, DocumentOrigin::Editor)
            }
            WorkspaceEvent::Created { path, text } => {
                if self.origin(&path) == Some(DocumentOrigin::Editor) {
                    return Vec::new();
                }
                self.update(path, text, DocumentOrigin::Disk)
            }
            WorkspaceEvent::Deleted { path } => self.remove(&path),
            WorkspaceEvent::ConfigChanged(config) => self.set_config(config),
        }
    }

    /// Parse and commit one document synchronously.
    pub fn update(
        &mut self,
        path: NormalizedPath,
        text: Arc<str>,
        origin: DocumentOrigin,
    ) -> Vec<NormalizedPath> {
        let Some(job) = self.schedule(path, text, origin) else {
            return Vec::new();
        };
        let parsed = job.run();
        self.commit(&job, parsed)
    }

    /// Take a ticket for a new parse of `path`. `None` for files the index
    /// does not handle.
    pub fn schedule(
        &mut self,
        path: NormalizedPath,
        text: Arc<str>,
        origin: DocumentOrigin,
    ) -> Option<ParseJob> {
        let Some(kind) = FileKind::of(&path) else {
            tracing::debug!(%path, "ignoring file with unsupported extension");
            return None;
        };
        let file = self.files.file_id(&path);
        let ticket = self.tracker.begin(file);
        Some(ParseJob {
            ticket,
            path,
            kind,
            text,
            origin,
        })
    }

    /// Store the result of `job` if it is still the latest parse of its
    /// document. Stale and cancelled results are dropped.
    pub fn commit(&mut self, job: &ParseJob, parsed: Option<ParsedDocument>) -> Vec<NormalizedPath> {
        if !self.tracker.is_current(&job.ticket) {
            tracing::debug!(path = %job.path, generation = job.ticket.generation, "dropping stale parse");
            return Vec::new();
        }
        let Some(parsed) = parsed else {
            tracing::debug!(path = %job.path, "parse cancelled");
            return Vec::new();
        };
        self.origins.insert(job.path.clone(), job.origin);

        match parsed {
            ParsedDocument::Style(doc) => {
                let path = doc.path.clone();
                let is_new = self.styles.insert(path.clone(), Arc::new(doc)).is_none();
                if self.state == BootstrapState::Running {
                    return Vec::new();
                }
                let mut affected = if is_new {
                    self.refresh_bindings()
                } else {
                    Vec::new()
                };
                affected.extend(self.dependents(&path));
                affected.sort();
                affected.dedup();
                affected
            }
            ParsedDocument::Component(mut doc) => {
                let path = doc.path.clone();
                self.resolve_bindings(&mut doc);
                self.components.insert(path.clone(), Arc::new(doc));
                vec![path]
            }
        }
    }

    /// Remove a deleted document.
    pub fn remove(&mut self, path: &NormalizedPath) -> Vec<NormalizedPath> {
        if let Some(file) = self.files.lookup(path) {
            self.tracker.forget(file);
        }
        self.origins.remove(path);
        self.components.remove(path);
        if self.styles.remove(path).is_none() {
            return Vec::new();
        }
        tracing::debug!(%path, "style document removed");
        self.refresh_bindings()
    }

    /// Replace the configuration and re-resolve every binding.
    pub fn set_config(&mut self, config: ProjectConfig) -> Vec<NormalizedPath> {
        self.config = config;
        self.refresh_bindings();
        self.components().into_iter().map(|(path, _)| path.clone()).collect()
    }

    /// Silence a selector name. Returns the components that access it.
    pub fn ignore_selector(&mut self, name: impl Into<SmolStr>) -> Vec<NormalizedPath> {
        let name = name.into();
        let mut affected: Vec<_> = self
            .components
            .iter()
            .filter(|(_, doc)| doc.accessors.iter().any(|a| a.name == name))
            .map(|(path, _)| path.clone())
            .collect();
        affected.sort();
        self.ignored.insert(name);
        affected
    }

    fn resolve_bindings(&self, doc: &mut ComponentDocument) {
        let resolver = PathResolver::new(&self.config);
        for binding in &mut doc.bindings {
            binding.resolved = resolver
                .resolve_import(&binding.source, &doc.path, |p| self.styles.contains_key(p))
                .map(|path| self.files.file_id(&path));
        }
    }

    /// Re-resolve every component's bindings against the current style set.
    /// Returns the components whose bindings changed.
    fn refresh_bindings(&mut self) -> Vec<NormalizedPath> {
        let mut updated = Vec::new();
        for (path, doc) in &self.components {
            let mut fresh = ComponentDocument::clone(doc);
            self.resolve_bindings(&mut fresh);
            if fresh.bindings != doc.bindings {
                updated.push((path.clone(), fresh));
            }
        }

        let mut changed = Vec::with_capacity(updated.len());
        for (path, doc) in updated {
            tracing::trace!(%path, "bindings re-resolved");
            self.components.insert(path.clone(), Arc::new(doc));
            changed.push(path);
        }
        changed.sort();
        changed
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Populate the index from a full scan and open the gate for
    /// incremental events. Safe to run again: unchanged files produce equal
    /// documents, and disk documents missing from the scan are dropped.
    pub fn bootstrap(&mut self, files: Vec<(NormalizedPath, Arc<str>)>) -> Vec<NormalizedPath> {
        let jobs = self.begin_bootstrap(files);
        let results: Vec<_> = jobs
            .into_par_iter()
            .map(|job| {
                let parsed = job.run();
                (job, parsed)
            })
            .collect();
        self.finish_bootstrap(results)
    }

    /// First half of [`bootstrap`](Self::bootstrap): close the gate and
    /// issue parse jobs. Editor-owned documents are skipped.
    pub fn begin_bootstrap(&mut self, files: Vec<(NormalizedPath, Arc<str>)>) -> Vec<ParseJob> {
        self.state = BootstrapState::Running;
        let scanned: FxHashSet<NormalizedPath> = files.iter().map(|(p, _)| p.clone()).collect();
        let vanished: Vec<NormalizedPath> = self
            .origins
            .iter()
            .filter(|(path, origin)| **origin == DocumentOrigin::Disk && !scanned.contains(*path))
            .map(|(path, _)| path.clone())
            .collect();
        for path in vanished {
            self.remove(&path);
        }

        let mut jobs = Vec::with_capacity(files.len());
        for (path, text) in files {
            if self.origin(&path) == Some(DocumentOrigin::Editor) {
                continue;
            }
            jobs.extend(self.schedule(path, text, DocumentOrigin::Disk));
        }
        jobs
    }

    /// Second half of [`bootstrap`](Self::bootstrap): commit results,
    /// resolve bindings, then replay queued events.
    pub fn finish_bootstrap(
        &mut self,
        results: Vec<(ParseJob, Option<ParsedDocument>)>,
    ) -> Vec<NormalizedPath> {
        let count = results.len();
        for (job, parsed) in results {
            self.commit(&job, parsed);
        }
        self.state = BootstrapState::Ready;
        self.refresh_bindings();
        tracing::debug!(
            documents = count,
            styles = self.styles.len(),
            components = self.components.len(),
            "bootstrap complete"
        );

        if let Some(config) = self.pending_config.take() {
            self.set_config(config);
        }
        let pending = std::mem::take(&mut self.pending);
        if !pending.is_empty() {
            tracing::debug!(events = pending.len(), "replaying queued events");
        }
        for (_, event) in pending {
            self.dispatch(event);
        }

        self.components().into_iter().map(|(path, _)| path.clone()).collect()
    }

    /// Flush every document and return to the idle state. Configuration
    /// and the ignored set are kept.
    pub fn clear(&mut self) {
        self.tracker.clear();
        self.styles.clear();
        self.components.clear();
        self.origins.clear();
        self.pending.clear();
        self.pending_config = None;
        self.state = BootstrapState::Idle;
    }
}

impl StyleLookup for WorkspaceIndex {
    fn style_target(&self, file: FileId) -> Option<StyleTarget> {
        let path = self.files.path(file)?;
        let doc = self.styles.get(&path)?;
        Some(StyleTarget {
            file,
            end: doc.end(),
            selectors: self.resolved_selectors(file)?,
            path,
        })
    }
}
