//! Diagnostics
//!
//! Unresolved selectors and unresolved style imports.
//!
//! This module turns a component document plus the selector indexes of the
//! style sheets it imports into findings. It never reports on dynamic
//! accessors or on names the user chose to ignore.

use std::sync::Arc;

use rowan::{TextRange, TextSize};
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use super::document::ComponentDocument;
use super::resolve::resolve_selector;
use super::selectors::SelectorIndex;
use crate::base::{FileId, NormalizedPath};

/// Maximum edit distance for a "did you mean" suggestion.
pub const MAX_SUGGESTION_DISTANCE: usize = 2;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl Severity {
    /// Convert to LSP severity number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Info => 3,
            Severity::Hint => 4,
        }
    }
}

/// What a diagnostic is about, with the data its quick fixes need.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// An accessor names no selector of its target style sheet.
    SelectorNotFound {
        name: SmolStr,
        /// Closest existing selector, if within the distance threshold.
        suggestion: Option<SmolStr>,
        /// The style sheet the binding resolved to.
        target_file: FileId,
        /// End of the target style sheet, where a new rule can be appended.
        create_at: TextSize,
    },
    /// A style import resolves to no known style sheet.
    ModuleNotFound { source: SmolStr },
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// The file containing this diagnostic.
    pub file: FileId,
    /// The offending range.
    pub range: TextRange,
    /// Severity level.
    pub severity: Severity,
    /// Error/warning code (e.g., "E0001").
    pub code: Option<Arc<str>>,
    /// The diagnostic message.
    pub message: Arc<str>,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(
        file: FileId,
        range: TextRange,
        message: impl Into<Arc<str>>,
        kind: DiagnosticKind,
    ) -> Self {
        Self {
            file,
            range,
            severity: Severity::Error,
            code: None,
            message: message.into(),
            kind,
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(
        file: FileId,
        range: TextRange,
        message: impl Into<Arc<str>>,
        kind: DiagnosticKind,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(file, range, message, kind)
        }
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// The missing selector name, for selector diagnostics.
    pub fn selector_name(&self) -> Option<&SmolStr> {
        match &self.kind {
            DiagnosticKind::SelectorNotFound { name, .. } => Some(name),
            DiagnosticKind::ModuleNotFound { .. } => None,
        }
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Diagnostic codes.
///
/// ## Code Ranges
///
/// - **E0001-E0099**: Resolution failures
pub mod codes {
    /// Accessed selector is not declared by the target style sheet.
    pub const SELECTOR_NOT_FOUND: &str = "E0001";
    /// Style import resolves to no known style sheet.
    pub const MODULE_NOT_FOUND: &str = "E0002";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics for one component document.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Add a "selector not found" warning.
    pub fn selector_not_found(
        &mut self,
        file: FileId,
        range: TextRange,
        name: &str,
        target: &StyleTarget,
        suggestion: Option<SmolStr>,
    ) {
        let target_name = target.path.file_name().unwrap_or(target.path.as_str());
        let mut message = format!("Selector '{}' not found in '{}'", name, target_name);
        if let Some(suggestion) = &suggestion {
            message.push_str(&format!(". Did you mean '{}'?", suggestion));
        }
        self.add(
            Diagnostic::warning(
                file,
                range,
                message,
                DiagnosticKind::SelectorNotFound {
                    name: name.into(),
                    suggestion,
                    target_file: target.file,
                    create_at: target.end,
                },
            )
            .with_code(codes::SELECTOR_NOT_FOUND),
        );
    }

    /// Add a "module not found" error.
    pub fn module_not_found(&mut self, file: FileId, range: TextRange, source: &str) {
        self.add(
            Diagnostic::error(
                file,
                range,
                format!("Cannot find module '{}'", source),
                DiagnosticKind::ModuleNotFound {
                    source: source.into(),
                },
            )
            .with_code(codes::MODULE_NOT_FOUND),
        );
    }

    /// Get all collected diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consume and return all diagnostics.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

// ============================================================================
// CHECKING
// ============================================================================

/// What the checker needs to know about a resolved style sheet.
#[derive(Clone, Debug)]
pub struct StyleTarget {
    pub file: FileId,
    pub path: NormalizedPath,
    /// Selectors of the sheet merged with everything it forwards to.
    pub selectors: Arc<SelectorIndex>,
    /// End-of-file offset.
    pub end: TextSize,
}

/// Access to resolved style sheets, implemented by the workspace index.
pub trait StyleLookup {
    fn style_target(&self, file: FileId) -> Option<StyleTarget>;
}

/// Check every binding and accessor of a component document.
pub fn check_component(
    doc: &ComponentDocument,
    styles: &impl StyleLookup,
    ignored: &FxHashSet<SmolStr>,
) -> Vec<Diagnostic> {
    let mut collector = DiagnosticCollector::new();

    for binding in &doc.bindings {
        if binding.resolved.is_none() {
            collector.module_not_found(doc.file, binding.range, &binding.source);
        }
    }

    // One lookup per resolved sheet; building a target merges forwards.
    let mut targets: FxHashMap<FileId, Option<StyleTarget>> = FxHashMap::default();
    for accessor in &doc.accessors {
        if accessor.is_dynamic || ignored.contains(&accessor.name) {
            continue;
        }
        let Some(target_file) = doc.binding_of(accessor).and_then(|b| b.resolved) else {
            continue;
        };
        let Some(target) = targets
            .entry(target_file)
            .or_insert_with(|| styles.style_target(target_file))
        else {
            continue;
        };
        if resolve_selector(&target.selectors, &accessor.name).is_found() {
            continue;
        }
        let suggestion = closest_match(
            target.selectors.names().map(|n| n.as_str()),
            &accessor.name,
        )
        .map(SmolStr::from);
        collector.selector_not_found(
            doc.file,
            accessor.key_range,
            &accessor.name,
            target,
            suggestion,
        );
    }

    collector.finish()
}

// ============================================================================
// EDIT DISTANCE
// ============================================================================

/// The candidate closest to `target` by edit distance, if it is within
/// [`MAX_SUGGESTION_DISTANCE`]. Ties go to the earlier candidate.
pub fn closest_match<'a>(
    candidates: impl IntoIterator<Item = &'a str>,
    target: &str,
) -> Option<&'a str> {
    let mut best: Option<(usize, &'a str)> = None;
    for candidate in candidates {
        let distance = edit_distance(candidate, target);
        if distance > MAX_SUGGESTION_DISTANCE {
            continue;
        }
        if best.is_none_or(|(best_distance, _)| distance < best_distance) {
            best = Some((distance, candidate));
        }
    }
    best.map(|(_, candidate)| candidate)
}

/// Levenshtein distance over chars.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != *cb);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}
