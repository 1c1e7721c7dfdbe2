//! Selector matching — resolving an accessed name to its declarations.
//!
//! Matching runs against the selector index of one style document (merged
//! with whatever it forwards to) and has two buckets; the first non-empty
//! bucket wins:
//!
//! 1. **Exact**: a root, child or sibling entry whose logical name equals
//!    the target.
//! 2. **Suffix**: suffix entries whose un-prefixed suffix text occurs in the
//!    target. An entry whose compounded name equals the target leads;
//!    the rest are ordered by the left-most match position and then by
//!    first-seen order.

use super::selectors::{SelectorEntry, SelectorIndex};

/// Which matcher bucket produced a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchBucket {
    Exact,
    Suffix,
}

/// Result of resolving one name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveResult {
    /// Matches in precedence order; never empty.
    Found {
        bucket: MatchBucket,
        matches: Vec<SelectorEntry>,
    },
    /// No bucket matched.
    NotFound,
}

impl ResolveResult {
    /// The winning entry.
    pub fn entry(&self) -> Option<&SelectorEntry> {
        match self {
            ResolveResult::Found { matches, .. } => matches.first(),
            ResolveResult::NotFound => None,
        }
    }

    /// All matches, best first.
    pub fn matches(&self) -> &[SelectorEntry] {
        match self {
            ResolveResult::Found { matches, .. } => matches,
            ResolveResult::NotFound => &[],
        }
    }

    /// Check if resolution was successful.
    pub fn is_found(&self) -> bool {
        matches!(self, ResolveResult::Found { .. })
    }
}

/// Resolve `target` against a selector index.
pub fn resolve_selector(index: &SelectorIndex, target: &str) -> ResolveResult {
    if let Some(entry) = index.class(target) {
        return ResolveResult::Found {
            bucket: MatchBucket::Exact,
            matches: vec![entry.clone()],
        };
    }

    let matches = suffix_matches(index, target);
    if matches.is_empty() {
        ResolveResult::NotFound
    } else {
        ResolveResult::Found {
            bucket: MatchBucket::Suffix,
            matches,
        }
    }
}

/// Suffix entries whose suffix text occurs in `target`. An entry whose
/// compounded name equals `target` comes first; the rest follow left-most
/// match first. The sort is stable, so equal keys keep first-seen order.
fn suffix_matches(index: &SelectorIndex, target: &str) -> Vec<SelectorEntry> {
    let mut found: Vec<(bool, usize, &SelectorEntry)> = index
        .suffix_entries()
        .filter_map(|entry| {
            let suffix = entry.suffix.as_deref()?;
            target
                .find(suffix)
                .map(|position| (entry.name != target, position, entry))
        })
        .collect();
    found.sort_by_key(|(inexact, position, _)| (*inexact, *position));
    found.into_iter().map(|(_, _, entry)| entry.clone()).collect()
}

/// Every match for `target`, best first; empty when unresolved.
pub fn match_selectors(index: &SelectorIndex, target: &str) -> Vec<SelectorEntry> {
    match resolve_selector(index, target) {
        ResolveResult::Found { matches, .. } => matches,
        ResolveResult::NotFound => Vec::new(),
    }
}
