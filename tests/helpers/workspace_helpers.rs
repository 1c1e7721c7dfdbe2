//! Workspace test helpers for setting up analysis hosts and indexes.

use std::sync::Arc;

use cssmodules::NormalizedPath;
use cssmodules::TextSize;
use cssmodules::ide::AnalysisHost;
use cssmodules::project::{ProjectConfig, WorkspaceIndex};

/// Workspace root used by in-memory fixtures.
pub const ROOT: &str = "/ws";

pub fn path(p: &str) -> NormalizedPath {
    NormalizedPath::parse(p)
}

/// In-memory file list in the shape `bootstrap` takes.
pub fn files(files: &[(&str, &str)]) -> Vec<(NormalizedPath, Arc<str>)> {
    files
        .iter()
        .map(|(p, text)| (path(p), Arc::from(*text)))
        .collect()
}

/// Creates a bootstrapped index rooted at [`ROOT`].
pub fn index_from_files(sources: &[(&str, &str)]) -> WorkspaceIndex {
    index_with_config(ProjectConfig::new(path(ROOT)), sources)
}

/// Creates a bootstrapped index with a custom configuration.
pub fn index_with_config(config: ProjectConfig, sources: &[(&str, &str)]) -> WorkspaceIndex {
    let mut index = WorkspaceIndex::new(config);
    index.bootstrap(files(sources));
    index
}

/// Creates a bootstrapped AnalysisHost rooted at [`ROOT`].
pub fn host_from_files(sources: &[(&str, &str)]) -> AnalysisHost {
    let mut host = AnalysisHost::new(ProjectConfig::new(path(ROOT)));
    host.bootstrap(files(sources));
    host
}

/// Offset of the first occurrence of `needle` in `text`, plus `delta`.
pub fn offset_of(text: &str, needle: &str, delta: u32) -> TextSize {
    let start = text
        .find(needle)
        .unwrap_or_else(|| panic!("'{}' not found in fixture", needle));
    TextSize::new(start as u32 + delta)
}
