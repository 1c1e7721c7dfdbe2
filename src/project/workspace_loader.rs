use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::base::constants::IGNORED_DIRECTORIES;
use crate::base::{FileKind, NormalizedPath};

use super::{ProjectError, SharedWorkspace, WorkspaceIndex};

/// Reads style and component files from disk for the bootstrap scan.
#[derive(Clone, Copy, Debug, Default)]
pub struct WorkspaceLoader;

impl WorkspaceLoader {
    pub fn new() -> Self {
        Self
    }

    /// Reads every style and component file under `root`, in parallel.
    ///
    /// Unreadable files are logged and skipped; only a missing root is an
    /// error.
    pub fn scan(&self, root: &Path) -> Result<Vec<(NormalizedPath, Arc<str>)>, ProjectError> {
        let paths = collect_file_paths(root)?;
        let files: Vec<_> = paths
            .par_iter()
            .filter_map(|path| match self.load_file(path) {
                Ok(text) => Some((NormalizedPath::new(path), text)),
                Err(e) => {
                    tracing::warn!("Skipping file: {}", e);
                    None
                }
            })
            .collect();
        tracing::debug!(root = %root.display(), files = files.len(), "workspace scanned");
        Ok(files)
    }

    /// Reads a single file the index can handle.
    pub fn load_file(&self, path: &Path) -> Result<Arc<str>, ProjectError> {
        if FileKind::of(&NormalizedPath::new(path)).is_none() {
            return Err(ProjectError::UnsupportedExtension(path.to_path_buf()));
        }
        std::fs::read_to_string(path)
            .map(Arc::from)
            .map_err(|e| ProjectError::io(path, e))
    }

    /// Scans `root` and bootstraps an index owned by the caller.
    pub fn load_into_index(
        &self,
        root: &Path,
        index: &mut WorkspaceIndex,
    ) -> Result<usize, ProjectError> {
        let files = self.scan(root)?;
        let count = files.len();
        index.bootstrap(files);
        Ok(count)
    }

    /// Scans `root` and bootstraps a shared index. The write lock is held
    /// only to issue parse jobs and to commit their results; parsing runs
    /// unlocked so readers are never blocked by it.
    pub fn load_into_shared(
        &self,
        root: &Path,
        workspace: &SharedWorkspace,
    ) -> Result<usize, ProjectError> {
        let files = self.scan(root)?;
        let count = files.len();

        let jobs = workspace.write().begin_bootstrap(files);
        let results: Vec<_> = jobs
            .into_par_iter()
            .map(|job| {
                let parsed = job.run();
                (job, parsed)
            })
            .collect();
        workspace.write().finish_bootstrap(results);
        Ok(count)
    }
}

/// Collects style and component file paths under `root`, skipping ignored
/// directories.
pub fn collect_file_paths(root: &Path) -> Result<Vec<std::path::PathBuf>, ProjectError> {
    if !root.is_dir() {
        return Err(ProjectError::NotADirectory(root.to_path_buf()));
    }

    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        entry.depth() == 0
            || !entry.file_type().is_dir()
            || !entry
                .file_name()
                .to_str()
                .is_some_and(|name| IGNORED_DIRECTORIES.contains(&name))
    });

    let mut paths = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Failed to read directory entry: {}", e);
                continue;
            }
        };
        if entry.file_type().is_file() && FileKind::of(&NormalizedPath::new(entry.path())).is_some()
        {
            paths.push(entry.into_path());
        }
    }
    paths.sort();
    Ok(paths)
}
