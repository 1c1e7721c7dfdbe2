//! File set management for tracking source files.

use indexmap::IndexMap;
use parking_lot::RwLock;

use super::{FileId, NormalizedPath};

/// Manages the mapping between normalized paths and FileIds.
///
/// Ids are never reused within a session: removing a document from the
/// workspace index keeps its id so a re-created file gets the same handle.
#[derive(Debug, Default)]
pub struct FileSet {
    inner: RwLock<FileSetInner>,
}

#[derive(Debug, Default)]
struct FileSetInner {
    path_to_id: IndexMap<NormalizedPath, FileId>,
    id_to_path: IndexMap<FileId, NormalizedPath>,
    next_id: u32,
}

impl FileSet {
    /// Create a new empty file set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create a FileId for a path.
    pub fn file_id(&self, path: &NormalizedPath) -> FileId {
        // Fast path: read lock
        if let Some(&id) = self.inner.read().path_to_id.get(path) {
            return id;
        }

        let mut inner = self.inner.write();

        // Double-check after acquiring write lock
        if let Some(&id) = inner.path_to_id.get(path) {
            return id;
        }

        let id = FileId::new(inner.next_id);
        inner.next_id += 1;
        inner.path_to_id.insert(path.clone(), id);
        inner.id_to_path.insert(id, path.clone());
        id
    }

    /// Look up the FileId of a path without interning it.
    pub fn lookup(&self, path: &NormalizedPath) -> Option<FileId> {
        self.inner.read().path_to_id.get(path).copied()
    }

    /// Get the path for a FileId.
    pub fn path(&self, file: FileId) -> Option<NormalizedPath> {
        self.inner.read().id_to_path.get(&file).cloned()
    }

    /// Get the number of interned paths.
    pub fn len(&self) -> usize {
        self.inner.read().path_to_id.len()
    }

    /// Check if the file set is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
