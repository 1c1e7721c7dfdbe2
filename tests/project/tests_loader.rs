//! Disk loading tests.

use std::fs;
use std::path::Path;

use cssmodules::NormalizedPath;
use cssmodules::project::workspace_loader::collect_file_paths;
use cssmodules::project::{
    BootstrapState, DocumentOrigin, ProjectConfig, WorkspaceIndex, WorkspaceLoader,
};
use tempfile::TempDir;

use crate::helpers::source_fixtures::{BUTTON_CSS, BUTTON_TSX, CARD_SCSS};

fn write(root: &Path, relative: &str, text: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, text).unwrap();
}

fn button_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "src/Button.module.css", BUTTON_CSS);
    write(dir.path(), "src/Button.tsx", BUTTON_TSX);
    write(dir.path(), "src/Card.module.scss", CARD_SCSS);
    write(dir.path(), "README.md", "# not indexed");
    write(dir.path(), "node_modules/lib/x.module.css", ".vendored {}");
    dir
}

#[test]
fn test_collect_skips_ignored_directories_and_other_files() {
    let dir = button_project();
    let names: Vec<String> = collect_file_paths(dir.path())
        .unwrap()
        .iter()
        .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(
        names,
        vec!["src/Button.module.css", "src/Button.tsx", "src/Card.module.scss"]
    );
}

#[test]
fn test_load_into_index_end_to_end() {
    let dir = button_project();
    let root = NormalizedPath::new(dir.path());
    let mut index = WorkspaceIndex::new(ProjectConfig::new(root.clone()));

    let count = WorkspaceLoader::new().load_into_index(dir.path(), &mut index).unwrap();
    assert_eq!(count, 3);
    assert_eq!(index.state(), BootstrapState::Ready);

    let button = root.join("src/Button.tsx");
    assert_eq!(index.origin(&button), Some(DocumentOrigin::Disk));
    let names: Vec<_> = index
        .diagnostics(&button)
        .iter()
        .filter_map(|d| d.selector_name().map(|n| n.to_string()))
        .collect();
    assert_eq!(names, vec!["butten"]);
}

#[test]
fn test_load_into_shared_workspace() {
    let dir = button_project();
    let root = NormalizedPath::new(dir.path());
    let shared = WorkspaceIndex::new(ProjectConfig::new(root.clone())).into_shared();

    let count = WorkspaceLoader::new().load_into_shared(dir.path(), &shared).unwrap();
    assert_eq!(count, 3);

    let index = shared.read();
    assert!(index.is_ready());
    assert_eq!(index.styles().len(), 2);
    assert_eq!(index.components().len(), 1);
}
