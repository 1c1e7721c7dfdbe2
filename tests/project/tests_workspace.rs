//! Workspace index lifecycle tests.

use std::sync::Arc;
use std::thread;

use cssmodules::project::{
    BootstrapState, DocumentOrigin, ProjectConfig, WorkspaceEvent, WorkspaceIndex,
};

use crate::helpers::source_fixtures::BUTTON_WORKSPACE;
use crate::helpers::workspace_helpers::{ROOT, files, index_from_files, path};

fn style_names(index: &WorkspaceIndex, p: &str) -> Vec<String> {
    index
        .style(&path(p))
        .map(|doc| doc.selectors.names().map(|n| n.to_string()).collect())
        .unwrap_or_default()
}

#[test]
fn test_bootstrap_twice_is_idempotent() {
    let mut index = index_from_files(&BUTTON_WORKSPACE);
    let styles: Vec<_> = index
        .styles()
        .into_iter()
        .map(|(p, doc)| (p.clone(), Arc::clone(doc)))
        .collect();
    let components: Vec<_> = index
        .components()
        .into_iter()
        .map(|(p, doc)| (p.clone(), Arc::clone(doc)))
        .collect();

    index.bootstrap(files(&BUTTON_WORKSPACE));

    let styles_again: Vec<_> = index
        .styles()
        .into_iter()
        .map(|(p, doc)| (p.clone(), Arc::clone(doc)))
        .collect();
    let components_again: Vec<_> = index
        .components()
        .into_iter()
        .map(|(p, doc)| (p.clone(), Arc::clone(doc)))
        .collect();
    assert_eq!(styles, styles_again);
    assert_eq!(components, components_again);
    assert_eq!(index.state(), BootstrapState::Ready);
}

#[test]
fn test_rebootstrap_drops_vanished_disk_files_only() {
    let mut index = index_from_files(&[
        ("/ws/a.css", ".a {}"),
        ("/ws/b.css", ".b {}"),
    ]);
    index.apply_event(WorkspaceEvent::Opened {
        path: path("/ws/draft.css"),
        text: ".draft {}".into(),
    });

    index.bootstrap(files(&[("/ws/a.css", ".a {}")]));

    assert!(index.style(&path("/ws/a.css")).is_some());
    assert!(index.style(&path("/ws/b.css")).is_none());
    assert_eq!(index.origin(&path("/ws/draft.css")), Some(DocumentOrigin::Editor));
}

#[test]
fn test_editor_text_survives_disk_notifications() {
    let mut index = index_from_files(&[("/ws/a.css", ".disk {}")]);
    index.apply_event(WorkspaceEvent::Changed {
        path: path("/ws/a.css"),
        text: ".edited {}".into(),
    });
    let affected = index.apply_event(WorkspaceEvent::Created {
        path: path("/ws/a.css"),
        text: ".disk {}".into(),
    });
    assert!(affected.is_empty());
    assert_eq!(style_names(&index, "/ws/a.css"), vec!["edited"]);

    // Bootstrap never overwrites an editor-owned document either
    index.bootstrap(files(&[("/ws/a.css", ".disk {}")]));
    assert_eq!(style_names(&index, "/ws/a.css"), vec!["edited"]);
}

#[test]
fn test_queued_events_coalesce_per_path() {
    let mut index = WorkspaceIndex::new(ProjectConfig::new(path(ROOT)));
    index.apply_event(WorkspaceEvent::Opened {
        path: path("/ws/a.css"),
        text: ".one {}".into(),
    });
    // A disk notification does not replace queued editor text
    index.apply_event(WorkspaceEvent::Created {
        path: path("/ws/a.css"),
        text: ".disk {}".into(),
    });
    index.apply_event(WorkspaceEvent::Created {
        path: path("/ws/b.css"),
        text: ".b {}".into(),
    });
    index.apply_event(WorkspaceEvent::Deleted {
        path: path("/ws/b.css"),
    });
    assert_eq!(index.pending_len(), 2);
    assert_eq!(index.state(), BootstrapState::Idle);

    index.bootstrap(files(&[("/ws/b.css", ".b {}")]));

    assert_eq!(style_names(&index, "/ws/a.css"), vec!["one"]);
    assert!(index.style(&path("/ws/b.css")).is_none());
    assert_eq!(index.pending_len(), 0);
}

#[test]
fn test_config_change_queued_during_bootstrap_applies_first() {
    let mut index = WorkspaceIndex::new(ProjectConfig::new(path(ROOT)));
    let aliased = ProjectConfig::new(path(ROOT)).with_alias("@styles/*", ["src/styles/*"]);
    index.apply_event(WorkspaceEvent::ConfigChanged(aliased));

    index.bootstrap(files(&[
        ("/ws/src/styles/theme.module.css", ".dark {}"),
        ("/ws/src/App.tsx", "import t from '@styles/theme.module.css';\nt.dark;"),
    ]));

    let app = index.component(&path("/ws/src/App.tsx")).expect("component");
    assert!(app.bindings[0].resolved.is_some());
    assert!(index.diagnostics(&path("/ws/src/App.tsx")).is_empty());
}

#[test]
fn test_style_edit_invalidates_dependents_through_forwards() {
    let mut index = index_from_files(&[
        ("/ws/_tokens.scss", ".token {}"),
        ("/ws/theme.module.scss", "@use 'tokens';\n.theme {}"),
        ("/ws/App.tsx", "import t from './theme.module.scss';\nt.token; t.extra;"),
        ("/ws/Other.tsx", "import o from './other.module.css';"),
    ]);
    let app = path("/ws/App.tsx");
    assert_eq!(index.diagnostics(&app).len(), 1);

    let affected = index.apply_event(WorkspaceEvent::Changed {
        path: path("/ws/_tokens.scss"),
        text: ".token {}\n.extra {}".into(),
    });
    assert_eq!(affected, vec![app.clone()]);
    assert!(index.diagnostics(&app).is_empty());
}

#[test]
fn test_forwarded_names_keep_local_precedence() {
    let index = index_from_files(&[
        ("/ws/base.scss", ".shared {}\n.base {}"),
        ("/ws/a.module.scss", "@import './base';\n.shared { color: red; }"),
    ]);
    let file = index.file_id(&path("/ws/a.module.scss")).expect("file");
    let merged = index.resolved_selectors(file).expect("merged");
    assert_eq!(merged.get("shared").map(|e| e.file), Some(file));
    let names: Vec<_> = merged.names().map(|n| n.to_string()).collect();
    assert_eq!(names, vec!["shared", "base"]);
}

#[test]
fn test_deleting_a_sheet_turns_accesses_into_module_errors() {
    let mut index = index_from_files(&BUTTON_WORKSPACE);
    let button = path("/ws/src/Button.tsx");
    let affected = index.apply_event(WorkspaceEvent::Deleted {
        path: path("/ws/src/Button.module.css"),
    });
    assert_eq!(affected, vec![button.clone()]);

    let diagnostics = index.diagnostics(&button);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code.as_deref(), Some("E0002"));
}

#[test]
fn test_shared_workspace_serves_concurrent_readers() {
    let shared = index_from_files(&BUTTON_WORKSPACE).into_shared();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || shared.read().diagnostics(&path("/ws/src/Button.tsx")).len())
        })
        .collect();
    shared.write().apply_event(WorkspaceEvent::Changed {
        path: path("/ws/src/Button.tsx"),
        text: "import styles from './Button.module.css';\nstyles.button;".into(),
    });

    for reader in readers {
        let count = reader.join().expect("reader thread");
        // Either the original diagnostics or none after the edit
        assert!(count == 1 || count == 0);
    }
    assert!(shared.read().diagnostics(&path("/ws/src/Button.tsx")).is_empty());
}
