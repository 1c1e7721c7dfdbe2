//! End-to-end IDE flows.

use cssmodules::base::StyleDialect;
use cssmodules::hir::{DiagnosticKind, SelectorKind, index_style_text};
use cssmodules::ide::{AnalysisHost, CodeActionKind};
use cssmodules::project::{FeatureToggles, ProjectConfig, WorkspaceEvent};
use cssmodules::{FileId, LineCol, TextSize};

use crate::helpers::source_fixtures::{BUTTON_TSX, BUTTON_WORKSPACE};
use crate::helpers::workspace_helpers::{ROOT, files, host_from_files, offset_of, path};

const STYLE: &str = ".box{}\n";
const APP: &str = "import styles from './a.module.css';\n\
                   export const App = () => <div className={styles.box}>{styles['missing']}</div>;\n";

fn box_host() -> AnalysisHost {
    host_from_files(&[("/ws/a.module.css", STYLE), ("/ws/App.tsx", APP)])
}

#[test]
fn test_access_resolves_to_declaration() {
    let host = box_host();
    let analysis = host.analysis();
    let app = path("/ws/App.tsx");

    let target = analysis
        .resolve(&app, offset_of(APP, "styles.box", 8))
        .expect("resolved");
    assert_eq!(target.path, path("/ws/a.module.css"));
    assert_eq!(&STYLE[target.declaration_range], ".box{}");
    assert_eq!(&STYLE[target.selection_range], ".box");
    assert_eq!(target.selection_start, LineCol::new(0, 0));
    assert_eq!(target.kind, SelectorKind::Root);

    // Positions outside any accessor resolve to nothing
    assert!(analysis.resolve(&app, TextSize::new(0)).is_none());
}

#[test]
fn test_declaration_text_reindexes_to_the_same_name() {
    let sheet = ".box{}\n.sm\\:p-2 { color: red; }\n.a[data-x='.q'] {}\n";
    let app = "import styles from './a.module.css';\n\
               styles.box; styles['sm:p-2']; styles.a;\n";
    let host = host_from_files(&[("/ws/a.module.css", sheet), ("/ws/App.tsx", app)]);
    let analysis = host.analysis();

    for (needle, name) in [
        ("styles.box", "box"),
        ("styles['sm:p-2']", "sm:p-2"),
        ("styles.a;", "a"),
    ] {
        let at = offset_of(app, needle, needle.find(name).unwrap_or_default() as u32);
        let target = analysis
            .resolve(&path("/ws/App.tsx"), at)
            .expect("resolved");
        let declaration = &sheet[target.declaration_range];
        let reindexed = index_style_text(FileId::new(9), declaration, StyleDialect::Css);
        assert!(reindexed.selectors.contains(name), "{declaration}");
    }
}

#[test]
fn test_missing_selector_diagnostic_and_fixes() {
    let mut host = box_host();
    let app = path("/ws/App.tsx");

    let diagnostics = host.analysis().diagnostics(&app);
    assert_eq!(diagnostics.len(), 1);
    let diagnostic = &diagnostics[0];
    assert_eq!(&APP[diagnostic.range], "missing");
    assert!(matches!(
        &diagnostic.kind,
        DiagnosticKind::SelectorNotFound { suggestion: None, create_at, .. }
            if *create_at == TextSize::of(STYLE)
    ));

    let actions = host.analysis().code_actions(&app, diagnostic.range.start());
    let titles: Vec<_> = actions.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Create selector '.missing' in 'a.module.css'", "Ignore selector 'missing'"]
    );
    let CodeActionKind::IgnoreSelector { name, range } = &actions[1].kind else {
        panic!("expected the ignore action");
    };

    let affected = host.ignore_selector(name.clone(), *range);
    assert_eq!(affected, vec![app.clone()]);
    assert!(host.analysis().diagnostics(&app).is_empty());
}

#[test]
fn test_creating_the_selector_clears_the_diagnostic() {
    let mut host = box_host();
    let app = path("/ws/App.tsx");

    let affected = host.apply_event(WorkspaceEvent::Changed {
        path: path("/ws/a.module.css"),
        text: ".box{}\n.missing {}\n".into(),
    });
    assert_eq!(affected, vec![app.clone()]);
    assert!(host.analysis().diagnostics(&app).is_empty());

    let target = host
        .analysis()
        .resolve(&app, offset_of(APP, "missing", 0))
        .expect("now resolved");
    assert_eq!(target.name, "missing");
}

#[test]
fn test_typo_fix_rewrites_the_member() {
    let host = host_from_files(&BUTTON_WORKSPACE);
    let button = path("/ws/src/Button.tsx");
    let offset = offset_of(BUTTON_TSX, "butten", 2);

    let actions = host.analysis().code_actions(&button, offset);
    let CodeActionKind::Edit(edits) = &actions[0].kind else {
        panic!("expected an edit");
    };
    assert!(actions[0].is_preferred);
    assert_eq!(edits[0].path, button);
    assert_eq!(&BUTTON_TSX[edits[0].range], "butten");
    assert_eq!(edits[0].new_text, "button");
}

#[test]
fn test_hover_previews_the_rule() {
    let host = host_from_files(&BUTTON_WORKSPACE);
    let button = path("/ws/src/Button.tsx");

    let hover = host
        .analysis()
        .hover(&button, offset_of(BUTTON_TSX, "button-primary", 0))
        .expect("hover");
    assert_eq!(hover.name, "button-primary");
    assert_eq!(hover.preview, ".button:hover,\n.button-primary.large {\n  color: blue;\n}");
    assert_eq!(
        hover.contents,
        format!(
            "```css\n{}\n```\n*root* selector in `Button.module.css`",
            hover.preview
        )
    );

    // Dynamic keys have nothing to show
    assert!(
        host.analysis()
            .hover(&button, offset_of(BUTTON_TSX, "[variant]", 1))
            .is_none()
    );
}

#[test]
fn test_disabled_features_return_nothing() {
    let mut host = box_host();
    let app = path("/ws/App.tsx");
    let features = FeatureToggles {
        goto_definition: false,
        code_actions: false,
        ..FeatureToggles::default()
    };
    host.apply_event(WorkspaceEvent::ConfigChanged(
        ProjectConfig::new(path(ROOT)).with_features(features),
    ));

    let analysis = host.analysis();
    let missing = offset_of(APP, "missing", 0);
    assert!(analysis.goto_definition(&app, offset_of(APP, "box", 0)).is_empty());
    assert!(analysis.code_actions(&app, missing).is_empty());
    assert_eq!(analysis.diagnostics(&app).len(), 1);
}

#[test]
fn test_positions_round_trip() {
    let host = box_host();
    let analysis = host.analysis();
    let app = path("/ws/App.tsx");

    let offset = offset_of(APP, "export", 0);
    let position = analysis.line_col(&app, offset).expect("position");
    assert_eq!(position, LineCol::new(1, 0));
    assert_eq!(analysis.offset(&app, position), Some(offset));

    assert!(analysis.line_col(&path("/ws/unknown.tsx"), offset).is_none());
    assert!(
        analysis
            .code_actions(&path("/ws/a.module.css"), TextSize::new(0))
            .is_empty()
    );
}

#[test]
fn test_clear_then_reload() {
    let mut host = box_host();
    host.clear();
    assert!(host.analysis().selectors(&path("/ws/a.module.css")).is_empty());

    host.bootstrap(files(&[
        ("/ws/a.module.css", STYLE),
        ("/ws/App.tsx", APP),
    ]));
    let names: Vec<_> = host
        .analysis()
        .selectors(&path("/ws/a.module.css"))
        .into_iter()
        .map(|e| e.name.to_string())
        .collect();
    assert_eq!(names, vec!["box"]);
    assert_eq!(host.analysis().accessors(&path("/ws/App.tsx")).len(), 2);
}
