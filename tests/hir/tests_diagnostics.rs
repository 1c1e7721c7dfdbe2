//! Diagnostics and suggestion tests.

use std::cell::Cell;
use std::sync::Arc;

use cssmodules::base::{FileKind, StyleDialect};
use cssmodules::hir::{
    ComponentDocument, DiagnosticKind, ParsedDocument, Severity, StyleLookup, StyleTarget,
    check_component, closest_match, codes, index_style_text,
};
use cssmodules::{FileId, NormalizedPath, TextSize};
use rstest::rstest;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use tokio_util::sync::CancellationToken;

const STYLE: FileId = FileId::new(0);
const COMPONENT: FileId = FileId::new(1);

/// Style sheets keyed by file, standing in for the workspace index.
#[derive(Default)]
struct Sheets(FxHashMap<FileId, StyleTarget>);

impl Sheets {
    fn with(mut self, file: FileId, path: &str, text: &str) -> Self {
        let path = NormalizedPath::parse(path);
        let dialect = match FileKind::of(&path) {
            Some(FileKind::Style(dialect)) => dialect,
            _ => StyleDialect::Css,
        };
        let selectors = index_style_text(file, text, dialect).selectors;
        self.0.insert(
            file,
            StyleTarget {
                file,
                path,
                selectors: Arc::new(selectors),
                end: TextSize::of(text),
            },
        );
        self
    }
}

impl StyleLookup for Sheets {
    fn style_target(&self, file: FileId) -> Option<StyleTarget> {
        self.0.get(&file).cloned()
    }
}

/// Parse a component and resolve every binding to `target`.
fn component(text: &str, target: Option<FileId>) -> ComponentDocument {
    let parsed = ParsedDocument::parse(
        COMPONENT,
        NormalizedPath::parse("/ws/App.tsx"),
        FileKind::Component,
        Arc::from(text),
        &CancellationToken::new(),
    );
    let Some(ParsedDocument::Component(mut doc)) = parsed else {
        panic!("expected a component document");
    };
    for binding in &mut doc.bindings {
        binding.resolved = target;
    }
    doc
}

fn no_ignores() -> FxHashSet<SmolStr> {
    FxHashSet::default()
}

#[test]
fn test_typo_suggests_closest_selector() {
    let sheets = Sheets::default().with(STYLE, "/ws/a.module.css", ".button {}\n.box {}\n");
    let text = "import s from './a.module.css';\ns.butten;";
    let doc = component(text, Some(STYLE));

    let diagnostics = check_component(&doc, &sheets, &no_ignores());
    assert_eq!(diagnostics.len(), 1);
    let diagnostic = &diagnostics[0];
    assert_eq!(diagnostic.severity, Severity::Warning);
    assert_eq!(diagnostic.code.as_deref(), Some(codes::SELECTOR_NOT_FOUND));
    assert_eq!(&text[diagnostic.range], "butten");
    assert_eq!(
        &*diagnostic.message,
        "Selector 'butten' not found in 'a.module.css'. Did you mean 'button'?"
    );
    let DiagnosticKind::SelectorNotFound {
        suggestion,
        target_file,
        create_at,
        ..
    } = &diagnostic.kind
    else {
        panic!("expected a selector diagnostic");
    };
    assert_eq!(suggestion.as_deref(), Some("button"));
    assert_eq!(*target_file, STYLE);
    assert_eq!(*create_at, TextSize::new(19));
}

/// Counts how often the checker asks for a sheet.
struct CountingSheets {
    sheets: Sheets,
    lookups: Cell<usize>,
}

impl StyleLookup for CountingSheets {
    fn style_target(&self, file: FileId) -> Option<StyleTarget> {
        self.lookups.set(self.lookups.get() + 1);
        self.sheets.style_target(file)
    }
}

#[test]
fn test_each_sheet_is_looked_up_once() {
    let counting = CountingSheets {
        sheets: Sheets::default().with(STYLE, "/ws/a.module.css", ".box {}"),
        lookups: Cell::new(0),
    };
    let doc = component(
        "import s from './a.module.css';\ns.box; s.bx; s['box']; s.nope;",
        Some(STYLE),
    );

    let diagnostics = check_component(&doc, &counting, &no_ignores());
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(counting.lookups.get(), 1);
}

#[test]
fn test_attribute_values_and_escaped_names() {
    let sheets = Sheets::default().with(
        STYLE,
        "/ws/a.module.css",
        ".a[data-x='.q'] {}\n.sm\\:p-2 {}\n",
    );
    let text = "import s from './a.module.css';\ns.a; s.q; s['sm:p-2'];";
    let doc = component(text, Some(STYLE));

    let diagnostics = check_component(&doc, &sheets, &no_ignores());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(&text[diagnostics[0].range], "q");
}

#[test]
fn test_far_names_get_no_suggestion() {
    let sheets = Sheets::default().with(STYLE, "/ws/a.module.css", ".box {}");
    let doc = component("import s from './a.module.css';\ns['missing'];", Some(STYLE));

    let diagnostics = check_component(&doc, &sheets, &no_ignores());
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(
        &diagnostics[0].kind,
        DiagnosticKind::SelectorNotFound { suggestion: None, .. }
    ));
    assert_eq!(
        &*diagnostics[0].message,
        "Selector 'missing' not found in 'a.module.css'"
    );
}

#[test]
fn test_dynamic_and_ignored_accesses_are_silent() {
    let sheets = Sheets::default().with(STYLE, "/ws/a.module.css", ".box {}");
    let doc = component(
        "import s from './a.module.css';\ns[variant]; s[`x-${n}`]; s.legacy;",
        Some(STYLE),
    );
    let ignored: FxHashSet<SmolStr> = [SmolStr::new("legacy")].into_iter().collect();

    assert!(check_component(&doc, &sheets, &ignored).is_empty());
    assert_eq!(check_component(&doc, &sheets, &no_ignores()).len(), 1);
}

#[test]
fn test_unresolved_import_is_an_error_on_the_statement() {
    let text = "import s from './gone.module.css';\ns.anything;";
    let doc = component(text, None);

    let diagnostics = check_component(&doc, &Sheets::default(), &no_ignores());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert_eq!(diagnostics[0].code.as_deref(), Some(codes::MODULE_NOT_FOUND));
    assert_eq!(
        &text[diagnostics[0].range],
        "import s from './gone.module.css';"
    );
    assert!(matches!(
        &diagnostics[0].kind,
        DiagnosticKind::ModuleNotFound { source } if source == "./gone.module.css"
    ));
}

#[test]
fn test_suffix_matches_count_as_found() {
    let sheets =
        Sheets::default().with(STYLE, "/ws/a.module.scss", ".card { &-title {} &--wide {} }");
    let doc = component(
        "import s from './a.module.scss';\ns['card-title']; s.cardTitle; s['x--wide'];",
        Some(STYLE),
    );
    let names: Vec<_> = check_component(&doc, &sheets, &no_ignores())
        .iter()
        .filter_map(|d| d.selector_name().map(|n| n.to_string()))
        .collect();
    // `cardTitle` contains neither `-title` nor `--wide`
    assert_eq!(names, vec!["cardTitle"]);
}

#[rstest]
#[case(&["button", "box"], "butten", Some("button"))]
#[case(&["button"], "btn", None)]
#[case(&["abc", "abd"], "abx", Some("abc"))]
#[case(&[], "x", None)]
fn test_closest_match(
    #[case] candidates: &[&str],
    #[case] target: &str,
    #[case] expected: Option<&str>,
) {
    assert_eq!(closest_match(candidates.iter().copied(), target), expected);
}
