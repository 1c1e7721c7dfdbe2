//! Completion tests against the fixture workspace.

use cssmodules::ide::{CompletionItem, CompletionKind};
use cssmodules::project::WorkspaceEvent;
use rstest::rstest;

use crate::helpers::source_fixtures::BUTTON_WORKSPACE;
use crate::helpers::workspace_helpers::{host_from_files, path};

/// Completions at the `|` marker of a component importing both fixtures.
fn complete_at(marked: &str) -> Vec<CompletionItem> {
    let offset = marked.find('|').expect("cursor marker");
    let text = marked.replace('|', "");
    let mut host = host_from_files(&BUTTON_WORKSPACE);
    host.apply_event(WorkspaceEvent::Opened {
        path: path("/ws/src/Panel.tsx"),
        text: text.into(),
    });
    host.analysis()
        .completions(&path("/ws/src/Panel.tsx"), (offset as u32).into())
}

const HEADER: &str = "import button from './Button.module.css';\n\
                      import card from './Card.module.scss';\n";

fn labels(items: &[CompletionItem]) -> Vec<String> {
    items.iter().map(|i| i.label.to_string()).collect()
}

#[test]
fn test_member_completion_lists_every_selector() {
    let items = complete_at(&format!("{HEADER}button.|"));
    assert_eq!(labels(&items), vec!["button", "button-primary", "large"]);
    assert_eq!(items[1].insert_text.as_deref(), Some("['button-primary']"));
    assert!(items.iter().all(|i| i.kind == CompletionKind::RootClass));
}

#[test]
fn test_prefix_includes_suffix_selectors() {
    let items = complete_at(&format!("{HEADER}card.card|"));
    assert_eq!(labels(&items), vec!["card", "card-header", "card-header-title"]);
    let kinds: Vec<_> = items.iter().map(|i| i.kind).collect();
    assert_eq!(
        kinds,
        vec![
            CompletionKind::RootClass,
            CompletionKind::SuffixClass,
            CompletionKind::SuffixClass,
        ]
    );
    assert!(items[1].preview.starts_with("&-header {"));
}

#[rstest]
#[case("card['is-|", vec!["is-active"])]
#[case("card?.ic|", vec!["icon"])]
#[case("card[\"|", vec!["card", "is-active", "icon", "card-header", "card-header-title"])]
#[case("unknown.|", vec![])]
#[case("x.card.|", vec![])]
fn test_completion_contexts(#[case] access: &str, #[case] expected: Vec<&str>) {
    let items = complete_at(&format!("{HEADER}{access}"));
    assert_eq!(labels(&items), expected);
}

#[test]
fn test_optional_member_rewrites_to_optional_index() {
    let items = complete_at(&format!("{HEADER}card?.|"));
    let header = items
        .iter()
        .find(|i| &*i.label == "card-header")
        .expect("card-header item");
    assert_eq!(header.insert_text.as_deref(), Some("?.['card-header']"));
    assert_eq!(header.kind.to_lsp(), 20);
}
