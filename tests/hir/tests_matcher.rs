//! Matcher precedence tests.

use cssmodules::FileId;
use cssmodules::base::StyleDialect;
use cssmodules::hir::{
    MatchBucket, ResolveResult, SelectorIndex, SelectorKind, index_style_text, resolve_selector,
};
use rstest::rstest;

use crate::helpers::source_fixtures::CARD_SCSS;

fn build(source: &str) -> SelectorIndex {
    index_style_text(FileId::new(0), source, StyleDialect::Scss).selectors
}

fn winner(index: &SelectorIndex, target: &str) -> Option<String> {
    resolve_selector(index, target).entry().map(|e| e.name.to_string())
}

#[test]
fn test_exact_class_beats_suffix() {
    // `card-header` exists both as a root class and as a suffix entry
    let index = build(".card { &-header {} }\n.card-header {}");
    let result = resolve_selector(&index, "card-header");
    let ResolveResult::Found { bucket, matches } = result else {
        panic!("expected a match");
    };
    assert_eq!(bucket, MatchBucket::Exact);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].kind, SelectorKind::Root);
}

#[test]
fn test_suffix_tie_break_prefers_leftmost_then_first_seen() {
    let index = build(".x { &-ab {} &-a {} }");
    // "-a" and "-ab" both start at position 1 of "x-ab"; first seen wins
    let matches: Vec<_> = resolve_selector(&index, "x-ab")
        .matches()
        .iter()
        .map(|e| e.suffix.as_deref().unwrap_or_default().to_string())
        .collect();
    assert_eq!(matches, vec!["-ab", "-a"]);

    let index = build(".x { &-b {} &-a {} }");
    // "-a" occurs before "-b" in "q-a-b"
    assert_eq!(winner(&index, "q-a-b"), Some("x-a".to_string()));
}

#[rstest]
#[case("card", Some("card"))]
#[case("icon", Some("icon"))]
#[case("card-header-title", Some("card-header-title"))]
#[case("is-active", Some("is-active"))]
#[case("missing", None)]
fn test_card_module_resolution(#[case] target: &str, #[case] expected: Option<&str>) {
    let index = build(CARD_SCSS);
    assert_eq!(winner(&index, target).as_deref(), expected);
}

#[test]
fn test_extend_keeps_existing_names() {
    let mut local = build(".a {}");
    let forwarded = index_style_text(FileId::new(9), ".a {}\n.b {}", StyleDialect::Css).selectors;
    local.extend(&forwarded);

    assert_eq!(local.get("a").map(|e| e.file), Some(FileId::new(0)));
    assert_eq!(local.get("b").map(|e| e.file), Some(FileId::new(9)));
}
