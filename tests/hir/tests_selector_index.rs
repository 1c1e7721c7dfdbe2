//! Selector index tests.

use cssmodules::FileId;
use cssmodules::base::StyleDialect;
use cssmodules::hir::{SelectorKind, index_style_text};
use rstest::rstest;

use crate::helpers::source_fixtures::{BUTTON_CSS, CARD_SCSS};

fn summary(text: &str, dialect: StyleDialect) -> Vec<(String, SelectorKind)> {
    index_style_text(FileId::new(0), text, dialect)
        .selectors
        .iter()
        .map(|e| (e.name.to_string(), e.kind))
        .collect()
}

#[test]
fn test_card_module_kinds_and_order() {
    assert_eq!(
        summary(CARD_SCSS, StyleDialect::Scss),
        vec![
            ("card".to_string(), SelectorKind::Root),
            ("is-active".to_string(), SelectorKind::Sibling),
            ("icon".to_string(), SelectorKind::Child),
            ("card-header".to_string(), SelectorKind::Suffix),
            ("card-header-title".to_string(), SelectorKind::Suffix),
        ]
    );
}

#[test]
fn test_names_are_distinct_and_ranges_in_bounds() {
    for (text, dialect) in [(CARD_SCSS, StyleDialect::Scss), (BUTTON_CSS, StyleDialect::Css)] {
        let extraction = index_style_text(FileId::new(3), text, dialect);
        let names: Vec<_> = extraction.selectors.names().collect();
        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(names.len(), deduped.len());

        for entry in extraction.selectors.iter() {
            assert_eq!(entry.file, FileId::new(3));
            assert!(usize::from(entry.rule_range.end()) <= text.len());
            assert!(entry.rule_range.contains_range(entry.selector_range));
        }
    }
}

#[test]
fn test_compound_and_pseudo_selectors() {
    let names: Vec<_> = summary(BUTTON_CSS, StyleDialect::Css)
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(names, vec!["button", "button-primary", "large"]);
}

#[test]
fn test_suffix_rule_range_points_at_declaring_rule() {
    let extraction = index_style_text(FileId::new(0), CARD_SCSS, StyleDialect::Scss);
    let title = extraction.selectors.get("card-header-title").expect("title entry");
    let rule = &CARD_SCSS[title.rule_range];
    assert!(rule.starts_with("&-title {"));
    assert!(rule.ends_with('}'));
    assert_eq!(&CARD_SCSS[title.selector_range], "&-title");
    assert_eq!(title.suffix.as_deref(), Some("-title"));
}

#[rstest]
#[case(".a { @media print { &-b {} } }", "a-b")]
#[case(".a { &__elem { &--mod {} } }", "a__elem--mod")]
#[case(".a, .b { &-c {} }", "b-c")]
#[case(".x.y { &-z {} }", "y-z")]
fn test_suffix_compounding(#[case] source: &str, #[case] expected: &str) {
    let extraction = index_style_text(FileId::new(0), source, StyleDialect::Scss);
    let entry = extraction.selectors.get(expected);
    assert_eq!(entry.map(|e| e.kind), Some(SelectorKind::Suffix));
}

#[test]
fn test_forwards_are_collected_in_order() {
    let source = "@use 'sass:math';\n@import './base.module.scss';\n@forward 'tokens';\n.a {}";
    let extraction = index_style_text(FileId::new(0), source, StyleDialect::Scss);
    let forwards: Vec<_> = extraction.forwards.iter().map(|f| f.source.as_str()).collect();
    assert_eq!(forwards, vec!["sass:math", "./base.module.scss", "tokens"]);
}

#[test]
fn test_interpolated_and_bare_nesting_are_skipped() {
    let source = ".a-#{$x} {}\n.b { & {} &:hover {} &- {} }";
    assert_eq!(
        summary(source, StyleDialect::Scss),
        vec![("b".to_string(), SelectorKind::Root)]
    );
}

#[rstest]
#[case(".a[data-x='.q'] {}", vec!["a"])]
#[case(".a[title=\"x]y.z\"].b {}", vec!["a", "b"])]
#[case(".sm\\:p-2:hover {}", vec!["sm:p-2"])]
#[case(".w-1\\/2 {}", vec!["w-1/2"])]
#[case(".\\31 0 {}", vec!["10"])]
fn test_attribute_values_and_escapes(#[case] source: &str, #[case] expected: Vec<&str>) {
    let extraction = index_style_text(FileId::new(0), source, StyleDialect::Css);
    let names: Vec<_> = extraction.selectors.names().map(|n| n.as_str()).collect();
    assert_eq!(names, expected);
}
