//! Style-sheet parser tests.

use cssmodules::base::StyleDialect;
use cssmodules::parser::style::{self, AstNode, Item, SourceFile};
use rstest::rstest;

use crate::helpers::source_fixtures::{BUTTON_CSS, CARD_SCSS};

fn root(source: &str, dialect: StyleDialect) -> SourceFile {
    SourceFile::cast(style::parse(source, dialect).syntax()).expect("source file root")
}

// =============================================================================
// LOSSLESS
// =============================================================================

#[rstest]
#[case(BUTTON_CSS, StyleDialect::Css)]
#[case(CARD_SCSS, StyleDialect::Scss)]
#[case("@media (max-width: 10px) { .a { b: c } }", StyleDialect::Css)]
#[case(".a { .mixin(); &:extend(.b); }", StyleDialect::Less)]
#[case(".a { color: red", StyleDialect::Css)]
#[case("}}} .a {", StyleDialect::Scss)]
fn test_tree_text_round_trips(#[case] source: &str, #[case] dialect: StyleDialect) {
    let parse = style::parse(source, dialect);
    assert_eq!(parse.syntax().text().to_string(), source);
}

// =============================================================================
// STRUCTURE
// =============================================================================

#[test]
fn test_selector_lists_split_on_commas() {
    let source = root(BUTTON_CSS, StyleDialect::Css);
    let rules: Vec<_> = source
        .items()
        .filter_map(|item| match item {
            Item::Rule(rule) => Some(rule),
            _ => None,
        })
        .collect();
    assert_eq!(rules.len(), 2);

    let selectors: Vec<_> = rules[1].selectors().map(|s| s.text()).collect();
    assert_eq!(selectors, vec![".button:hover", ".button-primary.large"]);
}

#[test]
fn test_nested_rules_and_declarations() {
    let source = root(CARD_SCSS, StyleDialect::Scss);
    let Some(Item::Rule(card)) = source.items().next() else {
        panic!("expected a rule");
    };
    let block = card.block().expect("block");
    let kinds: Vec<_> = block
        .items()
        .map(|item| match item {
            Item::Rule(_) => "rule",
            Item::AtRule(_) => "at-rule",
            Item::Declaration(_) => "declaration",
        })
        .collect();
    assert_eq!(kinds, vec!["declaration", "rule", "rule", "rule"]);
}

#[test]
fn test_line_comments_only_in_preprocessors() {
    let scss = style::parse("// .ghost {}\n.real {}", StyleDialect::Scss);
    assert!(scss.ok());
    assert_eq!(root("// .ghost {}\n.real {}", StyleDialect::Scss).items().count(), 1);

    // In plain CSS `//` is not a comment, but parsing must still succeed
    // structurally and keep every byte
    let css = style::parse("// x\n.real {}", StyleDialect::Css);
    assert_eq!(css.syntax().text().to_string(), "// x\n.real {}");
}

#[test]
fn test_unclosed_block_reports_error_but_keeps_rules() {
    let parse = style::parse(".a { color: red; }\n.b { color: blue", StyleDialect::Css);
    assert!(!parse.ok());
    let source = SourceFile::cast(parse.syntax()).unwrap();
    assert_eq!(source.items().count(), 2);
}

#[test]
fn test_at_rule_prelude_strings() {
    let source = root("@use 'sass:math';\n@import \"./vars\", 'mixins';", StyleDialect::Scss);
    let preludes: Vec<Vec<String>> = source
        .items()
        .filter_map(|item| match item {
            Item::AtRule(at) => Some(at),
            _ => None,
        })
        .map(|at| {
            at.prelude()
                .map(|p| p.strings().into_iter().map(|(s, _)| s).collect())
                .unwrap_or_default()
        })
        .collect();
    assert_eq!(
        preludes,
        vec![vec!["sass:math".to_string()], vec!["./vars".to_string(), "mixins".to_string()]]
    );
}
