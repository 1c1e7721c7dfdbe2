//! Selector indexing — Extract class selectors from a style-sheet tree.
//!
//! The indexer walks rules depth-first and classifies every selector of a
//! rule by the way it uses the nesting symbol `&`:
//!
//! | selector      | kind    | logical name                   |
//! |---------------|---------|--------------------------------|
//! | `.btn`        | Root    | `btn`                          |
//! | `& .icon`     | Child   | `icon`                         |
//! | `&.active`    | Sibling | `active`                       |
//! | `&-primary`   | Suffix  | ancestor class + `-primary`    |
//!
//! Suffix selectors compound along the parent chain, so `.card { &-header {
//! &-title {} } }` declares `card-header-title`. The parent chain lives in
//! an arena of [`RuleNode`]s indexed by position; at-rules are transparent.

use std::borrow::Cow;
use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use indexmap::IndexMap;
use rowan::TextRange;
use smol_str::SmolStr;

use crate::base::{FileId, StyleDialect};
use crate::parser::style::{self, AstNode, Item};

// ============================================================================
// SELECTOR TYPES
// ============================================================================

/// How a selector declares its class name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SelectorKind {
    /// `.name`
    Root,
    /// `& .name` (descendant of the enclosing rule)
    Child,
    /// `&.name` (compound on the enclosing rule's element)
    Sibling,
    /// `&-name`, `&_name`, `&--name` (BEM modifier of an ancestor class)
    Suffix,
}

impl SelectorKind {
    pub fn display(&self) -> &'static str {
        match self {
            SelectorKind::Root => "root",
            SelectorKind::Child => "child",
            SelectorKind::Sibling => "sibling",
            SelectorKind::Suffix => "suffix",
        }
    }
}

impl fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

/// One declared class name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorEntry {
    /// Logical class name (`card-header-title`).
    pub name: SmolStr,
    pub kind: SelectorKind,
    /// Suffix text without the `&` (`-title`); suffix entries only.
    pub suffix: Option<SmolStr>,
    /// Declaring style document.
    pub file: FileId,
    /// The whole rule, selectors through closing brace.
    pub rule_range: TextRange,
    /// The selector that declared the name.
    pub selector_range: TextRange,
}

/// Insertion-ordered selector names of one style document (or of a document
/// merged with the documents it forwards to).
///
/// Class entries (root, child, sibling) and suffix entries are stored
/// apart: they feed different buckets of the matcher, and a suffix entry
/// must not shadow a class of the same name. Within each bucket the first
/// insertion of a name wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectorIndex {
    classes: IndexMap<SmolStr, SelectorEntry>,
    suffixes: IndexMap<SmolStr, SelectorEntry>,
}

impl SelectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry; returns `false` if its name was already present in
    /// the same bucket.
    pub fn insert(&mut self, entry: SelectorEntry) -> bool {
        let bucket = match entry.kind {
            SelectorKind::Suffix => &mut self.suffixes,
            _ => &mut self.classes,
        };
        if bucket.contains_key(&entry.name) {
            return false;
        }
        bucket.insert(entry.name.clone(), entry);
        true
    }

    /// Merge another index in; existing names win.
    pub fn extend(&mut self, other: &SelectorIndex) {
        for entry in other.classes.values().chain(other.suffixes.values()) {
            self.insert(entry.clone());
        }
    }

    /// Class entry (root, child or sibling) with exactly this name.
    pub fn class(&self, name: &str) -> Option<&SelectorEntry> {
        self.classes.get(name)
    }

    /// Suffix entries in first-seen order.
    pub fn suffix_entries(&self) -> impl Iterator<Item = &SelectorEntry> {
        self.suffixes.values()
    }

    /// Entry for a logical name, preferring a class over a suffix entry.
    pub fn get(&self, name: &str) -> Option<&SelectorEntry> {
        self.classes.get(name).or_else(|| self.suffixes.get(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All entries with distinct names: classes first, then suffix entries
    /// whose name no class already declares.
    pub fn iter(&self) -> impl Iterator<Item = &SelectorEntry> {
        self.classes.values().chain(
            self.suffixes
                .values()
                .filter(|entry| !self.classes.contains_key(&entry.name)),
        )
    }

    /// Distinct logical names, in [`iter`](Self::iter) order.
    pub fn names(&self) -> impl Iterator<Item = &SmolStr> {
        self.iter().map(|entry| &entry.name)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.suffixes.is_empty()
    }
}

/// A forwarding directive (`@import`, `@use`, `@forward`) as written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleForward {
    pub source: SmolStr,
    pub range: TextRange,
}

/// Everything the indexer extracts from one style document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleExtraction {
    pub selectors: SelectorIndex,
    pub forwards: Vec<StyleForward>,
}

// ============================================================================
// RULE ARENA
// ============================================================================

/// A rule in the arena; `parent` is the index of the enclosing rule.
#[derive(Clone, Debug)]
pub struct RuleNode {
    pub parent: Option<usize>,
    pub selectors: Vec<(String, TextRange)>,
    pub range: TextRange,
}

/// Build the rule arena and collect forwarding directives.
fn collect_rules(root: &style::SourceFile) -> (Vec<RuleNode>, Vec<StyleForward>) {
    let mut arena = Vec::new();
    let mut forwards = Vec::new();
    for item in root.items() {
        visit_item(item, None, &mut arena, &mut forwards);
    }
    (arena, forwards)
}

fn visit_item(
    item: Item,
    parent: Option<usize>,
    arena: &mut Vec<RuleNode>,
    forwards: &mut Vec<StyleForward>,
) {
    match item {
        Item::Rule(rule) => {
            let index = arena.len();
            arena.push(RuleNode {
                parent,
                selectors: rule
                    .selectors()
                    .map(|s| (normalize_selector(s.syntax()), s.range()))
                    .collect(),
                range: rule.range(),
            });
            if let Some(block) = rule.block() {
                for child in block.items() {
                    visit_item(child, Some(index), arena, forwards);
                }
            }
        }
        Item::AtRule(at_rule) => {
            let name = at_rule.name().unwrap_or_default();
            if matches!(name.as_str(), "import" | "use" | "forward") {
                if let Some(prelude) = at_rule.prelude() {
                    forwards.extend(prelude.strings().map(|(source, range)| StyleForward {
                        source: source.into(),
                        range,
                    }));
                }
            }
            // @media, @supports, @mixin, @include … { } and friends are
            // transparent: their rules keep the enclosing rule as parent.
            if let Some(block) = at_rule.block() {
                for child in block.items() {
                    visit_item(child, parent, arena, forwards);
                }
            }
        }
        Item::Declaration(_) => {}
    }
}

/// Selector text with comments dropped and whitespace collapsed.
fn normalize_selector(node: &style::SyntaxNode) -> String {
    let mut out = String::new();
    let mut pending_space = false;
    for token in node
        .descendants_with_tokens()
        .filter_map(|e| e.into_token())
    {
        if token.kind().is_trivia() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push_str(token.text());
    }
    out
}

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// A selector classified by its leading nesting form.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Classified<'a> {
    /// Root, child or sibling; `rest` follows the leading `.`.
    Class { kind: SelectorKind, rest: &'a str },
    /// Suffix; `rest` starts with the `-`/`_` after `&`.
    Suffix { rest: &'a str },
}

fn classify(text: &str) -> Option<Classified<'_>> {
    if text.contains("#{") || text.contains("@{") {
        return None;
    }
    if let Some(rest) = text.strip_prefix('.') {
        return Some(Classified::Class {
            kind: SelectorKind::Root,
            rest,
        });
    }
    let after_amp = text.strip_prefix('&')?;
    if let Some(rest) = after_amp.strip_prefix('.') {
        return Some(Classified::Class {
            kind: SelectorKind::Sibling,
            rest,
        });
    }
    if after_amp.starts_with(['-', '_']) {
        return Some(Classified::Suffix { rest: after_amp });
    }
    // `& .x`, `& > .x`, `&+.x`, `& ~ .x`
    let trimmed = after_amp.trim_start();
    let descendant = match trimmed.strip_prefix(['>', '+', '~']) {
        Some(after) => after.trim_start(),
        None if trimmed.len() != after_amp.len() => trimmed,
        None => return None,
    };
    let rest = descendant.strip_prefix('.')?;
    Some(Classified::Class {
        kind: SelectorKind::Child,
        rest,
    })
}

fn is_class_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

/// Class names in `rest`, which follows a leading `.`. Scanning stops at the
/// first pseudo-class; attribute selectors are skipped whole and `\`
/// escapes inside names are decoded.
fn class_segments(rest: &str) -> Vec<Cow<'_, str>> {
    let mut segments = Vec::new();
    let mut cursor = rest;
    let mut at_name = true;
    loop {
        if at_name {
            let (name, len) = read_class_name(cursor);
            if !name.is_empty() {
                segments.push(name);
            }
            cursor = &cursor[len..];
            at_name = false;
        }
        let Some(c) = cursor.chars().next() else {
            break;
        };
        match c {
            '.' => {
                cursor = &cursor[1..];
                at_name = true;
            }
            ':' => break,
            '[' => cursor = skip_attribute(cursor),
            '\\' => {
                let mut chars = cursor.chars();
                chars.next();
                chars.next();
                cursor = chars.as_str();
            }
            _ => cursor = &cursor[c.len_utf8()..],
        }
    }
    segments
}

/// The class name `text` opens with, unescaped, and its byte length in
/// `text`.
fn read_class_name(text: &str) -> (Cow<'_, str>, usize) {
    let mut unescaped: Option<String> = None;
    let mut chars = text.char_indices().peekable();
    let mut end = text.len();
    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            let Some(decoded) = read_escape(&mut chars) else {
                end = i;
                break;
            };
            unescaped
                .get_or_insert_with(|| text[..i].to_string())
                .push(decoded);
        } else if is_class_char(c) {
            if let Some(name) = unescaped.as_mut() {
                name.push(c);
            }
        } else {
            end = i;
            break;
        }
    }
    let name = match unescaped {
        Some(name) => Cow::Owned(name),
        None => Cow::Borrowed(&text[..end]),
    };
    (name, end)
}

/// Decode the escape after a `\`: up to six hex digits plus one optional
/// whitespace, or any other character taken literally.
fn read_escape(chars: &mut Peekable<CharIndices<'_>>) -> Option<char> {
    let mut code = 0u32;
    let mut digits = 0;
    while digits < 6 {
        let Some(digit) = chars.peek().and_then(|(_, c)| c.to_digit(16)) else {
            break;
        };
        code = code * 16 + digit;
        digits += 1;
        chars.next();
    }
    if digits == 0 {
        return chars.next().map(|(_, c)| c);
    }
    if chars.peek().is_some_and(|(_, c)| c.is_whitespace()) {
        chars.next();
    }
    Some(
        char::from_u32(code)
            .filter(|c| *c != '\0')
            .unwrap_or(char::REPLACEMENT_CHARACTER),
    )
}

/// What follows the `]` closing the attribute selector `text` opens with.
/// Brackets and dots inside quoted values do not count.
fn skip_attribute(text: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in text.char_indices().skip(1) {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (_, '\\') => escaped = true,
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, ']') => return &text[i + 1..],
            (None, _) => {}
        }
    }
    ""
}

/// Names a rule offers as prefixes to nested suffix selectors: the last
/// class segment of each class selector, and the compounded names of its
/// own suffix selectors.
fn terminal_names(arena: &[RuleNode], index: usize) -> Vec<String> {
    let node = &arena[index];
    let mut names = Vec::new();
    for (text, _) in &node.selectors {
        match classify(text) {
            Some(Classified::Class { rest, .. }) => {
                if let Some(last) = class_segments(rest).pop() {
                    names.push(last.into_owned());
                }
            }
            Some(Classified::Suffix { rest }) => {
                let Some(suffix) = class_segments(rest).into_iter().next() else {
                    continue;
                };
                names.extend(compound(arena, node.parent, &suffix));
            }
            None => {}
        }
    }
    names
}

/// Every ancestor name concatenated with `suffix`.
fn compound(arena: &[RuleNode], parent: Option<usize>, suffix: &str) -> Vec<String> {
    let Some(parent) = parent else {
        return Vec::new();
    };
    terminal_names(arena, parent)
        .into_iter()
        .map(|prefix| format!("{prefix}{suffix}"))
        .collect()
}

fn is_valid_suffix(suffix: &str) -> bool {
    suffix.chars().any(|c| c.is_alphanumeric() || !c.is_ascii())
}

// ============================================================================
// INDEXING
// ============================================================================

/// Index the selectors and forwarding directives of a parsed style sheet.
pub fn index_style(file: FileId, root: &style::SourceFile) -> StyleExtraction {
    let (arena, forwards) = collect_rules(root);
    let mut selectors = SelectorIndex::new();

    for node in &arena {
        for (text, selector_range) in &node.selectors {
            let entry = |name: &str, kind, suffix: Option<&str>| SelectorEntry {
                name: name.into(),
                kind,
                suffix: suffix.map(SmolStr::from),
                file,
                rule_range: node.range,
                selector_range: *selector_range,
            };

            match classify(text) {
                Some(Classified::Class { kind, rest }) => {
                    for name in class_segments(rest) {
                        selectors.insert(entry(name.as_ref(), kind, None));
                    }
                }
                Some(Classified::Suffix { rest }) => {
                    let segments = class_segments(rest);
                    let Some((suffix, extra)) = segments.split_first() else {
                        continue;
                    };
                    if !is_valid_suffix(suffix) {
                        tracing::trace!(selector = %text, "skipping empty suffix selector");
                        continue;
                    }
                    for name in compound(&arena, node.parent, suffix) {
                        selectors.insert(entry(name.as_str(), SelectorKind::Suffix, Some(suffix.as_ref())));
                    }
                    for name in extra {
                        selectors.insert(entry(name.as_ref(), SelectorKind::Sibling, None));
                    }
                }
                None => {}
            }
        }
    }

    StyleExtraction { selectors, forwards }
}

/// Convenience: parse and index style-sheet text in one step.
pub fn index_style_text(file: FileId, text: &str, dialect: StyleDialect) -> StyleExtraction {
    let parse = style::parse(text, dialect);
    match style::SourceFile::cast(parse.syntax()) {
        Some(root) => index_style(file, &root),
        None => StyleExtraction::default(),
    }
}
