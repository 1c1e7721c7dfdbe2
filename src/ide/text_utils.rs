//! Text helpers shared by completion and quick fixes.

use rowan::{TextRange, TextSize};

/// Whether `name` can be written as `binding.name`.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first == '_' || first == '$' || unicode_ident::is_xid_start(first))
        && chars.all(|c| c == '$' || unicode_ident::is_xid_continue(c))
}

/// Whether `c` can continue an identifier.
pub fn is_identifier_char(c: char) -> bool {
    c == '$' || unicode_ident::is_xid_continue(c)
}

/// Length in bytes of the identifier that ends `text`.
pub fn trailing_identifier_len(text: &str) -> usize {
    text.chars()
        .rev()
        .take_while(|c| is_identifier_char(*c))
        .map(char::len_utf8)
        .sum()
}

/// The property access operator (`.` or `?.`) that ends `text`.
pub fn trailing_member_operator(text: &str) -> Option<&'static str> {
    if text.ends_with("?.") {
        Some("?.")
    } else if text.ends_with('.') && !text.ends_with("..") {
        Some(".")
    } else {
        None
    }
}

/// Edit that makes `text[key_range]` read `name`.
///
/// For a property written as `binding.key` whose new name is not an
/// identifier, the operator is rewritten too: `binding['new-name']`.
pub fn member_key_edit(text: &str, key_range: TextRange, name: &str) -> (TextRange, String) {
    if is_identifier(name) {
        return (key_range, name.to_string());
    }
    let start: usize = key_range.start().into();
    match trailing_member_operator(&text[..start]) {
        Some(op) => {
            let op_start = TextSize::new((start - op.len()) as u32);
            let new_text = if op == "?." {
                format!("?.['{}']", name)
            } else {
                format!("['{}']", name)
            };
            (TextRange::new(op_start, key_range.end()), new_text)
        }
        // Already inside a string key
        None => (key_range, name.to_string()),
    }
}
