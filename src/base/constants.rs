//! Domain constants: recognized file extensions.

/// Plain CSS style sheets.
pub const CSS_EXT: &str = "css";
/// SCSS style sheets.
pub const SCSS_EXT: &str = "scss";
/// LESS style sheets.
pub const LESS_EXT: &str = "less";

/// Extensions of style-sheet documents that can be imported as modules.
pub const STYLE_EXTENSIONS: &[&str] = &[CSS_EXT, SCSS_EXT, LESS_EXT];

/// Extensions of component documents scanned for style accessors.
pub const COMPONENT_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs", "mts", "cts"];

/// Directories never descended into during a workspace scan.
pub const IGNORED_DIRECTORIES: &[&str] = &["node_modules", ".git", "dist", "build", "target"];

/// Check whether an import specifier names a style sheet.
///
/// Query strings and fragments (`./a.css?inline`, `./a.css#x`) are ignored.
pub fn is_style_specifier(specifier: &str) -> bool {
    let end = specifier.find(['?', '#']).unwrap_or(specifier.len());
    let path = &specifier[..end];
    STYLE_EXTENSIONS.iter().any(|ext| {
        path.len() > ext.len() + 1
            && path.ends_with(ext)
            && path.as_bytes()[path.len() - ext.len() - 1] == b'.'
    })
}

/// Strip a query string or fragment from an import specifier.
pub fn strip_specifier_suffix(specifier: &str) -> &str {
    let end = specifier.find(['?', '#']).unwrap_or(specifier.len());
    &specifier[..end]
}
