//! HIR tests
//!
//! - Selector indexing across nesting idioms
//! - Matcher precedence and suffix tie-breaks
//! - Diagnostics and closest-match suggestions

pub mod tests_diagnostics;
pub mod tests_matcher;
pub mod tests_selector_index;
