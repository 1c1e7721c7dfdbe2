//! Parser tests
//!
//! Behavioral tests for both rowan parsers:
//! - Lossless round-trip of the source text
//! - Error tolerance on malformed input
//! - Style imports and accesses in component files

pub mod tests_style_parser;
