//! IDE tests
//!
//! End-to-end flows through `AnalysisHost`: definition, hover, diagnostics,
//! quick fixes and completion.

pub mod tests_completion;
pub mod tests_end_to_end;
