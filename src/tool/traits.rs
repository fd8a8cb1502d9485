//! Comparison tool trait.

use std::path::Path;

use crate::CommentResult;

/// A tool that compares two benchmark result files and reports in text.
pub trait ComparisonTool {
    /// Returns the tool name used in logs and error messages.
    fn name(&self) -> &str;

    /// Compare `baseline` against `candidate`.
    ///
    /// # Returns
    /// The tool's combined stdout and stderr. Any failure to produce that
    /// text (missing executable, non-zero exit) is an error.
    fn compare(&self, baseline: &Path, candidate: &Path) -> CommentResult<String>;
}
