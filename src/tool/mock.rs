//! Mock comparison tool for testing.

use std::path::Path;

use crate::{CommentError, CommentResult};

use super::traits::ComparisonTool;

/// Returns fixed output without spawning anything.
#[derive(Debug, Clone, Default)]
pub struct MockTool {
    /// Text handed back from `compare`
    pub output: String,
    /// Whether compare should fail
    pub fails: bool,
}

impl MockTool {
    /// Create a mock that prints `output`.
    pub fn new(output: impl Into<String>) -> Self {
        MockTool {
            output: output.into(),
            fails: false,
        }
    }

    /// Create a mock whose comparison always fails.
    pub fn failing() -> Self {
        MockTool {
            output: String::new(),
            fails: true,
        }
    }
}

impl ComparisonTool for MockTool {
    fn name(&self) -> &str {
        "mock"
    }

    fn compare(&self, _baseline: &Path, _candidate: &Path) -> CommentResult<String> {
        if self.fails {
            return Err(CommentError::Message("mock comparison failed".into()));
        }
        Ok(self.output.clone())
    }
}
