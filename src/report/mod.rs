//! Reporting for benchstat comparisons.
//!
//! This module provides:
//! - Row classification (`classify`, `Icon`, `Overall`)
//! - Markdown rendering for PR comments
//! - JSON output for CI pipelines

pub mod json;
pub mod markdown;
pub mod verdict;

// Re-export key types
pub use json::{COMMENT_REPORT_VERSION, CommentReport, ReportSummary, write_json};
pub use markdown::{render_markdown, write_markdown};
pub use verdict::{Icon, Overall, Verdict, classify};
