//! Machine-readable comparison report.
//!
//! Carries the same rows as the markdown comment, plus counts and a
//! recommended CI exit code.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::parse::BenchmarkResult;
use crate::{CommentResult, write_file};

use super::verdict::{Icon, Overall};

/// Schema version for CommentReport
pub const COMMENT_REPORT_VERSION: u32 = 1;

/// A complete comparison report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentReport {
    /// Schema version for forward compatibility
    pub version: u32,
    /// ISO 8601 timestamp when the report was generated
    pub generated_at: String,
    /// Baseline identifier (file name)
    pub baseline_id: String,
    /// Candidate identifier (file name)
    pub candidate_id: String,
    pub summary: ReportSummary,
    pub results: Vec<BenchmarkResult>,
}

/// Per-verdict counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub regressions: usize,
    pub improvements: usize,
    pub within_noise: usize,
    pub unchanged: usize,
    pub overall: Overall,
    /// Recommended CI exit code (0 = pass, 1 = regressions)
    pub ci_exit_code: i32,
}

impl ReportSummary {
    pub fn from_results(results: &[BenchmarkResult]) -> Self {
        let count = |icon: Icon| results.iter().filter(|r| r.icon == icon).count();
        let overall = Overall::from_icons(results.iter().map(|r| r.icon));
        ReportSummary {
            total: results.len(),
            regressions: count(Icon::Warning),
            improvements: count(Icon::Rocket),
            within_noise: count(Icon::Check),
            unchanged: count(Icon::Tilde),
            overall,
            ci_exit_code: if overall.is_failure() { 1 } else { 0 },
        }
    }
}

impl CommentReport {
    /// Create a report stamped with the current time.
    pub fn new(
        baseline_id: impl Into<String>,
        candidate_id: impl Into<String>,
        results: Vec<BenchmarkResult>,
    ) -> Self {
        let generated_at = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_default();

        CommentReport {
            version: COMMENT_REPORT_VERSION,
            generated_at,
            baseline_id: baseline_id.into(),
            candidate_id: candidate_id.into(),
            summary: ReportSummary::from_results(&results),
            results,
        }
    }
}

/// Serialize `report` as pretty JSON to `path`.
pub fn write_json(path: &Path, report: &CommentReport) -> CommentResult<()> {
    let json = serde_json::to_string_pretty(report)?;
    write_file(path, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_results;

    const RAW: &str = "BenchmarkFoo-8   100.0ns ± 5%   102.0ns ± 3%   +2.00% (p=0.041)\n\
        BenchmarkBar-4   100.0ns ± 5%   150.0ns ± 3%   +50.00% (p=0.001)\n\
        BenchmarkBaz-2   100.0ns ± 5%   40.0ns ± 3%   -60.00% (p=0.002)\n\
        BenchmarkQux-1   100.0ns ± 5%   99.0ns ± 3%   ~ (p=0.310)\n";

    #[test]
    fn test_summary_counts() {
        let summary = ReportSummary::from_results(&parse_results(RAW));
        assert_eq!(summary.total, 4);
        assert_eq!(summary.regressions, 1);
        assert_eq!(summary.improvements, 1);
        assert_eq!(summary.within_noise, 1);
        assert_eq!(summary.unchanged, 1);
        assert_eq!(summary.overall, Overall::Regression);
        assert_eq!(summary.ci_exit_code, 1);
    }

    #[test]
    fn test_summary_empty_passes() {
        let summary = ReportSummary::from_results(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.overall, Overall::NoChange);
        assert_eq!(summary.ci_exit_code, 0);
    }

    #[test]
    fn test_report_new() {
        let report = CommentReport::new("base.txt", "pr.txt", parse_results(RAW));
        assert_eq!(report.version, COMMENT_REPORT_VERSION);
        assert_eq!(report.baseline_id, "base.txt");
        assert_eq!(report.candidate_id, "pr.txt");
        assert_eq!(report.results.len(), 4);
        assert!(!report.generated_at.is_empty());
    }

    #[test]
    fn test_report_json_shape() {
        let report = CommentReport::new("base.txt", "pr.txt", parse_results(RAW));
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["summary"]["overall"], "regression");
        assert_eq!(value["results"][1]["name"], "Bar");
        assert_eq!(value["results"][1]["icon"], "warning");
        assert_eq!(value["results"][3]["icon"], "tilde");
    }

    #[test]
    fn test_report_round_trips_nan_p_value() {
        let raw = "BenchmarkX-1   1ns ± 1%   1ns ± 1%   +1.00% (p=.)\n\
            BenchmarkY-1   1ns ± 1%   1ns ± 1%   ~ (p=0.5)\n";
        let report = CommentReport::new("base.txt", "pr.txt", parse_results(raw));
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"p_value\":null"));

        let back: CommentReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.results.len(), 2);
        assert!(back.results[0].p_value.is_nan());
        assert_eq!(back.results[0].name, "X");
        assert_eq!(back.results[1].p_value, 0.5);
        assert_eq!(back.summary.total, 2);
    }
}
