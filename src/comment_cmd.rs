//! Generate a benchmark comparison comment.
//!
//! Runs the comparison tool once over a baseline and a candidate result
//! file, classifies every row it prints and writes the markdown comment.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::CommentResult;
use crate::parse::parse_results;
use crate::report::{CommentReport, Overall, write_json, write_markdown};
use crate::tool::{Benchstat, BenchstatConfig, ComparisonTool};

/// Where the comment goes when no output path is given.
pub const DEFAULT_OUTPUT: &str = ".perf/comment.md";

/// Configuration for the comment command
#[derive(Debug, Clone)]
pub struct CommentConfig {
    pub baseline: PathBuf,
    pub candidate: PathBuf,
    pub output: PathBuf,
    pub json_out: Option<PathBuf>,
    pub benchstat: BenchstatConfig,
}

impl CommentConfig {
    pub fn new(baseline: impl Into<PathBuf>, candidate: impl Into<PathBuf>) -> Self {
        CommentConfig {
            baseline: baseline.into(),
            candidate: candidate.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            json_out: None,
            benchstat: BenchstatConfig::default(),
        }
    }
}

/// What a run produced.
#[derive(Debug, Clone)]
pub struct CommentOutcome {
    pub output: PathBuf,
    pub rows: usize,
    pub overall: Overall,
    pub ci_exit_code: i32,
}

fn file_id(path: &Path, fallback: &str) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(fallback)
        .to_string()
}

/// Run the pipeline against an arbitrary comparison tool.
pub fn run_with_tool(tool: &dyn ComparisonTool, config: &CommentConfig) -> CommentResult<CommentOutcome> {
    let raw = tool.compare(&config.baseline, &config.candidate)?;

    let results = parse_results(&raw);
    debug!(
        tool = tool.name(),
        lines = raw.lines().count(),
        rows = results.len(),
        "parsed comparison output"
    );

    let report = CommentReport::new(
        file_id(&config.baseline, "baseline"),
        file_id(&config.candidate, "candidate"),
        results,
    );
    let summary = &report.summary;
    info!(
        regressions = summary.regressions,
        improvements = summary.improvements,
        within_noise = summary.within_noise,
        unchanged = summary.unchanged,
        "classified benchmarks"
    );

    write_markdown(&config.output, &report.results, &raw)?;
    println!("Wrote comment to {}", config.output.display());

    if let Some(ref json_path) = config.json_out {
        write_json(json_path, &report)?;
        info!(path = %json_path.display(), "wrote JSON report");
    }

    Ok(CommentOutcome {
        output: config.output.clone(),
        rows: report.results.len(),
        overall: report.summary.overall,
        ci_exit_code: report.summary.ci_exit_code,
    })
}

/// Main entry point for the comment command
pub fn run(config: &CommentConfig) -> CommentResult<CommentOutcome> {
    let tool = Benchstat::new(config.benchstat.clone());
    run_with_tool(&tool, config)
}
