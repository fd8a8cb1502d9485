//! Markdown rendering for PR comments.

use std::path::Path;

use crate::parse::BenchmarkResult;
use crate::{CommentResult, write_file};

use super::verdict::Overall;

const HEADING: &str = "## Benchmark Comparison";
const TABLE_HEADER: &str = "| | Benchmark | Delta | Verdict |";
const TABLE_SEPARATOR: &str = "|---|---|---|---|";

/// Format a p-value with three decimals, rounding exact halves away from
/// zero.
///
/// `{:.3}` rounds exact binary ties (`0.0625`) to even. A double sits exactly
/// halfway between two thousandths only when sixteen times its magnitude is an
/// odd integer, and then `x * 1000` is exact, so `f64::round` settles it.
fn format_p_value(p: f64) -> String {
    if p.is_nan() {
        return "NaN".to_string();
    }
    if p.is_infinite() {
        return if p > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let sixteenths = p.abs() * 16.0;
    if sixteenths.fract() == 0.0 && sixteenths % 2.0 == 1.0 {
        let thousandths = (p.abs() * 1000.0).round() as u64;
        let sign = if p < 0.0 { "-" } else { "" };
        return format!("{sign}{}.{:03}", thousandths / 1000, thousandths % 1000);
    }
    format!("{p:.3}")
}

/// Format one table row.
fn table_row(r: &BenchmarkResult) -> String {
    format!(
        "| {} | `{}` | {} (p={}) | {} |",
        r.icon.shortcode(),
        r.name,
        r.change,
        format_p_value(r.p_value),
        r.verdict
    )
}

/// Render the comment body.
///
/// With no parsed rows the raw tool output is shown in full so a reviewer can
/// see what went wrong; otherwise the table comes first and the raw output is
/// folded into a `<details>` block.
pub fn render_markdown(results: &[BenchmarkResult], raw: &str) -> String {
    let raw = raw.trim();

    if results.is_empty() {
        return [
            HEADING,
            "",
            "No benchmark results could be parsed. Raw output:",
            "",
            "```",
            raw,
            "```",
        ]
        .join("\n");
    }

    let overall = Overall::from_icons(results.iter().map(|r| r.icon));

    let mut table = vec![TABLE_HEADER.to_string(), TABLE_SEPARATOR.to_string()];
    table.extend(results.iter().map(table_row));
    let table = table.join("\n");

    [
        HEADING,
        "",
        overall.summary_line(),
        "",
        table.as_str(),
        "",
        "<details>",
        "<summary>Raw benchstat output</summary>",
        "",
        "```",
        raw,
        "```",
        "",
        "</details>",
    ]
    .join("\n")
}

/// Render and write the comment to `path`, replacing any existing file.
pub fn write_markdown(path: &Path, results: &[BenchmarkResult], raw: &str) -> CommentResult<()> {
    write_file(path, &render_markdown(results, raw))
}
