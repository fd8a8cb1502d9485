//! Parsing of benchstat's comparison table.
//!
//! Rows look like
//!
//! ```text
//! BenchmarkName-N   100.0n ± 5%   102.0n ± 3%   +2.00% (p=0.041)
//! BenchmarkName-N   100.0n ± 5%    99.0n ± 3%        ~ (p=0.310)
//! ```
//!
//! Anything else (banners, headers, geomean rows, blank lines) is skipped.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::report::{Icon, classify};

static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\S+?)(?:-[0-9]+)?\s+[0-9.]+[nµm]?s?\s*±\s*[0-9]+%\s+[0-9.]+[nµm]?s?\s*±\s*[0-9]+%\s+([~+-][0-9.]*%?)\s*\(p=([0-9.]+)[^)]*\)",
    )
    .expect("benchstat line pattern compiles")
});

const NAME_PREFIX: &str = "Benchmark";

/// One matched row, borrowed from the raw output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedLine<'a> {
    /// Benchmark name without the `-N` suffix or `Benchmark` prefix
    pub name: &'a str,
    /// Trimmed delta token (`~` or a signed percentage)
    pub change: &'a str,
    /// Significance; NaN when the captured token holds no number
    pub p_value: f64,
}

/// A classified benchmark row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub name: String,
    pub change: String,
    /// Written as `null` when NaN
    #[serde(with = "nan_as_null")]
    pub p_value: f64,
    pub icon: Icon,
    pub verdict: String,
}

impl From<ParsedLine<'_>> for BenchmarkResult {
    fn from(line: ParsedLine<'_>) -> Self {
        let verdict = classify(line.change, line.p_value);
        BenchmarkResult {
            name: line.name.to_string(),
            change: line.change.to_string(),
            p_value: line.p_value,
            icon: verdict.icon,
            verdict: verdict.label,
        }
    }
}

mod nan_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &f64, s: S) -> Result<S::Ok, S::Error> {
        if v.is_nan() { s.serialize_none() } else { s.serialize_some(v) }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(d)?.unwrap_or(f64::NAN))
    }
}

/// Match a single line against the row shape.
pub fn parse_line(line: &str) -> Option<ParsedLine<'_>> {
    let caps = LINE_RE.captures(line)?;
    let raw_name = caps.get(1)?.as_str();
    let name = raw_name.strip_prefix(NAME_PREFIX).unwrap_or(raw_name);
    let change = caps.get(2)?.as_str().trim();
    let p_value = parse_float_prefix(caps.get(3)?.as_str()).unwrap_or(f64::NAN);
    Some(ParsedLine { name, change, p_value })
}

/// Lazily yield every matching row of `raw`, in order.
pub fn parse_lines(raw: &str) -> impl Iterator<Item = ParsedLine<'_>> {
    raw.lines().filter_map(parse_line)
}

/// Parse and classify every row of `raw`.
pub fn parse_results(raw: &str) -> Vec<BenchmarkResult> {
    parse_lines(raw).map(BenchmarkResult::from).collect()
}

/// Parse the longest leading decimal number of `s`.
///
/// Accepts an optional sign, digits and one fractional part; whatever follows
/// (a `%`, a second `.`) is ignored. Returns `None` when no digit is present.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let mut digits = 0;
    let mut seen_dot = false;
    while let Some(&b) = bytes.get(end) {
        match b {
            b'0'..=b'9' => digits += 1,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if digits == 0 {
        return None;
    }
    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_strips_prefix_and_suffix() {
        let line = parse_line("BenchmarkFoo-8   100.0ns ± 5%   102.0ns ± 3%   +2.00% (p=0.041)").unwrap();
        assert_eq!(line.name, "Foo");
        assert_eq!(line.change, "+2.00%");
        assert!((line.p_value - 0.041).abs() < 1e-12);
    }

    #[test]
    fn test_parse_line_no_change_marker() {
        let line = parse_line("BenchmarkQux-1   100.0ns ± 5%   99.0ns ± 3%   ~ (p=0.310)").unwrap();
        assert_eq!(line.name, "Qux");
        assert_eq!(line.change, "~");
        assert!((line.p_value - 0.310).abs() < 1e-12);
    }

    #[test]
    fn test_parse_line_without_suffix_or_prefix() {
        let line = parse_line("Decode   1.5ms ± 2%   1.4ms ± 1%   -6.67% (p=0.002 n=10)").unwrap();
        assert_eq!(line.name, "Decode");
        assert_eq!(line.change, "-6.67%");
    }

    #[test]
    fn test_parse_line_prefix_only_stripped_at_front() {
        let line = parse_line("MyBenchmarkX-4   10µs ± 1%   10µs ± 1%   ~ (p=0.5)").unwrap();
        assert_eq!(line.name, "MyBenchmarkX");
    }

    #[test]
    fn test_parse_line_unitless_columns() {
        let line = parse_line("BenchmarkAllocs-2   12 ± 0%   14 ± 0%   +16.67% (p=0.000)").unwrap();
        assert_eq!(line.name, "Allocs");
        assert_eq!(line.change, "+16.67%");
        assert_eq!(line.p_value, 0.0);
    }

    #[test]
    fn test_parse_line_rejects_other_shapes() {
        assert!(parse_line("").is_none());
        assert!(parse_line("goos: linux").is_none());
        assert!(parse_line("        │ base.txt │ pr.txt │").is_none());
        assert!(parse_line("BenchmarkFoo-8   100.0ns ± 5%   102.0ns ± 3%   +2.00%").is_none());
        assert!(parse_line("geomean   100.0n   102.0n   +2.00%").is_none());
        assert!(parse_line("  BenchmarkFoo-8   100.0ns ± 5%   102.0ns ± 3%   +2.00% (p=0.041)").is_none());
    }

    #[test]
    fn test_parse_line_digits_are_ascii_only() {
        assert!(parse_line("BenchmarkFoo-8   ١٠٠ns ± 5%   102.0ns ± 3%   +2.00% (p=0.001)").is_none());
        assert!(parse_line("BenchmarkFoo-8   100.0ns ± 5%   102.0ns ± 3%   +2.00% (p=٠.٠٠١)").is_none());

        let line = parse_line("BenchmarkFoo-٨   100.0ns ± 5%   102.0ns ± 3%   +2.00% (p=0.001)").unwrap();
        assert_eq!(line.name, "Foo-٨");
    }

    #[test]
    fn test_parse_lines_keeps_order_and_skips_noise() {
        let raw = "goos: linux\n\
                   BenchmarkB-8   1ns ± 1%   1ns ± 1%   ~ (p=0.9)\n\
                   \n\
                   BenchmarkA-8   1ns ± 1%   2ns ± 1%   +100.00% (p=0.001)\n";
        let names: Vec<_> = parse_lines(raw).map(|l| l.name).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_parse_results_classifies() {
        let raw = "BenchmarkBar-4   100.0ns ± 5%   150.0ns ± 3%   +50.00% (p=0.001)";
        let results = parse_results(raw);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].icon, Icon::Warning);
        assert_eq!(results[0].verdict, "**+50.00% slower**");
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("+2.00%"), Some(2.0));
        assert_eq!(parse_float_prefix("-60.00%"), Some(-60.0));
        assert_eq!(parse_float_prefix("0.041"), Some(0.041));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("1.2.3"), Some(1.2));
        assert_eq!(parse_float_prefix("+%"), None);
        assert_eq!(parse_float_prefix("-"), None);
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("~"), None);
    }
}
