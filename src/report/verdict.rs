//! Significance classification for a single benchmark row.

use serde::{Deserialize, Serialize};

use crate::parse::parse_float_prefix;

/// Delta token benchstat prints when the difference is not significant.
pub const NO_CHANGE_MARKER: &str = "~";

/// Percent change a row must exceed (in either direction) to count.
pub const PERCENT_THRESHOLD: f64 = 5.0;

/// p-value a row must stay under to count.
pub const SIGNIFICANCE: f64 = 0.05;

/// Marker shown in the first table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    /// Significant slowdown
    Warning,
    /// Significant speedup
    Rocket,
    /// Measured, but within noise
    Check,
    /// No measurable change
    Tilde,
}

impl Icon {
    /// GitHub markdown shortcode for this icon.
    pub fn shortcode(&self) -> &'static str {
        match self {
            Icon::Warning => ":warning:",
            Icon::Rocket => ":rocket:",
            Icon::Check => ":white_check_mark:",
            Icon::Tilde => "~",
        }
    }
}

/// Icon plus human-readable label for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub icon: Icon,
    pub label: String,
}

impl Verdict {
    fn new(icon: Icon, label: impl Into<String>) -> Self {
        Verdict { icon, label: label.into() }
    }
}

/// Classify a delta token and its p-value.
///
/// A row is a regression or improvement only when it is both significant
/// (`p < 0.05`) and larger than 5% in magnitude. Tokens that carry no number
/// degrade to "no change".
pub fn classify(change: &str, p_value: f64) -> Verdict {
    if change == NO_CHANGE_MARKER {
        return Verdict::new(Icon::Tilde, "no change");
    }
    let pct = match parse_float_prefix(change) {
        Some(pct) if !pct.is_nan() => pct,
        _ => return Verdict::new(Icon::Tilde, "no change"),
    };

    if pct > PERCENT_THRESHOLD && p_value < SIGNIFICANCE {
        Verdict::new(Icon::Warning, format!("**{change} slower**"))
    } else if pct < -PERCENT_THRESHOLD && p_value < SIGNIFICANCE {
        Verdict::new(Icon::Rocket, format!("**{change} faster**"))
    } else {
        Verdict::new(Icon::Check, "within noise")
    }
}

/// Overall outcome across every row of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overall {
    Regression,
    Improvement,
    NoChange,
}

impl Overall {
    /// Summarize a set of row icons. Any regression wins over any
    /// improvement.
    pub fn from_icons<I>(icons: I) -> Self
    where
        I: IntoIterator<Item = Icon>,
    {
        let mut improved = false;
        for icon in icons {
            match icon {
                Icon::Warning => return Overall::Regression,
                Icon::Rocket => improved = true,
                Icon::Check | Icon::Tilde => {}
            }
        }
        if improved { Overall::Improvement } else { Overall::NoChange }
    }

    /// Summary line rendered above the results table.
    pub fn summary_line(&self) -> &'static str {
        match self {
            Overall::Regression => ":warning: **Performance regression detected**",
            Overall::Improvement => ":rocket: **Performance improved**",
            Overall::NoChange => ":white_check_mark: **No significant performance change**",
        }
    }

    /// Is this outcome a failure for CI purposes?
    pub fn is_failure(&self) -> bool {
        matches!(self, Overall::Regression)
    }
}
