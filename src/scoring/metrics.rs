//! Metric scorers.
//!
//! Independent pure functions, one per quality dimension. Each takes one
//! column (plus deterministic parameters) and returns a [`Score`]. Two
//! styles exist: bucketed scorers map a raw ratio through fixed
//! breakpoints, continuous scorers return the ratio itself or a fixed
//! constant. Zero-length and all-missing columns always degrade to the
//! documented floor instead of dividing by zero.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;

use crate::{
    error::{Error, Result},
    scoring::score::Score,
    table::{Column, ColumnKind},
};

/// Freshness window for the timeliness scorer, in days.
pub const TIMELINESS_WINDOW_DAYS: i64 = 365;

/// Default format-validity pattern: any non-empty string.
pub const DEFAULT_PATTERN: &str = ".+";

/// Match semantics for the format-validity pattern.
///
/// The two assessment styles historically disagreed on this with the same
/// default pattern, so it is an explicit knob rather than a silent choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchMode {
    /// The pattern must match the entire stringified value.
    Full,
    /// The pattern must match at the start of the stringified value.
    Prefix,
}

/// Compile a user pattern with the anchoring its match mode requires.
///
/// # Errors
///
/// Returns [`Error::InvalidPattern`] if the pattern does not compile.
pub fn compile_pattern(pattern: &str, mode: MatchMode) -> Result<Regex> {
    let anchored = match mode {
        MatchMode::Full => format!("^(?:{})$", pattern),
        MatchMode::Prefix => format!("^(?:{})", pattern),
    };
    Regex::new(&anchored).map_err(|e| Error::InvalidPattern {
        pattern: pattern.to_string(),
        source: e,
    })
}

/// Map a raw ratio through the fixed bucket breakpoints.
///
/// r > 0.95 → 1.0, r > 0.85 → 0.75, r > 0.75 → 0.5, r > 0.5 → 0.4,
/// else 0.2.
#[must_use]
pub fn bucket(ratio: f64) -> f64 {
    if ratio > 0.95 {
        1.0
    } else if ratio > 0.85 {
        0.75
    } else if ratio > 0.75 {
        0.5
    } else if ratio > 0.5 {
        0.4
    } else {
        0.2
    }
}

/// Raw completeness ratio: non-missing / total, 0 for an empty column.
#[must_use]
pub fn completeness_ratio(column: &Column) -> f64 {
    if column.is_empty() {
        return 0.0;
    }
    column.non_missing_count() as f64 / column.len() as f64
}

/// Bucketed completeness score.
#[must_use]
pub fn completeness(column: &Column) -> Score {
    Score::Value(bucket(completeness_ratio(column)))
}

/// Continuous completeness score: the raw ratio itself.
#[must_use]
pub fn completeness_continuous(column: &Column) -> Score {
    Score::Value(completeness_ratio(column))
}

/// Raw format-validity ratio: matching non-missing values / total length.
///
/// The pattern must already carry its anchoring (see [`compile_pattern`]).
/// Missing cells count against the score. 0 for an empty column.
#[must_use]
pub fn format_validity_ratio(column: &Column, pattern: &Regex) -> f64 {
    if column.is_empty() {
        return 0.0;
    }
    let matching = column
        .values()
        .filter(|v| pattern.is_match(&v.to_display_string()))
        .count();
    matching as f64 / column.len() as f64
}

/// Bucketed format-validity score.
#[must_use]
pub fn format_validity(column: &Column, pattern: &Regex) -> Score {
    Score::Value(bucket(format_validity_ratio(column, pattern)))
}

/// Continuous format-validity score.
#[must_use]
pub fn format_validity_continuous(column: &Column, pattern: &Regex) -> Score {
    Score::Value(format_validity_ratio(column, pattern))
}

/// Bucketed cross-system consistency score.
///
/// Ratio is distinct-after-lowercasing over distinct among the non-missing
/// values, i.e. one minus the case-fold duplicate ratio. An empty distinct
/// set counts as fully consistent.
#[must_use]
pub fn consistency(column: &Column) -> Score {
    let distinct = column.distinct_values();
    let ratio = if distinct.is_empty() {
        1.0
    } else {
        let folded: HashSet<String> = distinct.iter().map(|v| v.to_lowercase()).collect();
        folded.len() as f64 / distinct.len() as f64
    };
    Score::Value(bucket(ratio))
}

/// Bucketed business-rule compliance score for numeric columns.
///
/// Ratio of non-missing values within `[min, max]` over the total length.
/// Non-numeric columns are not applicable.
#[must_use]
pub fn business_rule(column: &Column, min: f64, max: f64) -> Score {
    if column.kind() != ColumnKind::Numeric {
        return Score::NotApplicable;
    }
    let ratio = if column.is_empty() {
        0.0
    } else {
        let valid = column.numbers().filter(|v| *v >= min && *v <= max).count();
        valid as f64 / column.len() as f64
    };
    Score::Value(bucket(ratio))
}

/// Accuracy score: one minus the negative-value ratio for numeric columns,
/// constant 1.0 otherwise.
#[must_use]
pub fn accuracy(column: &Column) -> Score {
    if column.kind() != ColumnKind::Numeric {
        return Score::Value(1.0);
    }
    if column.is_empty() {
        return Score::Value(0.0);
    }
    let negatives = column.numbers().filter(|v| *v < 0.0).count();
    Score::Value(1.0 - negatives as f64 / column.len() as f64)
}

/// Timeliness score: fraction of non-missing timestamps within the
/// freshness window of `now` for datetime columns, constant 1.0 otherwise.
#[must_use]
pub fn timeliness(column: &Column, now: DateTime<Utc>) -> Score {
    if column.kind() != ColumnKind::Datetime {
        return Score::Value(1.0);
    }
    if column.is_empty() {
        return Score::Value(0.0);
    }
    let fresh = column
        .timestamps()
        .filter(|ts| (now - *ts).num_days() <= TIMELINESS_WINDOW_DAYS)
        .count();
    Score::Value(fresh as f64 / column.len() as f64)
}

/// Relevance score from the uniqueness ratio among non-missing values.
///
/// 1.0 when the ratio is strictly between 0.1 and 0.9, 0.5 otherwise; a
/// column with no non-missing values scores 0.
#[must_use]
pub fn relevance(column: &Column) -> Score {
    let non_missing = column.non_missing_count();
    if non_missing == 0 {
        return Score::Value(0.0);
    }
    let ratio = column.distinct_values().len() as f64 / non_missing as f64;
    if ratio > 0.1 && ratio < 0.9 {
        Score::Value(1.0)
    } else {
        Score::Value(0.5)
    }
}

/// Verifiability score: 1.0 for a fully populated column, 0.75 otherwise.
#[must_use]
pub fn verifiability(column: &Column) -> Score {
    if column.missing_count() == 0 {
        Score::Value(1.0)
    } else {
        Score::Value(0.75)
    }
}

/// Transparency score from the per-column metadata flag.
#[must_use]
pub fn transparency(metadata_available: bool) -> Score {
    if metadata_available {
        Score::Value(1.0)
    } else {
        Score::Value(0.5)
    }
}

/// Comparability score: 1.0 for numeric and datetime columns, 0.7
/// otherwise.
#[must_use]
pub fn comparability(column: &Column) -> Score {
    match column.kind() {
        ColumnKind::Numeric | ColumnKind::Datetime => Score::Value(1.0),
        ColumnKind::Other => Score::Value(0.7),
    }
}
