//! Score and dimension types.
//!
//! A [`Score`] is either a value in `[0, 1]` or the not-applicable
//! sentinel. The sentinel is a proper enum variant rather than a string so
//! it can never leak into numeric comparisons; it is rendered as the
//! literal `"N/A"` only at the serialization boundary.

use std::fmt;

use serde::{Serialize, Serializer};

/// A dimension score: a value in `[0, 1]` or not applicable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Score {
    /// An applicable score in `[0, 1]`.
    Value(f64),
    /// The dimension does not apply to this column.
    NotApplicable,
}

impl Score {
    /// The numeric value, if applicable.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::NotApplicable => None,
        }
    }

    /// Whether this score carries a value.
    #[must_use]
    pub fn is_applicable(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Round an applicable score to two decimals; passes the sentinel
    /// through.
    #[must_use]
    pub fn rounded(self) -> Self {
        match self {
            Self::Value(v) => Self::Value(round2(v)),
            Self::NotApplicable => Self::NotApplicable,
        }
    }
}

impl From<f64> for Score {
    fn from(v: f64) -> Self {
        Self::Value(v)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{:.2}", v),
            Self::NotApplicable => write!(f, "N/A"),
        }
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => serializer.serialize_f64(*v),
            Self::NotApplicable => serializer.serialize_str("N/A"),
        }
    }
}

/// Round to two decimal places.
#[must_use]
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// The quality dimensions a column can be assessed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Dimension {
    /// Ratio of non-missing cells.
    Completeness,
    /// Ratio of stringified values matching the configured pattern.
    FormatValidity,
    /// Case-fold agreement among distinct values.
    CrossSystemConsistency,
    /// Ratio of numeric values within the configured bounds.
    BusinessRuleCompliance,
    /// Ratio of non-negative numeric values.
    Accuracy,
    /// Ratio of timestamps within the freshness window.
    Timeliness,
    /// Uniqueness-based usefulness heuristic.
    Relevance,
    /// Whether the column is fully populated.
    Verifiability,
    /// Whether descriptive metadata exists for the column.
    Transparency,
    /// Whether the column kind supports cross-dataset comparison.
    Comparability,
}

impl Dimension {
    /// Human-readable dimension name, as used in report rows.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Completeness => "Completeness",
            Self::FormatValidity => "Format Validity",
            Self::CrossSystemConsistency => "Cross-System Consistency",
            Self::BusinessRuleCompliance => "Business Rule Compliance",
            Self::Accuracy => "Accuracy",
            Self::Timeliness => "Timeliness",
            Self::Relevance => "Relevance",
            Self::Verifiability => "Verifiability",
            Self::Transparency => "Transparency",
            Self::Comparability => "Comparability",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
