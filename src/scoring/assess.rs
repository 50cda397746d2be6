//! Column and dataset assessment.
//!
//! The [`Assessor`] runs every dimension of its profile over each column,
//! aggregates the results into a per-column DQS, classifies it, and
//! assembles the [`DatasetReport`] with dataset-level summary values.
//! Assessment itself is total: every valid table, including the empty
//! table, produces a defined report. The only fallible step is compiling
//! the format-validity pattern at construction time.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Serialize, Serializer};

use crate::{
    error::Result,
    scoring::{
        aggregate::{mean, weighted_mean},
        metrics,
        profile::{ScoreStyle, ScoringProfile},
        score::{round2, Dimension, Score},
    },
    table::{Column, ColumnKind, Table},
};

/// One scored dimension in a report row.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DimensionScore {
    /// The dimension.
    pub dimension: Dimension,
    /// Its score.
    pub score: Score,
}

/// Assessment result for a single column.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnAssessment {
    /// Column name.
    pub column: String,
    /// Dimension scores in profile order.
    pub scores: Vec<DimensionScore>,
    /// Aggregated data quality score.
    pub dqs: Score,
    /// Quality label for the DQS.
    pub label: String,
    /// Suggested remediation action.
    pub suggested_action: String,
}

impl ColumnAssessment {
    /// Look up the score for one dimension, if it was assessed.
    #[must_use]
    pub fn score(&self, dimension: Dimension) -> Option<Score> {
        self.scores
            .iter()
            .find(|s| s.dimension == dimension)
            .map(|s| s.score)
    }

    /// Flat record representation: one JSON object keyed by display names,
    /// with `"N/A"` for not-applicable scores.
    #[must_use]
    pub fn to_record(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        map.insert("Column".to_string(), self.column.clone().into());
        for entry in &self.scores {
            map.insert(
                entry.dimension.name().to_string(),
                score_json(entry.score),
            );
        }
        map.insert("DQS".to_string(), score_json(self.dqs));
        map.insert("Quality Label".to_string(), self.label.clone().into());
        map.insert(
            "Suggested Action".to_string(),
            self.suggested_action.clone().into(),
        );
        serde_json::Value::Object(map)
    }
}

fn score_json(score: Score) -> serde_json::Value {
    match score.value() {
        Some(v) => serde_json::json!(v),
        None => serde_json::Value::String("N/A".to_string()),
    }
}

fn serialize_opt_na<S>(value: &Option<f64>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) => serializer.serialize_f64(*v),
        None => serializer.serialize_str("N/A"),
    }
}

/// Carbon-specific dataset summary: PCAF score, uncertainty and emissions
/// range derived from the verifiability dimension.
#[derive(Debug, Clone, Serialize)]
pub struct CarbonSummary {
    /// Mean verifiability across all columns.
    pub mean_verifiability: f64,
    /// Simplified PCAF score: 1 (verified) when mean verifiability is at
    /// least 0.95, otherwise 2 (unverified).
    pub pcaf_score: u8,
    /// Uncertainty estimate in percent, up to ±20.
    pub uncertainty_percent: f64,
    /// Estimated emissions: mean of per-column means over numeric columns.
    #[serde(serialize_with = "serialize_opt_na")]
    pub emissions_estimate: Option<f64>,
    /// Lower bound of the emissions range.
    #[serde(serialize_with = "serialize_opt_na")]
    pub emissions_lower: Option<f64>,
    /// Upper bound of the emissions range.
    #[serde(serialize_with = "serialize_opt_na")]
    pub emissions_upper: Option<f64>,
    /// Decision recommendation keyed on the overall DQS.
    pub decision: String,
    /// Columns whose verifiability fell below 0.95.
    pub improvement_areas: Vec<String>,
}

/// Complete assessment report for a dataset.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetReport {
    /// Per-column rows in source column order.
    pub rows: Vec<ColumnAssessment>,
    /// Overall DQS: mean of the applicable per-column DQS values.
    pub overall_dqs: Score,
    /// Quality label for the overall DQS.
    pub overall_label: String,
    /// Suggested action for the overall DQS.
    pub overall_action: String,
    /// Carbon summary block, present under the carbon profile only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbon: Option<CarbonSummary>,
}

impl DatasetReport {
    /// Look up the row for one column.
    #[must_use]
    pub fn row(&self, column: &str) -> Option<&ColumnAssessment> {
        self.rows.iter().find(|r| r.column == column)
    }

    /// List-of-records representation, one flat object per column.
    #[must_use]
    pub fn to_records(&self) -> Vec<serde_json::Value> {
        self.rows.iter().map(ColumnAssessment::to_record).collect()
    }

    /// Full JSON value: records plus the summary object, with the
    /// not-applicable sentinel rendered as `"N/A"`.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let mut summary = serde_json::Map::new();
        summary.insert("overall_dqs".to_string(), score_json(self.overall_dqs));
        summary.insert(
            "overall_label".to_string(),
            self.overall_label.clone().into(),
        );
        summary.insert(
            "overall_action".to_string(),
            self.overall_action.clone().into(),
        );
        if let Some(carbon) = &self.carbon {
            summary.insert(
                "carbon".to_string(),
                serde_json::to_value(carbon).unwrap_or(serde_json::Value::Null),
            );
        }

        serde_json::json!({
            "report": self.to_records(),
            "summary": serde_json::Value::Object(summary),
        })
    }
}

/// Dataset assessor.
///
/// Holds a scoring profile, the compiled format-validity pattern, the
/// reference timestamp for timeliness, and the per-column metadata flags.
///
/// # Example
///
/// ```no_run
/// use aferir::{Assessor, Table};
///
/// let table = Table::from_csv("data/suppliers.csv").unwrap();
/// let report = Assessor::weighted().unwrap().assess(&table);
/// println!("Overall DQS: {}", report.overall_dqs);
/// ```
#[derive(Debug, Clone)]
pub struct Assessor {
    profile: ScoringProfile,
    pattern: Regex,
    now: DateTime<Utc>,
    metadata_flags: HashMap<String, bool>,
}

impl Assessor {
    /// Create an assessor from a profile, compiling its pattern.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPattern`] if the profile's pattern
    /// does not compile.
    pub fn from_profile(profile: ScoringProfile) -> Result<Self> {
        let pattern = metrics::compile_pattern(profile.pattern(), profile.match_mode())?;
        Ok(Self {
            profile,
            pattern,
            now: Utc::now(),
            metadata_flags: HashMap::new(),
        })
    }

    /// Create an assessor with the weighted profile.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in pattern; the `Result` mirrors
    /// [`Self::from_profile`].
    pub fn weighted() -> Result<Self> {
        Self::from_profile(ScoringProfile::weighted())
    }

    /// Create an assessor with the carbon profile.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in pattern; the `Result` mirrors
    /// [`Self::from_profile`].
    pub fn carbon() -> Result<Self> {
        Self::from_profile(ScoringProfile::carbon())
    }

    /// Override the reference timestamp used by the timeliness scorer.
    ///
    /// Defaults to the construction time; injectable for deterministic
    /// tests.
    #[must_use]
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Set all per-column metadata flags at once.
    #[must_use]
    pub fn with_metadata_flags(mut self, flags: HashMap<String, bool>) -> Self {
        self.metadata_flags = flags;
        self
    }

    /// Mark one column as having descriptive metadata.
    #[must_use]
    pub fn with_metadata_flag(mut self, column: impl Into<String>, available: bool) -> Self {
        self.metadata_flags.insert(column.into(), available);
        self
    }

    /// The profile this assessor runs.
    #[must_use]
    pub fn profile(&self) -> &ScoringProfile {
        &self.profile
    }

    /// Assess every column of the table and assemble the report.
    ///
    /// Columns are processed in source order; the report preserves it.
    #[must_use]
    pub fn assess(&self, table: &Table) -> DatasetReport {
        let rows: Vec<ColumnAssessment> = table
            .columns()
            .iter()
            .map(|column| self.assess_column(column))
            .collect();

        let overall_dqs = mean(rows.iter().map(|r| r.dqs));
        let classifier = self.profile.classifier();
        let overall_label = classifier.label(overall_dqs).to_string();
        let overall_action = classifier.action(overall_dqs).to_string();

        let carbon = if self.profile.has_carbon_summary() && !rows.is_empty() {
            Some(self.carbon_summary(table, &rows, overall_dqs))
        } else {
            None
        };

        DatasetReport {
            rows,
            overall_dqs,
            overall_label,
            overall_action,
            carbon,
        }
    }

    /// Assess a single column: score every profile dimension, aggregate,
    /// classify.
    #[must_use]
    pub fn assess_column(&self, column: &Column) -> ColumnAssessment {
        let scores: Vec<DimensionScore> = self
            .profile
            .dimensions()
            .iter()
            .map(|spec| DimensionScore {
                dimension: spec.dimension,
                score: self.score_dimension(spec.dimension, column),
            })
            .collect();

        let dqs = weighted_mean(
            scores
                .iter()
                .zip(self.profile.dimensions())
                .map(|(entry, spec)| (entry.score, spec.weight)),
        );

        let classifier = self.profile.classifier();
        ColumnAssessment {
            column: column.name().to_string(),
            scores,
            dqs,
            label: classifier.label(dqs).to_string(),
            suggested_action: classifier.action(dqs).to_string(),
        }
    }

    fn score_dimension(&self, dimension: Dimension, column: &Column) -> Score {
        let (min, max) = self.profile.bounds();
        match dimension {
            Dimension::Completeness => match self.profile.style() {
                ScoreStyle::Bucketed => metrics::completeness(column),
                ScoreStyle::Continuous => metrics::completeness_continuous(column),
            },
            Dimension::FormatValidity => match self.profile.style() {
                ScoreStyle::Bucketed => metrics::format_validity(column, &self.pattern),
                ScoreStyle::Continuous => {
                    metrics::format_validity_continuous(column, &self.pattern)
                }
            },
            Dimension::CrossSystemConsistency => metrics::consistency(column),
            Dimension::BusinessRuleCompliance => metrics::business_rule(column, min, max),
            Dimension::Accuracy => metrics::accuracy(column),
            Dimension::Timeliness => metrics::timeliness(column, self.now),
            Dimension::Relevance => metrics::relevance(column),
            Dimension::Verifiability => metrics::verifiability(column),
            Dimension::Transparency => metrics::transparency(
                self.metadata_flags
                    .get(column.name())
                    .copied()
                    .unwrap_or(false),
            ),
            Dimension::Comparability => metrics::comparability(column),
        }
    }

    fn carbon_summary(
        &self,
        table: &Table,
        rows: &[ColumnAssessment],
        overall_dqs: Score,
    ) -> CarbonSummary {
        let verifiability: Vec<f64> = rows
            .iter()
            .filter_map(|r| r.score(Dimension::Verifiability).and_then(|s| s.value()))
            .collect();
        let mean_verifiability = if verifiability.is_empty() {
            1.0
        } else {
            verifiability.iter().sum::<f64>() / verifiability.len() as f64
        };

        let pcaf_score = if mean_verifiability >= 0.95 { 1 } else { 2 };
        let uncertainty_percent = round2((1.0 - mean_verifiability) * 20.0);

        let numeric_means: Vec<f64> = table
            .columns()
            .iter()
            .filter(|c| c.kind() == ColumnKind::Numeric)
            .filter_map(Column::mean)
            .collect();
        let emissions_estimate = if numeric_means.is_empty() {
            None
        } else {
            Some(round2(
                numeric_means.iter().sum::<f64>() / numeric_means.len() as f64,
            ))
        };
        let emissions_lower =
            emissions_estimate.map(|e| round2(e * (1.0 - uncertainty_percent / 100.0)));
        let emissions_upper =
            emissions_estimate.map(|e| round2(e * (1.0 + uncertainty_percent / 100.0)));

        let decision = match overall_dqs.value() {
            Some(dqs) if dqs >= 0.8 => "Use confidently for decision-making.",
            Some(dqs) if dqs >= 0.6 => "Suitable for most decision-making with uncertainty noted.",
            Some(dqs) if dqs >= 0.4 => "Use with caution; verify critical fields.",
            Some(_) => "Improve data before use.",
            None => "N/A",
        }
        .to_string();

        let improvement_areas: Vec<String> = rows
            .iter()
            .filter(|r| {
                r.score(Dimension::Verifiability)
                    .and_then(|s| s.value())
                    .is_some_and(|v| v < 0.95)
            })
            .map(|r| r.column.clone())
            .collect();

        CarbonSummary {
            mean_verifiability,
            pcaf_score,
            uncertainty_percent,
            emissions_estimate,
            emissions_lower,
            emissions_upper,
            decision,
            improvement_areas,
        }
    }
}
