//! Scoring profiles.
//!
//! A profile bundles everything that differs between the two assessment
//! variants: the dimension set with weights, the scoring style, the
//! format-validity match mode, the business-rule bounds, and the
//! label/action wording. The aggregator and classifier themselves are
//! shared; only their configuration is per-profile.

use crate::scoring::{
    metrics::{MatchMode, DEFAULT_PATTERN},
    score::{Dimension, Score},
};

/// Scoring style for the ratio-based dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreStyle {
    /// Map raw ratios through the fixed bucket breakpoints.
    Bucketed,
    /// Return raw ratios directly.
    Continuous,
}

/// One dimension entry in a profile: which dimension, at what weight.
#[derive(Debug, Clone, Copy)]
pub struct DimensionSpec {
    /// The dimension to score.
    pub dimension: Dimension,
    /// Aggregation weight.
    pub weight: f64,
}

impl DimensionSpec {
    /// Create a dimension spec.
    #[must_use]
    pub fn new(dimension: Dimension, weight: f64) -> Self {
        Self { dimension, weight }
    }
}

/// Label and suggested-action wording keyed by DQS thresholds.
///
/// Tiers are closed at the bottom: ≥0.8, ≥0.6, ≥0.4, ≥0.2, under 0.2.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    labels: [&'static str; 5],
    actions: [&'static str; 5],
}

impl ClassifierConfig {
    /// Wording used by the weighted (generic) profile.
    #[must_use]
    pub fn weighted() -> Self {
        Self {
            labels: [
                "High Quality",
                "Good Quality",
                "Acceptable",
                "Poor Quality",
                "Very Poor",
            ],
            actions: [
                "Suitable for critical decision-making",
                "Reliable for most business purposes",
                "Usable with caution, consider improvements",
                "Use only if necessary, prioritize improvement",
                "Not recommended for use, requires remediation",
            ],
        }
    }

    /// Wording used by the carbon profile.
    #[must_use]
    pub fn carbon() -> Self {
        Self {
            labels: ["High", "Good", "Acceptable", "Poor", "Very Poor"],
            actions: [
                "Use confidently for decision-making.",
                "Use with minor caution.",
                "Review and improve where possible.",
                "Flag for remediation.",
                "Do not use.",
            ],
        }
    }

    /// Tier index for a numeric DQS (0 = best).
    fn tier(dqs: f64) -> usize {
        if dqs >= 0.8 {
            0
        } else if dqs >= 0.6 {
            1
        } else if dqs >= 0.4 {
            2
        } else if dqs >= 0.2 {
            3
        } else {
            4
        }
    }

    /// Quality label for a score; `NotApplicable` passes through as "N/A".
    #[must_use]
    pub fn label(&self, score: Score) -> &'static str {
        match score.value() {
            Some(dqs) => self.labels[Self::tier(dqs)],
            None => "N/A",
        }
    }

    /// Suggested action for a score; `NotApplicable` passes through as
    /// "N/A".
    #[must_use]
    pub fn action(&self, score: Score) -> &'static str {
        match score.value() {
            Some(dqs) => self.actions[Self::tier(dqs)],
            None => "N/A",
        }
    }
}

/// A complete scoring profile.
///
/// # Example
///
/// ```
/// use aferir::scoring::ScoringProfile;
///
/// let profile = ScoringProfile::by_name("carbon").unwrap();
/// assert_eq!(profile.dimensions().len(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct ScoringProfile {
    /// Profile name for display and lookup.
    pub name: String,
    /// Description of what this profile is for.
    pub description: String,
    dimensions: Vec<DimensionSpec>,
    style: ScoreStyle,
    match_mode: MatchMode,
    pattern: String,
    min_value: f64,
    max_value: f64,
    classifier: ClassifierConfig,
    carbon_summary: bool,
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self::weighted()
    }
}

impl ScoringProfile {
    /// The weighted 4-dimension profile.
    ///
    /// Completeness 2.0, Format Validity 1.5, Cross-System Consistency
    /// 1.5, Business Rule Compliance 2.0 (numeric columns only). Bucketed
    /// scorers, prefix pattern matching.
    #[must_use]
    pub fn weighted() -> Self {
        Self {
            name: "weighted".to_string(),
            description: "Weighted 4-dimension structural quality profile".to_string(),
            dimensions: vec![
                DimensionSpec::new(Dimension::Completeness, 2.0),
                DimensionSpec::new(Dimension::FormatValidity, 1.5),
                DimensionSpec::new(Dimension::CrossSystemConsistency, 1.5),
                DimensionSpec::new(Dimension::BusinessRuleCompliance, 2.0),
            ],
            style: ScoreStyle::Bucketed,
            match_mode: MatchMode::Prefix,
            pattern: DEFAULT_PATTERN.to_string(),
            min_value: 0.0,
            max_value: 999_999.0,
            classifier: ClassifierConfig::weighted(),
            carbon_summary: false,
        }
    }

    /// The carbon 8-dimension equal-weight profile.
    ///
    /// Adds accuracy, timeliness, relevance, verifiability, transparency
    /// and comparability, all at weight 1.0. Continuous scorers, full
    /// pattern matching, and the emissions-uncertainty summary block.
    #[must_use]
    pub fn carbon() -> Self {
        Self {
            name: "carbon".to_string(),
            description: "8-dimension carbon emissions data profile with PCAF summary".to_string(),
            dimensions: vec![
                DimensionSpec::new(Dimension::Completeness, 1.0),
                DimensionSpec::new(Dimension::Accuracy, 1.0),
                DimensionSpec::new(Dimension::FormatValidity, 1.0),
                DimensionSpec::new(Dimension::Timeliness, 1.0),
                DimensionSpec::new(Dimension::Relevance, 1.0),
                DimensionSpec::new(Dimension::Verifiability, 1.0),
                DimensionSpec::new(Dimension::Transparency, 1.0),
                DimensionSpec::new(Dimension::Comparability, 1.0),
            ],
            style: ScoreStyle::Continuous,
            match_mode: MatchMode::Full,
            pattern: DEFAULT_PATTERN.to_string(),
            min_value: 0.0,
            max_value: 999_999.0,
            classifier: ClassifierConfig::carbon(),
            carbon_summary: true,
        }
    }

    /// Get a profile by name.
    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "weighted" | "generic" | "default" => Some(Self::weighted()),
            "carbon" | "extended" => Some(Self::carbon()),
            _ => None,
        }
    }

    /// List available profile names.
    #[must_use]
    pub fn available_profiles() -> Vec<&'static str> {
        vec!["weighted", "carbon"]
    }

    /// The dimension set with weights, in report order.
    #[must_use]
    pub fn dimensions(&self) -> &[DimensionSpec] {
        &self.dimensions
    }

    /// Scoring style for the ratio-based dimensions.
    #[must_use]
    pub fn style(&self) -> ScoreStyle {
        self.style
    }

    /// Match mode for the format-validity pattern.
    #[must_use]
    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    /// The format-validity pattern (unanchored, as supplied).
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Business-rule bounds as `(min, max)`.
    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        (self.min_value, self.max_value)
    }

    /// Classifier wording table.
    #[must_use]
    pub fn classifier(&self) -> &ClassifierConfig {
        &self.classifier
    }

    /// Whether this profile produces the carbon summary block.
    #[must_use]
    pub fn has_carbon_summary(&self) -> bool {
        self.carbon_summary
    }

    /// Override the format-validity pattern.
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Override the format-validity match mode.
    #[must_use]
    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    /// Override the business-rule bounds.
    #[must_use]
    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_value = min;
        self.max_value = max;
        self
    }

    /// Override the scoring style.
    #[must_use]
    pub fn with_style(mut self, style: ScoreStyle) -> Self {
        self.style = style;
        self
    }

    /// Replace the dimension set.
    #[must_use]
    pub fn with_dimensions(mut self, dimensions: Vec<DimensionSpec>) -> Self {
        self.dimensions = dimensions;
        self
    }
}
