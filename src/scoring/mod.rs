//! Data quality scoring.
//!
//! A fixed pipeline of independent per-column metric scorers, a weighted
//! aggregator that tolerates not-applicable dimensions, and
//! threshold-based label/action classification.
//!
//! Two scoring profiles ship built in:
//! - **weighted** - 4 structural dimensions (completeness, format
//!   validity, cross-system consistency, business-rule compliance) with
//!   bucketed scores and per-dimension weights
//! - **carbon** - 8 equal-weight dimensions plus a PCAF/uncertainty
//!   summary for carbon emissions data
//!
//! # Example
//!
//! ```ignore
//! use aferir::{Assessor, Table};
//!
//! let table = Table::from_csv("emissions.csv")?;
//! let report = Assessor::carbon()?.assess(&table);
//! for row in &report.rows {
//!     println!("{}: {} ({})", row.column, row.dqs, row.label);
//! }
//! ```

// Ratio computations over counts
#![allow(clippy::cast_precision_loss)]

mod aggregate;
pub mod metrics;
mod profile;
mod score;

mod assess;


pub use aggregate::{mean, weighted_mean};
pub use assess::{Assessor, CarbonSummary, ColumnAssessment, DatasetReport, DimensionScore};
pub use metrics::{compile_pattern, MatchMode, DEFAULT_PATTERN, TIMELINESS_WINDOW_DAYS};
pub use profile::{ClassifierConfig, DimensionSpec, ScoreStyle, ScoringProfile};
pub use score::{round2, Dimension, Score};
