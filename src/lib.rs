//! aferir - Data Quality Scoring for Tabular Datasets in Pure Rust
//!
//! Assigns a per-column and overall data quality score (DQS) to a tabular
//! dataset using heuristic dimension scorers, a weight-renormalizing
//! aggregator, and threshold-based label/action classification. Aimed at
//! analysts who want a quick, explainable quality snapshot plus a
//! human-readable label and suggested remediation action.
//!
//! # Design Principles
//!
//! 1. **Deterministic** - scorers are pure functions of a single column;
//!    the same table always yields the same report
//! 2. **Total** - every valid table, including the empty table, produces
//!    a defined report; degenerate inputs degrade to documented floors
//!    instead of panicking
//! 3. **Typed sentinels** - "not applicable" is an enum variant, never a
//!    string, until the serialization boundary
//! 4. **Ecosystem aligned** - Arrow `RecordBatch` input, CSV/Parquet/JSONL
//!    loading via the Arrow readers
//!
//! # Quick Start
//!
//! ```no_run
//! use aferir::{Assessor, Table};
//!
//! let table = Table::from_csv("data/suppliers.csv").unwrap();
//! let report = Assessor::weighted().unwrap().assess(&table);
//!
//! for row in &report.rows {
//!     println!("{:<20} {} {}", row.column, row.dqs, row.label);
//! }
//! println!("Overall: {} ({})", report.overall_dqs, report.overall_label);
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::cast_precision_loss,
        clippy::too_many_lines
    )
)]
// Allow some pedantic lints for cleaner code
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::module_name_repetitions)]

/// CLI module for command-line interface
#[cfg(feature = "cli")]
pub mod cli;
pub mod error;
pub mod scoring;
pub mod table;

// Re-exports for convenience
pub use error::{Error, Result};
pub use scoring::{
    Assessor, CarbonSummary, ColumnAssessment, DatasetReport, Dimension, DimensionScore,
    MatchMode, Score, ScoreStyle, ScoringProfile,
};
pub use table::{CellValue, Column, ColumnKind, Table};
