//! aferir CLI - Data Quality Scoring
//!
//! Command-line entry point; all logic lives in [`aferir::cli`].

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::process::ExitCode;

fn main() -> ExitCode {
    aferir::cli::run()
}
