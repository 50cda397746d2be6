//! aferir CLI - Data Quality Scoring
//!
//! Command-line interface for assessing tabular datasets.

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};

mod assess;

/// aferir - Data Quality Scoring for Tabular Datasets in Pure Rust
#[derive(Parser)]
#[command(name = "aferir")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess data quality of a dataset
    Assess {
        /// Path to dataset file (CSV/Parquet/JSONL)
        path: PathBuf,
        /// Scoring profile (weighted, carbon)
        #[arg(short, long, default_value = "weighted")]
        profile: String,
        /// Format-validity pattern (default matches any non-empty string)
        #[arg(long)]
        pattern: Option<String>,
        /// Lower business-rule bound for numeric columns
        #[arg(long, default_value = "0")]
        min_value: f64,
        /// Upper business-rule bound for numeric columns
        #[arg(long, default_value = "999999")]
        max_value: f64,
        /// Columns with descriptive metadata (repeatable)
        #[arg(long = "metadata")]
        metadata: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Write the JSON report to a file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Display dataset information
    Info {
        /// Path to dataset file
        path: PathBuf,
    },
    /// List available scoring profiles
    Profiles,
}

/// Run the aferir CLI.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Assess {
            path,
            profile,
            pattern,
            min_value,
            max_value,
            metadata,
            json,
            output,
        } => assess::cmd_assess(
            &path,
            &profile,
            pattern.as_deref(),
            min_value,
            max_value,
            &metadata,
            json,
            output.as_deref(),
        ),
        Commands::Info { path } => assess::cmd_info(&path),
        Commands::Profiles => assess::cmd_profiles(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
