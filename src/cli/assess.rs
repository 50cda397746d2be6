//! Assessment CLI commands.

use std::path::Path;

use crate::{
    scoring::{Assessor, DatasetReport, ScoringProfile},
    table::{ColumnKind, Table},
    Error,
};

/// Assess data quality of a dataset file.
#[allow(clippy::too_many_arguments)]
pub(crate) fn cmd_assess(
    path: &Path,
    profile_name: &str,
    pattern: Option<&str>,
    min_value: f64,
    max_value: f64,
    metadata: &[String],
    json: bool,
    output: Option<&Path>,
) -> crate::Result<()> {
    let mut profile = ScoringProfile::by_name(profile_name)
        .ok_or_else(|| Error::invalid_config(format!("unknown profile '{}'", profile_name)))?;

    if let Some(pattern) = pattern {
        profile = profile.with_pattern(pattern);
    }
    profile = profile.with_bounds(min_value, max_value);

    let mut assessor = Assessor::from_profile(profile)?;
    for column in metadata {
        assessor = assessor.with_metadata_flag(column, true);
    }

    let table = Table::from_path(path)?;
    let report = assessor.assess(&table);

    if let Some(output) = output {
        let rendered = serde_json::to_string_pretty(&report.to_json_value())?;
        std::fs::write(output, rendered).map_err(|e| Error::io(e, output))?;
        println!("Wrote report to {}", output.display());
        return Ok(());
    }

    if json {
        let rendered = serde_json::to_string_pretty(&report.to_json_value())?;
        println!("{}", rendered);
    } else {
        print_report(path, &report);
    }

    Ok(())
}

fn print_report(path: &Path, report: &DatasetReport) {
    println!("Data Quality Assessment Report");
    println!("==============================");
    println!("File: {}", path.display());
    println!("Columns: {}", report.rows.len());
    println!();

    println!(
        "{:<24} {:<8} {:<14} ACTION",
        "COLUMN", "DQS", "LABEL"
    );
    println!("{}", "-".repeat(78));

    for row in &report.rows {
        println!(
            "{:<24} {:<8} {:<14} {}",
            row.column,
            row.dqs.to_string(),
            row.label,
            row.suggested_action
        );
    }

    println!();
    println!("Overall Dataset Quality");
    println!("-----------------------");
    println!(
        "DQS: {} | Label: {} | Suggested Action: {}",
        report.overall_dqs, report.overall_label, report.overall_action
    );

    if let Some(carbon) = &report.carbon {
        println!();
        println!("Carbon Data Summary");
        println!("-------------------");
        println!(
            "PCAF Score: {} ({} GHG emissions data)",
            carbon.pcaf_score,
            if carbon.pcaf_score == 1 {
                "Verified"
            } else {
                "Unverified"
            }
        );
        println!("Uncertainty: \u{00b1}{}%", carbon.uncertainty_percent);
        match (carbon.emissions_estimate, carbon.emissions_lower, carbon.emissions_upper) {
            (Some(estimate), Some(lower), Some(upper)) => println!(
                "Emissions Reporting: {} tCO2e \u{00b1}{}% ({}-{} tCO2e)",
                estimate, carbon.uncertainty_percent, lower, upper
            ),
            _ => println!("Emissions Reporting: N/A (no numeric columns)"),
        }
        println!("Decision Use: {}", carbon.decision);
        if carbon.improvement_areas.is_empty() {
            println!("Improvement Areas: None");
        } else {
            println!("Improvement Areas: {}", carbon.improvement_areas.join(", "));
        }
    }
}

/// Display dataset information.
pub(crate) fn cmd_info(path: &Path) -> crate::Result<()> {
    let table = Table::from_path(path)?;

    let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

    println!("File: {}", path.display());
    println!("Rows: {}", table.row_count());
    println!("Columns: {}", table.num_columns());
    println!("Size: {} bytes", file_size);
    println!();

    println!("{:<24} {:<10} {:<10} MISSING", "COLUMN", "KIND", "DISTINCT");
    println!("{}", "-".repeat(56));
    for column in table.columns() {
        let kind = match column.kind() {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Datetime => "datetime",
            ColumnKind::Other => "other",
        };
        println!(
            "{:<24} {:<10} {:<10} {}",
            column.name(),
            kind,
            column.distinct_values().len(),
            column.missing_count()
        );
    }

    Ok(())
}

/// List available scoring profiles.
pub(crate) fn cmd_profiles() -> crate::Result<()> {
    println!("Available scoring profiles:");
    println!();
    for name in ScoringProfile::available_profiles() {
        if let Some(profile) = ScoringProfile::by_name(name) {
            println!("  {:<12} {}", name, profile.description);
            println!(
                "  {:<12} dimensions: {}",
                "",
                profile
                    .dimensions()
                    .iter()
                    .map(|d| d.dimension.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            println!();
        }
    }
    Ok(())
}
