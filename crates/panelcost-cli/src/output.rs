//! Output formatting module

use panelcost_app::app::{DataCheckSummary, SelectionOptions};
use panelcost_domain::model::EstimateOutcome;
use panelcost_domain::service::generate_estimate_report;
use panelcost_types::{Error, ErrorCategory, OutputFormat, Result};
use serde::Serialize;

const EMPTY_ITEMS_MESSAGE: &str = "Please enter damaged parts to generate the cost estimate.";

/// Failure as emitted in JSON mode
#[derive(Debug, Serialize)]
struct FailureOutput {
    category: ErrorCategory,
    message: String,
}

pub fn output_outcome(output_format: OutputFormat, outcome: &EstimateOutcome) -> Result<()> {
    match (output_format, outcome) {
        (OutputFormat::Json, EstimateOutcome::Computed(estimate)) => {
            let rounded = EstimateOutcome::Computed(estimate.rounded());
            println!("{}", serde_json::to_string_pretty(&rounded)?);
        }
        (OutputFormat::Json, EstimateOutcome::Empty) => {
            println!("{}", serde_json::to_string_pretty(outcome)?);
        }
        (OutputFormat::Table, EstimateOutcome::Computed(estimate)) => {
            println!("{}", generate_estimate_report(estimate));
        }
        (OutputFormat::Table, EstimateOutcome::Empty) => {
            println!("{}", EMPTY_ITEMS_MESSAGE);
        }
    }
    Ok(())
}

/// Print a categorized failure to stdout in JSON mode.
///
/// Returns false when nothing was printed; the caller then reports on stderr.
pub fn output_failure(output_format: OutputFormat, error: &Error) -> bool {
    let Some(category) = error.category() else {
        return false;
    };
    if output_format != OutputFormat::Json {
        return false;
    }

    let failure = FailureOutput {
        category,
        message: error.to_string(),
    };
    match serde_json::to_string_pretty(&failure) {
        Ok(content) => {
            println!("{}", content);
            true
        }
        Err(_) => false,
    }
}

pub fn output_parts(output_format: OutputFormat, parts: &[String]) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(parts)?);
        return Ok(());
    }

    println!("Known parts ({})", parts.len());
    println!("===========");
    for part in parts {
        println!("  {}", part);
    }
    Ok(())
}

pub fn output_options(output_format: OutputFormat, options: &SelectionOptions) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(options)?);
        return Ok(());
    }

    println!("Selection Options");
    println!("=================");
    println!("Makers:      {}", options.makers.join(", "));
    if let Some(ref models) = options.models {
        println!("Models:      {}", models.join(", "));
    }
    if let Some(ref years) = options.years {
        println!("Years:       {}", years.join(", "));
    }
    println!("Cities:      {}", options.cities.join(", "));
    println!("Paint types: {}", options.paint_finishes.join(", "));
    let tiers: Vec<String> = options
        .garage_tiers
        .iter()
        .map(|t| format!("{} ({:.1})", t, t.discount_rate()))
        .collect();
    println!("Garages:     {}", tiers.join(", "));
    Ok(())
}

pub fn output_check(output_format: OutputFormat, summary: &DataCheckSummary) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    println!("Rate Data Check");
    println!("===============");
    println!("Source:          {}", summary.source);
    println!(
        "Painting:        {} rows, {} parts",
        summary.painting_rows, summary.painting_parts
    );
    println!(
        "Labour:          {} rows, {} parts",
        summary.labour_rows, summary.labour_parts
    );
    println!("Tinkering parts: {}", summary.tinkering_parts);
    println!("R&R parts:       {}", summary.rnr_parts);

    if summary.duplicate_keys.is_empty() {
        println!("Duplicate keys:  none");
    } else {
        println!(
            "Duplicate keys:  {} (first row wins)",
            summary.duplicate_keys.len()
        );
        for key in &summary.duplicate_keys {
            println!("  {}", key);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use panelcost_types::{EstimateError, TableKind};

    #[test]
    fn test_failure_printed_only_for_categorized_json() {
        let no_match: Error = EstimateError::NoMatch {
            tables: vec![TableKind::Painting],
        }
        .into();
        assert!(output_failure(OutputFormat::Json, &no_match));
        assert!(!output_failure(OutputFormat::Table, &no_match));

        let io = Error::FileNotFound("DATABASE_PAINT.csv".to_string());
        assert!(!output_failure(OutputFormat::Json, &io));
    }
}
