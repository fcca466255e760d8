//! Command handlers

use std::path::PathBuf;

use crate::cli::{Cli, Commands};
use crate::output::{output_check, output_options, output_outcome, output_parts};
use panelcost_app::app::{EstimateRequest, EstimateService};
use panelcost_app::config::Config;
use panelcost_app::export::export_estimate_to_excel;
use panelcost_app::repository::open_catalog;
use panelcost_domain::model::{EstimateOutcome, LineItemInput, SelectionKey};
use panelcost_infra::csv_loader::read_line_items;
use panelcost_types::{Error, GarageTier, OutputFormat, Result};
use tracing::info;

/// A failed command together with the output format it ran under
#[derive(Debug)]
pub struct Failure {
    pub error: Error,
    pub output_format: OutputFormat,
}

pub fn execute(cli: Cli) -> std::result::Result<(), Failure> {
    // Load config
    let config = load_config(&cli).map_err(|error| Failure {
        error,
        output_format: cli.format.unwrap_or_default(),
    })?;

    let output_format = cli.format.unwrap_or(config.output_format);
    run(cli.command, &config, output_format).map_err(|error| Failure {
        error,
        output_format,
    })
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load()?;

    // Override from CLI args
    if cli.data_dir.is_some() {
        config.data_dir = cli.data_dir.clone();
    }
    if let Some(unit_rate) = cli.unit_rate {
        config.unit_rate = unit_rate;
    }
    config.validate()?;
    Ok(config)
}

fn run(command: Commands, config: &Config, output_format: OutputFormat) -> Result<()> {
    match command {
        Commands::Estimate {
            maker,
            model,
            year,
            city,
            paint,
            garage,
            parts,
            parts_file,
            xlsx,
        } => {
            let selection = SelectionKey::new(
                &maker.unwrap_or_default(),
                &model.unwrap_or_default(),
                &year.unwrap_or_default(),
                &city.unwrap_or_default(),
                &paint.unwrap_or_default(),
                garage,
            );
            cmd_estimate(config, selection, parts, parts_file, xlsx, output_format)
        }

        Commands::Parts => cmd_parts(config, output_format),

        Commands::Options { maker, model } => {
            cmd_options(config, maker.as_deref(), model.as_deref(), output_format)
        }

        Commands::Check => cmd_check(config, output_format),

        Commands::Config {
            show,
            set_data_dir,
            set_unit_rate,
            set_output,
            reset,
        } => cmd_config(show, set_data_dir, set_unit_rate, set_output, reset),
    }
}

fn cmd_estimate(
    config: &Config,
    selection: SelectionKey,
    mut items: Vec<LineItemInput>,
    parts_file: Option<PathBuf>,
    xlsx: Option<PathBuf>,
    output_format: OutputFormat,
) -> Result<()> {
    if let Some(path) = parts_file {
        if !path.exists() {
            return Err(Error::FileNotFound(format!(
                "Parts file not found: {}",
                path.display()
            )));
        }
        let from_file = read_line_items(&path)?;
        info!(path = %path.display(), count = from_file.len(), "loaded damaged parts");
        items.extend(from_file);
    }

    let catalog = open_catalog(config)?;
    let service = EstimateService::new(&catalog, config.engine_config());
    let outcome = service.estimate(&EstimateRequest { selection, items })?;

    output_outcome(output_format, &outcome)?;

    if let (Some(path), EstimateOutcome::Computed(estimate)) = (xlsx, &outcome) {
        export_estimate_to_excel(estimate, &path)?;
        eprintln!("Exported to: {}", path.display());
    }

    Ok(())
}

fn cmd_parts(config: &Config, output_format: OutputFormat) -> Result<()> {
    let catalog = open_catalog(config)?;
    let service = EstimateService::new(&catalog, config.engine_config());
    output_parts(output_format, &service.part_vocabulary())
}

fn cmd_options(
    config: &Config,
    maker: Option<&str>,
    model: Option<&str>,
    output_format: OutputFormat,
) -> Result<()> {
    let catalog = open_catalog(config)?;
    let service = EstimateService::new(&catalog, config.engine_config());
    // Years only narrow once a maker is chosen
    let model = maker.and(model);
    output_options(output_format, &service.options(maker, model))
}

fn cmd_check(config: &Config, output_format: OutputFormat) -> Result<()> {
    let catalog = open_catalog(config)?;
    let service = EstimateService::new(&catalog, config.engine_config());
    let summary = service.check();

    if !summary.duplicate_keys.is_empty() {
        eprintln!(
            "Warning: {} duplicate selection key(s) found",
            summary.duplicate_keys.len()
        );
    }
    output_check(output_format, &summary)
}

fn cmd_config(
    show: bool,
    set_data_dir: Option<PathBuf>,
    set_unit_rate: Option<f64>,
    set_output: Option<OutputFormat>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(data_dir) = set_data_dir {
        config.data_dir = Some(data_dir);
        modified = true;
    }

    if let Some(unit_rate) = set_unit_rate {
        config.unit_rate = unit_rate;
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
        println!("Garage types:   {}", garage_summary());
    }

    Ok(())
}

fn garage_summary() -> String {
    GarageTier::ALL
        .iter()
        .map(|t| format!("{}={:.1}", t, t.discount_rate()))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use panelcost_types::ErrorCategory;
    use std::fs;
    use tempfile::tempdir;

    fn config_for(dir: &std::path::Path) -> Config {
        Config {
            data_dir: Some(dir.to_path_buf()),
            ..Config::default()
        }
    }

    fn write_tables(dir: &std::path::Path) {
        fs::write(
            dir.join("DATABASE_PAINT.csv"),
            "MAKER,MODEL,YEAR,CITY,PAINT_FINISH,BUMPER\nHONDA,CIVIC,2020,MUMBAI,METALLIC,1000\n",
        )
        .unwrap();
        fs::write(
            dir.join("DATABASE_LAB.csv"),
            "MAKER,MODEL,YEAR,CITY,BUMPER\nHONDA,CIVIC,2020,MUMBAI,2\n",
        )
        .unwrap();
        fs::write(dir.join("TINKERING.csv"), "BUMPER\n").unwrap();
        fs::write(dir.join("R&R.csv"), "DOOR\n").unwrap();
    }

    fn estimate_command(city: &str) -> Commands {
        Commands::Estimate {
            maker: Some("honda".to_string()),
            model: Some("civic".to_string()),
            year: Some("2020".to_string()),
            city: Some(city.to_string()),
            paint: Some("metallic".to_string()),
            garage: GarageTier::A,
            parts: vec![LineItemInput::new("BUMPER", 50.0)],
            parts_file: None,
            xlsx: None,
        }
    }

    #[test]
    fn test_estimate_failure_is_returned_not_exited() {
        let dir = tempdir().unwrap();
        write_tables(dir.path());
        let err = run(estimate_command("delhi"), &config_for(dir.path()), OutputFormat::Json)
            .unwrap_err();
        assert_eq!(err.category(), Some(ErrorCategory::NoMatch));
    }

    #[test]
    fn test_estimate_succeeds() {
        let dir = tempdir().unwrap();
        write_tables(dir.path());
        run(estimate_command("mumbai"), &config_for(dir.path()), OutputFormat::Json).unwrap();
    }

    #[test]
    fn test_missing_parts_file() {
        let dir = tempdir().unwrap();
        write_tables(dir.path());
        let command = Commands::Estimate {
            maker: None,
            model: None,
            year: None,
            city: None,
            paint: None,
            garage: GarageTier::A,
            parts: Vec::new(),
            parts_file: Some(dir.path().join("absent.csv")),
            xlsx: None,
        };
        let err = run(command, &config_for(dir.path()), OutputFormat::Table).unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
    }
}
