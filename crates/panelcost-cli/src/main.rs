//! Panelcost - vehicle body-repair cost estimation
//!
//! A CLI tool that prices tinkering, R&R and painting for damaged parts
//! from painting and labour rate tables.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(failure) = commands::execute(cli) {
        // Categorized failures go to stdout as JSON when that format is active
        if !output::output_failure(failure.output_format, &failure.error) {
            eprintln!("Error: {}", failure.error);
            if let Some(category) = failure.error.category() {
                eprintln!("Category: {}", category);
            }
        }
        std::process::exit(1);
    }
}
