//! CLI definition using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use panelcost_domain::model::LineItemInput;
use panelcost_types::{GarageTier, OutputFormat};

#[derive(Parser)]
#[command(name = "panelcost")]
#[command(version)]
#[command(about = "Vehicle body-repair cost estimation (tinkering, R&R, painting)")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the rate tables. Uses config value if not specified.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Unit rate applied to labour units. Uses config value if not specified.
    #[arg(long, global = true)]
    pub unit_rate: Option<f64>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Estimate repair costs for damaged parts
    Estimate {
        /// Car maker (e.g., "HONDA")
        #[arg(long)]
        maker: Option<String>,

        /// Car model (e.g., "CIVIC")
        #[arg(long)]
        model: Option<String>,

        /// Schedule year (e.g., "2020")
        #[arg(long)]
        year: Option<String>,

        /// City (e.g., "MUMBAI")
        #[arg(long)]
        city: Option<String>,

        /// Paint type (e.g., "METALLIC")
        #[arg(long)]
        paint: Option<String>,

        /// Garage type
        #[arg(long, short = 'g', value_enum, ignore_case = true, default_value_t = GarageTier::A)]
        garage: GarageTier,

        /// Damaged part as NAME or NAME=DISCOUNT (paint discount in %). Repeatable.
        #[arg(long = "part", short = 'p', value_parser = parse_part_arg)]
        parts: Vec<LineItemInput>,

        /// CSV file of damaged parts (header: Part,Paint Discount (%))
        #[arg(long)]
        parts_file: Option<PathBuf>,

        /// Also export the estimate to this Excel file
        #[arg(long)]
        xlsx: Option<PathBuf>,
    },

    /// List known part names (union of painting and labour columns)
    Parts,

    /// List selectable makers, models, years, cities and paint types
    Options {
        /// Narrow models to this maker
        #[arg(long)]
        maker: Option<String>,

        /// Narrow years to this model (requires --maker)
        #[arg(long)]
        model: Option<String>,
    },

    /// Load the rate tables and report what was found
    Check,

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set the rate table directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Set the unit rate
        #[arg(long)]
        set_unit_rate: Option<f64>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

/// Parse `NAME` or `NAME=DISCOUNT`; a non-numeric discount becomes 0
pub fn parse_part_arg(s: &str) -> Result<LineItemInput, String> {
    match s.rsplit_once('=') {
        Some((part, discount)) => Ok(LineItemInput::parse(part, discount)),
        None => Ok(LineItemInput::new(s, 0.0)),
    }
}
