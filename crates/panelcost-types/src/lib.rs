//! Core types for body-repair cost estimation

mod error;
mod tier;

pub use error::*;
pub use tier::GarageTier;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Output format for results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// The four source tables an estimate is built from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Painting,
    Labour,
    Tinkering,
    RemoveRefit,
}

impl TableKind {
    pub fn label(&self) -> &'static str {
        match self {
            TableKind::Painting => "PAINTING",
            TableKind::Labour => "LABOUR",
            TableKind::Tinkering => "TINKERING",
            TableKind::RemoveRefit => "R&R",
        }
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
