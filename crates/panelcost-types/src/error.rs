//! Error types for panelcost

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::TableKind;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Invalid configuration value: {0}")]
    Invalid(String),
}

/// Machine-checkable category of an estimate failure
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    SchemaError,
    NoMatch,
    InvalidInput,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::SchemaError => write!(f, "schema_error"),
            ErrorCategory::NoMatch => write!(f, "no_match"),
            ErrorCategory::InvalidInput => write!(f, "invalid_input"),
        }
    }
}

/// Failures raised while building rate tables or resolving an estimate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimateError {
    #[error("Missing column '{column}' in {table} table")]
    Schema { table: TableKind, column: String },

    #[error("No matching data found in {} table(s) for the selected inputs", join_tables(.tables))]
    NoMatch { tables: Vec<TableKind> },

    #[error("Selection field '{0}' is not set")]
    MissingField(&'static str),
}

impl EstimateError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EstimateError::Schema { .. } => ErrorCategory::SchemaError,
            EstimateError::NoMatch { .. } => ErrorCategory::NoMatch,
            EstimateError::MissingField(_) => ErrorCategory::InvalidInput,
        }
    }
}

fn join_tables(tables: &[TableKind]) -> String {
    tables
        .iter()
        .map(|t| t.label())
        .collect::<Vec<_>>()
        .join(" and ")
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Estimate(#[from] EstimateError),

    #[error("Data loading error: {0}")]
    Loader(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Excel export error: {0}")]
    Excel(String),
}

impl Error {
    /// Category of the underlying estimate failure, if any
    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            Error::Estimate(e) => Some(e.category()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
