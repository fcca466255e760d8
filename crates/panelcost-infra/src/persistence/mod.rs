//! Persistence implementations
//!
//! This module provides file-based implementations of the repository traits.

mod file_rate_repo;

pub use file_rate_repo::{DataFiles, FileRateRepository};
