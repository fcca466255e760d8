//! Infrastructure layer - CSV ingestion and file-based rate repositories

pub mod csv_loader;
pub mod persistence;

pub use csv_loader::LoaderError;
