//! Domain services

pub mod estimate_engine;
pub mod report;

pub use estimate_engine::{EngineConfig, EstimateEngine, DEFAULT_UNIT_RATE};
pub use report::generate_estimate_report;
