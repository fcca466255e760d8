//! Application use cases

mod estimate_service;

pub use estimate_service::{DataCheckSummary, EstimateRequest, EstimateService, SelectionOptions};
