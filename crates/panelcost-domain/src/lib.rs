//! Domain layer: canonical rate data, part classifications, and the estimate engine

pub mod model;
pub mod repository;
pub mod service;

pub use model::*;
pub use repository::RateSnapshotRepository;
