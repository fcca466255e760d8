//! Repository trait definitions for rate data sources

use panelcost_types::Error;

use crate::model::RateSnapshot;

/// Source of rate snapshots (files, databases, fixtures)
pub trait RateSnapshotRepository {
    /// Load and validate a complete snapshot
    fn load_snapshot(&self) -> Result<RateSnapshot, Error>;

    /// Short human-readable description of where the data comes from
    fn describe(&self) -> String;
}
