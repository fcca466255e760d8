//! Domain model types

pub mod canonical;
pub mod classification;
pub mod estimate;
pub mod rate_table;
pub mod raw_table;
pub mod selection;
pub mod snapshot;

pub use canonical::{canonicalize, canonicalize_year};
pub use classification::PartClassification;
pub use estimate::{round2, Estimate, EstimateOutcome, EstimateTotals, LineItemInput, LineItemResult};
pub use rate_table::{RateRecord, RateTable, RowKey};
pub use raw_table::RawTable;
pub use selection::SelectionKey;
pub use snapshot::RateSnapshot;
