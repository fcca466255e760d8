//! File-based implementation of RateSnapshotRepository
//!
//! Reads the four source tables as CSV files from one data directory.

use std::path::PathBuf;

use panelcost_domain::model::RateSnapshot;
use panelcost_domain::repository::RateSnapshotRepository;
use panelcost_types::Error;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::csv_loader::{read_part_list, read_raw_table};

/// File names of the source tables within the data directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFiles {
    #[serde(default = "default_painting")]
    pub painting: String,
    #[serde(default = "default_labour")]
    pub labour: String,
    #[serde(default = "default_tinkering")]
    pub tinkering: String,
    #[serde(default = "default_rnr")]
    pub rnr: String,
}

fn default_painting() -> String {
    "DATABASE_PAINT.csv".to_string()
}

fn default_labour() -> String {
    "DATABASE_LAB.csv".to_string()
}

fn default_tinkering() -> String {
    "TINKERING.csv".to_string()
}

fn default_rnr() -> String {
    "R&R.csv".to_string()
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            painting: default_painting(),
            labour: default_labour(),
            tinkering: default_tinkering(),
            rnr: default_rnr(),
        }
    }
}

/// Rate data read from CSV files in a directory
pub struct FileRateRepository {
    data_dir: PathBuf,
    files: DataFiles,
}

impl FileRateRepository {
    pub fn new(data_dir: PathBuf, files: DataFiles) -> Self {
        Self { data_dir, files }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }
}

impl RateSnapshotRepository for FileRateRepository {
    fn load_snapshot(&self) -> Result<RateSnapshot, Error> {
        let painting = read_raw_table(self.path(&self.files.painting))?;
        let labour = read_raw_table(self.path(&self.files.labour))?;
        let tinkering = read_part_list(self.path(&self.files.tinkering))?;
        let rnr = read_part_list(self.path(&self.files.rnr))?;

        let snapshot = RateSnapshot::from_raw(&painting, &labour, tinkering.as_slice(), rnr.as_slice())?;
        info!(
            data_dir = %self.data_dir.display(),
            painting_rows = snapshot.painting.len(),
            labour_rows = snapshot.labour.len(),
            tinkering_parts = snapshot.tinkering.len(),
            rnr_parts = snapshot.rnr.len(),
            "loaded rate snapshot"
        );
        Ok(snapshot)
    }

    fn describe(&self) -> String {
        self.data_dir.display().to_string()
    }
}
