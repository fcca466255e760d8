//! Repository adapters for the rate data source

use panelcost_infra::persistence::FileRateRepository;
use panelcost_types::{Error, Result};

use crate::catalog::RateCatalog;
use crate::config::Config;

/// Open the file-based rate repository configured in `config`
pub fn open_rate_repo(config: &Config) -> Result<FileRateRepository> {
    let data_dir = config.data_dir()?;
    if !data_dir.is_dir() {
        return Err(Error::FileNotFound(format!(
            "Data directory not found: {}",
            data_dir.display()
        )));
    }
    Ok(FileRateRepository::new(data_dir, config.files.clone()))
}

/// Open the rate catalog, loading the initial snapshot
pub fn open_catalog(config: &Config) -> Result<RateCatalog<FileRateRepository>> {
    RateCatalog::open(open_rate_repo(config)?)
}
