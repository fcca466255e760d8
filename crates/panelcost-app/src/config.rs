//! Configuration management for panelcost
//!
//! Config stored at: ~/.config/panelcost/config.json

use std::path::{Path, PathBuf};

use panelcost_domain::service::{EngineConfig, DEFAULT_UNIT_RATE};
use panelcost_infra::persistence::DataFiles;
use panelcost_types::{ConfigError, OutputFormat, Result};
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the rate tables (defaults to the platform data dir)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Conversion applied to labour units for tinkering and R&R
    #[serde(default = "default_unit_rate")]
    pub unit_rate: f64,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// File names of the source tables
    #[serde(default)]
    pub files: DataFiles,
}

fn default_unit_rate() -> f64 {
    DEFAULT_UNIT_RATE
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            unit_rate: default_unit_rate(),
            output_format: default_output_format(),
            files: DataFiles::default(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("panelcost");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Directory the rate tables are read from
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join("panelcost");
        Ok(data_dir)
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            unit_rate: self.unit_rate,
        }
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        if !self.unit_rate.is_finite() || self.unit_rate < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "unit rate must be a non-negative number, got {}",
                self.unit_rate
            ))
            .into());
        }
        Ok(())
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Panelcost Configuration")?;
        writeln!(f, "=======================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Data dir:       {}",
            self.data_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Unit rate:      {}", self.unit_rate)?;
        writeln!(f, "Output format:  {}", self.output_format)?;
        writeln!(f, "Painting file:  {}", self.files.painting)?;
        writeln!(f, "Labour file:    {}", self.files.labour)?;
        writeln!(f, "Tinkering file: {}", self.files.tinkering)?;
        writeln!(f, "R&R file:       {}", self.files.rnr)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}
