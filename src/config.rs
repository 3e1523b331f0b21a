//! Engine configuration
//!
//! A small JSON file selects the time zone used for day and month
//! boundaries and the default dashboard window. Every field is optional;
//! command line flags override whatever the file says.

use std::fs;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analytics::{DEFAULT_RANGE_DAYS, MAX_RANGE_DAYS};
use crate::calendar::ZonedCalendar;

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unknown time zone: {0}")]
    InvalidTimeZone(String),

    #[error("Range must be between 1 and {max} days, got {days}")]
    InvalidRangeDays { days: u32, max: u32 },
}

/// Settings shared by the engine and the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// IANA zone name such as "Europe/Berlin"
    pub timezone: String,
    /// Dashboard window length in days
    pub range_days: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            range_days: DEFAULT_RANGE_DAYS,
        }
    }
}

impl EngineConfig {
    /// Default location: `<config dir>/habit_tracker/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("habit_tracker");
            p.push("config.json");
            p
        })
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load the given file, or the default file if it exists, or defaults
    ///
    /// An explicitly named file must exist; a missing default file is fine.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(default) if default.exists() => Self::load(&default),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Check every field
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.time_zone()?;
        if self.range_days == 0 || self.range_days > MAX_RANGE_DAYS {
            return Err(ConfigError::InvalidRangeDays {
                days: self.range_days,
                max: MAX_RANGE_DAYS,
            });
        }
        Ok(())
    }

    /// Parsed time zone
    pub fn time_zone(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .trim()
            .parse::<Tz>()
            .map_err(|_| ConfigError::InvalidTimeZone(self.timezone.clone()))
    }

    /// Calendar for the configured zone
    pub fn calendar(&self) -> Result<ZonedCalendar<Tz>, ConfigError> {
        Ok(ZonedCalendar::new(self.time_zone()?))
    }
}
