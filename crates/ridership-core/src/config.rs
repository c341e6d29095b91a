//! Dashboard configuration
//!
//! Read from `<config_dir>/ridership/config.toml` unless a path is given.
//! A missing file means defaults; a malformed one is an error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::calendar::HolidayCalendar;
use crate::context::EngineSettings;
use crate::error::CoreError;

const CONFIG_FILE: &str = "config.toml";
const APP_DIR: &str = "ridership";

/// User configuration for the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Dataset file (JSON array of daily records)
    pub data_path: Option<PathBuf>,

    /// Give weekday holidays their own band colour
    pub holiday_aware: bool,

    /// Card value transition length in milliseconds
    pub animation_ms: u64,

    /// Replaces the built-in holiday list (`DD.MM.YYYY` entries)
    pub holidays: Option<Vec<String>>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            holiday_aware: true,
            animation_ms: 500,
            holidays: None,
        }
    }
}

impl DashboardConfig {
    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from `path`, returning defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(CoreError::FileRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config: Self = toml::from_str(&content).map_err(|source| CoreError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        info!(path = %path.display(), "Loaded dashboard config");
        Ok(config)
    }

    /// Load from the default location, or defaults if there is none
    pub fn load_default() -> Result<Self, CoreError> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.animation_ms == 0 {
            return Err(CoreError::InvalidConfig {
                message: "animation_ms must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn settings(&self) -> EngineSettings {
        EngineSettings {
            holiday_aware: self.holiday_aware,
            animation_duration: Duration::from_millis(self.animation_ms),
        }
    }

    /// Configured holidays, or the built-in calendar
    pub fn calendar(&self) -> Result<HolidayCalendar, CoreError> {
        match &self.holidays {
            Some(list) => Ok(HolidayCalendar::from_strings(list)?),
            None => Ok(HolidayCalendar::georgian_2026()),
        }
    }
}
