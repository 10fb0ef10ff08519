//! Settings Module
//! Layered configuration: defaults, optional TOML file, then environment.

use chrono::NaiveDate;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// File picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "siteview.toml";

/// Environment prefix, e.g. `SITEVIEW__SERVER__BIND=0.0.0.0:8080`.
pub const ENV_PREFIX: &str = "SITEVIEW";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Config file not found: {0}")]
    Missing(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
    /// Longest accepted `/api` range, in days.
    pub max_range_days: i64,
    /// Seed for the random store; entropy when unset.
    pub seed: Option<u64>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
            max_range_days: 366 * 5,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub api_url: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:5000/api".to_string(),
        }
    }
}

/// Range used when a request or the dashboard does not name one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DateDefaults {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Default for DateDefaults {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2015, 1, 15).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub client: ClientSettings,
    pub defaults: DateDefaults,
    pub chart: ChartSettings,
}

impl Settings {
    /// Load settings.
    ///
    /// An explicit `path` must exist; otherwise `siteview.toml` is read if
    /// present. Environment variables override file values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::Missing(path.display().to_string()));
                }
                builder = builder.add_source(File::from(path));
            }
            None => {
                builder = builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false));
            }
        }

        let settings: Settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.defaults.start_date > self.defaults.end_date {
            return Err(ConfigError::Invalid(format!(
                "defaults.start_date {} is after defaults.end_date {}",
                self.defaults.start_date, self.defaults.end_date
            )));
        }
        if self.server.max_range_days < 1 {
            return Err(ConfigError::Invalid(
                "server.max_range_days must be at least 1".to_string(),
            ));
        }
        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(ConfigError::Invalid(
                "chart.width and chart.height must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
