//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `homedash.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::str::FromStr;

use serde::Deserialize;

use homedash_app::services::weather_service::WeatherPolicy;
use homedash_domain::catalog::DEFAULT_ROOM;
use homedash_domain::preferences::{TemperatureUnit, Theme};
use homedash_domain::weather::DEFAULT_CITY;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// What the dashboard shows at startup.
    pub dashboard: DashboardConfig,
    /// Weather refresh settings.
    pub weather: WeatherConfig,
    /// Event bus settings.
    pub events: EventsConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Startup selection and preferences.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Room selected at startup.
    pub initial_room: String,
    pub temperature_unit: TemperatureUnit,
    pub theme: Theme,
    /// City whose weather is fetched at startup.
    pub city: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// How overlapping fetches are reconciled.
    pub policy: WeatherPolicy,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    /// Broadcast channel capacity.
    pub capacity: usize,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `homedash.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if a
    /// value (from the file or the environment) is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("homedash.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    /// Apply overrides read through `lookup`, usually the process environment.
    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = lookup("HOMEDASH_ROOM") {
            self.dashboard.initial_room = val;
        }
        if let Some(val) = lookup("HOMEDASH_UNIT") {
            self.dashboard.temperature_unit = parse_env("HOMEDASH_UNIT", &val)?;
        }
        if let Some(val) = lookup("HOMEDASH_THEME") {
            self.dashboard.theme = parse_env("HOMEDASH_THEME", &val)?;
        }
        if let Some(val) = lookup("HOMEDASH_CITY") {
            self.dashboard.city = val;
        }
        if let Some(val) = lookup("HOMEDASH_WEATHER_POLICY") {
            self.weather.policy = parse_env("HOMEDASH_WEATHER_POLICY", &val)?;
        }
        if let Some(val) = lookup("HOMEDASH_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.events.capacity == 0 {
            return Err(ConfigError::Validation(
                "event capacity must be non-zero".to_string(),
            ));
        }
        if self.dashboard.city.trim().is_empty() {
            return Err(ConfigError::Validation("city must not be empty".to_string()));
        }
        Ok(())
    }
}

fn parse_env<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|err: T::Err| ConfigError::Validation(format!("{key}: {err}")))
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            initial_room: DEFAULT_ROOM.to_string(),
            temperature_unit: TemperatureUnit::default(),
            theme: Theme::default(),
            city: DEFAULT_CITY.to_string(),
        }
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self { capacity: 64 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "homedash=info,homedash_app=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
