//! Configuration structures
//!
//! Every section is fully defaulted so partial JSON/TOML files and empty
//! environments still produce a usable configuration.

use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_DELETE_ALL_PHRASE, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_TIMEZONE,
    SEARCH_DEBOUNCE_MS,
};
use crate::errors::{AgendaError, Result};

/// Root application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgendaConfig {
    pub backend: BackendConfig,
    pub sync: SyncSettings,
    pub display: DisplayConfig,
}

/// Where the REST backend lives and how long to wait for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Behaviour knobs for the synchronizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// Quiescence window for client search, in milliseconds.
    pub search_debounce_ms: u64,
    /// Phrase that must be typed verbatim to delete every appointment.
    pub delete_all_phrase: String,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            search_debounce_ms: SEARCH_DEBOUNCE_MS,
            delete_all_phrase: DEFAULT_DELETE_ALL_PHRASE.to_string(),
        }
    }
}

impl SyncSettings {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

/// Presentation settings applied at the edges only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// IANA time zone used to read and print wall-clock times.
    pub timezone: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { timezone: DEFAULT_TIMEZONE.to_string() }
    }
}

impl DisplayConfig {
    /// Parse the configured zone.
    ///
    /// # Errors
    /// Returns `AgendaError::Config` for unknown zone names.
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| AgendaError::Config(format!("Invalid timezone '{}': {}", self.timezone, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let config = AgendaConfig::default();
        assert_eq!(config.sync.search_debounce(), Duration::from_millis(300));
        assert_eq!(config.backend.timeout(), Duration::from_secs(30));
        assert_eq!(config.display.tz().unwrap(), chrono_tz::America::Sao_Paulo);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: AgendaConfig =
            serde_json::from_str(r#"{ "backend": { "base_url": "http://api.local" } }"#).unwrap();
        assert_eq!(config.backend.base_url, "http://api.local");
        assert_eq!(config.backend.timeout_secs, DEFAULT_HTTP_TIMEOUT_SECS);
        assert_eq!(config.sync, SyncSettings::default());
    }

    #[test]
    fn unknown_timezone_is_a_config_error() {
        let display = DisplayConfig { timezone: "Mars/Olympus".into() };
        assert!(matches!(display.tz(), Err(AgendaError::Config(_))));
    }
}
