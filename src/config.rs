use crate::error::ConfigError;
use serde::Deserialize;
use std::time::Duration;

// Aggregator configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    pub crazy_air_url: String,
    pub tough_jet_url: String,
    // Upper bound on a single supplier call, including body download
    pub supplier_timeout_ms: u64,
    pub connect_timeout_ms: u64,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            crazy_air_url: "http://localhost:8095/crazyair/search".to_string(),
            tough_jet_url: "http://localhost:8095/toughjet/search".to_string(),
            supplier_timeout_ms: 5000,
            connect_timeout_ms: 1000,
        }
    }
}

impl AggregatorConfig {
    pub const CRAZY_AIR_URL_VAR: &'static str = "CRAZYAIR_URL";
    pub const TOUGH_JET_URL_VAR: &'static str = "TOUGHJET_URL";
    pub const SUPPLIER_TIMEOUT_VAR: &'static str = "SUPPLIER_TIMEOUT_MS";
    pub const CONNECT_TIMEOUT_VAR: &'static str = "CONNECT_TIMEOUT_MS";

    /// Reads overrides from the process environment on top of the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup(Self::CRAZY_AIR_URL_VAR) {
            config.crazy_air_url = url;
        }
        if let Some(url) = lookup(Self::TOUGH_JET_URL_VAR) {
            config.tough_jet_url = url;
        }
        if let Some(raw) = lookup(Self::SUPPLIER_TIMEOUT_VAR) {
            config.supplier_timeout_ms = parse_millis(Self::SUPPLIER_TIMEOUT_VAR, raw)?;
        }
        if let Some(raw) = lookup(Self::CONNECT_TIMEOUT_VAR) {
            config.connect_timeout_ms = parse_millis(Self::CONNECT_TIMEOUT_VAR, raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.crazy_air_url.trim().is_empty() {
            return Err(ConfigError::MissingUrl("crazy_air_url"));
        }
        if self.tough_jet_url.trim().is_empty() {
            return Err(ConfigError::MissingUrl("tough_jet_url"));
        }
        if self.supplier_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "supplier_timeout_ms",
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    pub fn supplier_timeout(&self) -> Duration {
        Duration::from_millis(self.supplier_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

fn parse_millis(key: &'static str, raw: String) -> Result<u64, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value: raw })
}
