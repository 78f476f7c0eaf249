use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::app::View;

fn default_fetch_delay_ms() -> u64 {
    800
}

fn default_currency() -> String {
    "$".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Simulated latency of the vehicle lookup
    #[serde(default = "default_fetch_delay_ms")]
    pub fetch_delay_ms: u64,

    /// View shown at startup
    #[serde(default)]
    pub start_view: StartView,

    /// Raise a desktop notification when a booking is requested
    #[serde(default)]
    pub notifications: bool,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

/// Views that make sense to land on (the detail view needs a vehicle id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StartView {
    #[default]
    Home,
    Vehicles,
    Services,
    Materials,
}

impl From<StartView> for View {
    fn from(v: StartView) -> Self {
        match v {
            StartView::Home => View::Home,
            StartView::Vehicles => View::Vehicles,
            StartView::Services => View::Services,
            StartView::Materials => View::Materials,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fetch_delay_ms: default_fetch_delay_ms(),
            start_view: StartView::default(),
            notifications: false,
            currency_symbol: default_currency(),
        }
    }
}

impl AppConfig {
    /// Directory holding config.toml and theme.conf
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("autox"))
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(_) => return Ok(AppConfig::default()),
        };

        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match Self::parse(&content) {
                    Ok(config) => return Ok(config),
                    Err(e) => tracing::warn!("Failed to parse config: {}", e),
                },
                Err(e) => tracing::warn!("Failed to read config: {}", e),
            }
        }

        let config = AppConfig::default();
        if let Err(e) = config.save() {
            tracing::warn!("Could not write default config: {}", e);
        }
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self> {
        let mut config: AppConfig = toml::from_str(content)?;
        if config.currency_symbol.trim().is_empty() {
            config.currency_symbol = default_currency();
        }
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }

    /// Format a whole-unit amount with the configured currency symbol
    pub fn money(&self, amount: u64) -> String {
        format!("{}{}", self.currency_symbol, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            fetch_delay_ms: 250,
            start_view: StartView::Vehicles,
            notifications: true,
            currency_symbol: "€".to_string(),
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized = AppConfig::parse(&serialized).unwrap();

        assert_eq!(deserialized.fetch_delay_ms, 250);
        assert_eq!(deserialized.start_view, StartView::Vehicles);
        assert!(deserialized.notifications);
        assert_eq!(deserialized.money(12), "€12");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = AppConfig::parse("start_view = \"materials\"\ncurrency_symbol = \"\"\n").unwrap();

        assert_eq!(config.start_view, StartView::Materials);
        assert_eq!(config.fetch_delay(), Duration::from_millis(800));
        assert_eq!(config.currency_symbol, "$");
        assert!(!config.notifications);
    }
}
