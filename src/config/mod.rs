//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/dine-scout/config.toml
//!
//! The provider credential can also be supplied through the
//! `GOOGLE_MAPS_API_KEY` environment variable, which wins over the file.

pub mod defaults;

use crate::constants::api::API_KEY_ENV;
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default values for queries
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Provider endpoints and behaviour
    #[serde(default)]
    pub provider: ProviderConfig,

    /// API keys for external services
    #[serde(default)]
    pub api_keys: ApiKeysConfig,
}

/// Default values for queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default search radius in meters
    #[serde(default = "default_radius")]
    pub radius: u32,

    /// Default category token (e.g. "restaurant", "thai_restaurant")
    #[serde(default = "default_category")]
    pub category: String,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,

    /// Card photo width requested from the photo endpoint
    #[serde(default = "default_card_width")]
    pub card_width: u32,

    /// Card photo height requested from the photo endpoint
    #[serde(default = "default_card_height")]
    pub card_height: u32,

    /// Maximum number of results requested per search
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

/// Provider endpoints and behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the places (new) API
    #[serde(default = "default_places_url")]
    pub places_url: String,

    /// Base URL of the legacy places web service
    #[serde(default = "default_legacy_url")]
    pub legacy_url: String,

    /// Base URL of the geocoding web service
    #[serde(default = "default_geocode_url")]
    pub geocode_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// When false, every query goes straight to the legacy entry point
    #[serde(default = "default_true")]
    pub use_modern_api: bool,
}

/// API keys for external services
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiKeysConfig {
    /// Maps/places credential
    #[serde(default)]
    pub google: String,
}

// Default value functions for serde
fn default_radius() -> u32 {
    DEFAULT_RADIUS
}
fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_card_width() -> u32 {
    DEFAULT_CARD_WIDTH
}
fn default_card_height() -> u32 {
    DEFAULT_CARD_HEIGHT
}
fn default_max_results() -> u32 {
    DEFAULT_MAX_RESULTS
}
fn default_places_url() -> String {
    DEFAULT_PLACES_URL.to_string()
}
fn default_legacy_url() -> String {
    DEFAULT_LEGACY_URL.to_string()
}
fn default_geocode_url() -> String {
    DEFAULT_GEOCODE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_true() -> bool {
    true
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            category: default_category(),
            format: default_format(),
            card_width: default_card_width(),
            card_height: default_card_height(),
            max_results: default_max_results(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            places_url: default_places_url(),
            legacy_url: default_legacy_url(),
            geocode_url: default_geocode_url(),
            timeout_secs: default_timeout_secs(),
            use_modern_api: default_true(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// The provider credential, if any
    ///
    /// `GOOGLE_MAPS_API_KEY` takes precedence over `api_keys.google`.
    pub fn api_key(&self) -> Option<String> {
        self.resolve_api_key(std::env::var(API_KEY_ENV).ok())
    }

    fn resolve_api_key(&self, from_env: Option<String>) -> Option<String> {
        from_env
            .filter(|key| !key.trim().is_empty())
            .or_else(|| Some(self.api_keys.google.clone()))
            .filter(|key| !key.trim().is_empty())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "radius"] => Some(self.defaults.radius.to_string()),
            ["defaults", "category"] => Some(self.defaults.category.clone()),
            ["defaults", "format"] => Some(self.defaults.format.clone()),
            ["defaults", "card_width"] => Some(self.defaults.card_width.to_string()),
            ["defaults", "card_height"] => Some(self.defaults.card_height.to_string()),
            ["defaults", "max_results"] => Some(self.defaults.max_results.to_string()),

            ["provider", "places_url"] => Some(self.provider.places_url.clone()),
            ["provider", "legacy_url"] => Some(self.provider.legacy_url.clone()),
            ["provider", "geocode_url"] => Some(self.provider.geocode_url.clone()),
            ["provider", "timeout_secs"] => Some(self.provider.timeout_secs.to_string()),
            ["provider", "use_modern_api"] => Some(self.provider.use_modern_api.to_string()),

            ["api_keys", "google"] => Some(self.api_keys.google.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "radius"] => {
                self.defaults.radius = parse_value(value, "radius")?;
            }
            ["defaults", "category"] => {
                self.defaults.category = value.to_string();
            }
            ["defaults", "format"] => {
                self.defaults.format = value.to_string();
            }
            ["defaults", "card_width"] => {
                self.defaults.card_width = parse_value(value, "width")?;
            }
            ["defaults", "card_height"] => {
                self.defaults.card_height = parse_value(value, "height")?;
            }
            ["defaults", "max_results"] => {
                self.defaults.max_results = parse_value(value, "max_results")?;
            }

            ["provider", "places_url"] => {
                self.provider.places_url = value.trim_end_matches('/').to_string();
            }
            ["provider", "legacy_url"] => {
                self.provider.legacy_url = value.trim_end_matches('/').to_string();
            }
            ["provider", "geocode_url"] => {
                self.provider.geocode_url = value.trim_end_matches('/').to_string();
            }
            ["provider", "timeout_secs"] => {
                self.provider.timeout_secs = parse_value(value, "timeout")?;
            }
            ["provider", "use_modern_api"] => {
                self.provider.use_modern_api = parse_value(value, "boolean")?;
            }

            ["api_keys", "google"] => {
                self.api_keys.google = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "defaults.radius",
            "defaults.category",
            "defaults.format",
            "defaults.card_width",
            "defaults.card_height",
            "defaults.max_results",
            "provider.places_url",
            "provider.legacy_url",
            "provider.geocode_url",
            "provider.timeout_secs",
            "provider.use_modern_api",
            "api_keys.google",
        ]
    }
}

fn parse_value<T: std::str::FromStr>(value: &str, what: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("Invalid {} value: {}", what, value)))
}
