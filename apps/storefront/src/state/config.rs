//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`STOREFRONT_*`)
//! 2. Config file (`storefront.toml`)
//! 3. Defaults (this file)
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! store_name = "Corner Shop"
//! currency_symbol = "$"
//! sales_window_hours = 24
//! top_selling_limit = 5
//! seed = true
//! log_filter = "info,storefront=debug"
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use storefront_core::reporting;
use storefront_core::{DEFAULT_SALES_WINDOW_HOURS, DEFAULT_TOP_SELLING_LIMIT, MAX_SALES_WINDOW_HOURS};

/// Default `tracing` filter when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "info,storefront=debug";

/// Config file name inside the platform config directory.
const CONFIG_FILE_NAME: &str = "storefront.toml";

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `--config` / `STOREFRONT_CONFIG` named a file that is not there.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value was parsed but breaks a rule.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Shown in the shell banner and on the thank-you screen.
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Trailing window for the admin sales figure, in hours.
    pub sales_window_hours: i64,

    /// Rows in the top-selling report.
    pub top_selling_limit: usize,

    /// Load the sample catalog and coupon at startup.
    pub seed: bool,

    /// `tracing` filter directive. `RUST_LOG` wins when set.
    pub log_filter: String,
}

impl Default for ConfigState {
    /// Returns default configuration suitable for development.
    fn default() -> Self {
        ConfigState {
            store_name: "Storefront".to_string(),
            currency_symbol: "$".to_string(),
            sales_window_hours: DEFAULT_SALES_WINDOW_HOURS,
            top_selling_limit: DEFAULT_TOP_SELLING_LIMIT,
            seed: true,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ConfigState {
    /// Loads configuration: defaults, then file, then environment.
    ///
    /// An explicit `config_path` must exist. The platform default path is
    /// optional and silently skipped when absent.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path)),
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    debug!("No config file, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sales_window()?;
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::Invalid("store_name must not be empty".to_string()));
        }
        Ok(())
    }

    /// Applies `STOREFRONT_*` environment variables.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup.
    ///
    /// Values that fail to parse are logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("STOREFRONT_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(symbol) = lookup("STOREFRONT_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(hours) = lookup("STOREFRONT_SALES_WINDOW_HOURS") {
            match hours.parse() {
                Ok(hours) => self.sales_window_hours = hours,
                Err(_) => warn!(value = %hours, "Ignoring STOREFRONT_SALES_WINDOW_HOURS"),
            }
        }

        if let Some(limit) = lookup("STOREFRONT_TOP_SELLING_LIMIT") {
            match limit.parse() {
                Ok(limit) => self.top_selling_limit = limit,
                Err(_) => warn!(value = %limit, "Ignoring STOREFRONT_TOP_SELLING_LIMIT"),
            }
        }

        if let Some(seed) = lookup("STOREFRONT_SEED") {
            match seed.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.seed = true,
                "0" | "false" | "no" | "off" => self.seed = false,
                _ => warn!(value = %seed, "Ignoring STOREFRONT_SEED"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "storefront")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Sales window as a duration.
    pub fn sales_window(&self) -> Result<chrono::Duration, ConfigError> {
        reporting::sales_window(self.sales_window_hours).map_err(|_| {
            ConfigError::Invalid(format!(
                "sales_window_hours must be between 1 and {MAX_SALES_WINDOW_HOURS}, got {}",
                self.sales_window_hours
            ))
        })
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use storefront::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(1234), "$12.34");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        format!(
            "{}{}{}.{:02}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            (cents / 100).abs(),
            (cents % 100).abs()
        )
    }
}
