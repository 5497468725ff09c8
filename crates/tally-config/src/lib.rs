//! # tally-config
//!
//! Layered configuration loading for Tally using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. `API_BASE` environment variable (maps to `treasury.api_base`)
//! 2. Environment variables (`TALLY_*` prefix, `__` as separator)
//! 3. Project-level `.tally/config.toml`
//! 4. User-level `~/.config/tally/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TALLY_TREASURY__TIMEOUT_SECS` -> `treasury.timeout_secs`,
//! `TALLY_QUOTES__DATA_PATH` -> `quotes.data_path`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use tally_config::TallyConfig;
//!
//! let config = TallyConfig::load_with_dotenv().expect("config");
//! println!("treasury API: {}", config.treasury.api_base);
//! ```

mod error;
mod general;
mod quotes;
mod treasury;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use quotes::QuotesConfig;
pub use treasury::{DEFAULT_API_BASE, TreasuryConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TallyConfig {
    #[serde(default)]
    pub treasury: TreasuryConfig,
    #[serde(default)]
    pub quotes: QuotesConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl TallyConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can add providers on top or extract directly.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".tally/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
            .merge(Env::prefixed("TALLY_").split("__"))
            .merge(
                Env::raw()
                    .only(&["API_BASE"])
                    .map(|_| "treasury.api_base".into()),
            )
    }

    /// Reject values the loaders cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.treasury.api_base.trim().is_empty() {
            return Err(invalid("treasury.api_base", "must not be empty"));
        }
        if self.treasury.timeout_secs == 0 {
            return Err(invalid("treasury.timeout_secs", "must be greater than zero"));
        }
        if self.quotes.swipe_threshold_px <= 0.0 {
            return Err(invalid("quotes.swipe_threshold_px", "must be positive"));
        }
        if self.quotes.swipe_velocity <= 0.0 {
            return Err(invalid("quotes.swipe_velocity", "must be positive"));
        }
        if self.general.default_denomination <= 0.0 {
            return Err(invalid("general.default_denomination", "must be positive"));
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tally").join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = TallyConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.treasury.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = TallyConfig::default();
        config.treasury.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "treasury.timeout_secs"));
    }

    #[test]
    fn blank_api_base_is_rejected() {
        let mut config = TallyConfig::default();
        config.treasury.api_base = "  ".into();
        assert!(config.validate().is_err());
    }
}
