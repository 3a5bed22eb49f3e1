//! Configuration loading and validation for the trade calculator.
//!
//! Uses serde_yaml to load YAML configuration files with support for
//! environment variable overrides of the fee rate.

mod app;
mod calculator;
mod error;

pub use app::AppConfig;
pub use calculator::{CalculatorConfig, MAX_DECIMAL_PLACES};
pub use error::ConfigError;

use serde::Deserialize;
use std::{env, fs, path::Path};

use crate::calculator::TradeCalculator;

/// Environment variable that overrides `calculator.fee_percent_per_side`.
pub const FEE_PERCENT_ENV: &str = "CALCULATOR_FEE_PERCENT";

/// Root configuration structure.
///
/// Both sections are optional; missing ones take their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Application-level settings like name and log level.
    #[serde(default)]
    pub app: AppConfig,
    /// Fee, rounding and validation settings.
    #[serde(default)]
    pub calculator: CalculatorConfig,
    /// Calculator built from `calculator` when the config is validated.
    #[serde(skip)]
    trade_calculator: TradeCalculator,
}

impl Config {
    /// Load configuration from a YAML file at the given path.
    ///
    /// First loads environment variables from `.env` file (if exists),
    /// then the YAML config, then applies `CALCULATOR_FEE_PERCENT`.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_string(),
            source,
        })?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        config.load_overrides_from_env();
        config.validate()?;

        Ok(config)
    }

    /// Like [`Config::load`], but falls back to defaults when the file is absent.
    pub fn load_or_default(path: &str) -> Result<Self, ConfigError> {
        if Path::new(path).exists() {
            return Self::load(path);
        }

        dotenvy::dotenv().ok();

        let mut config = Config::default();
        config.load_overrides_from_env();
        config.validate()?;

        Ok(config)
    }

    /// The calculator described by the `calculator` section, as built by
    /// [`Config::load`] or [`Config::load_or_default`].
    pub fn calculator(&self) -> TradeCalculator {
        self.trade_calculator
    }

    fn load_overrides_from_env(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Applies overrides using the given variable lookup.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(fee) = lookup(FEE_PERCENT_ENV) {
            if !fee.trim().is_empty() {
                self.calculator.fee_percent_per_side = Some(fee);
            }
        }
    }

    /// Validate the configuration and build its calculator.
    fn validate(&mut self) -> Result<(), ConfigError> {
        if self.app.name.is_empty() {
            return Err(ConfigError::invalid("app.name", "is required"));
        }

        if let Some(ref level) = self.app.log_level {
            if !matches!(
                level.as_str(),
                "trace" | "debug" | "info" | "warn" | "warning" | "error"
            ) {
                return Err(ConfigError::invalid(
                    "app.log_level",
                    format!("has unknown level {:?}", level),
                ));
            }
        }

        self.trade_calculator = self.calculator.build()?;

        Ok(())
    }
}
