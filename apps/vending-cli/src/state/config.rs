//! # Configuration State
//!
//! Machine configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line flags (`--catalog`, `--strategy`)
//! 2. Environment variables (`VENDING_*`)
//! 3. Config file (`vending.toml`, or `--config <path>`)
//! 4. Defaults (this file)
//!
//! Configuration is read-only after initialization.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use vending_core::validation::validate_denominations;
use vending_core::{ChangeCalculator, ChangeError, ChangeStrategy, Coin, Money, ValidationError};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "vending.toml";

/// Environment variable prefix (`VENDING_CURRENCY`, `VENDING_CATALOG_PATH`, ...).
pub const ENV_PREFIX: &str = "VENDING";

/// Machine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Shown in the banner.
    pub machine_name: String,

    /// Currency label appended to amounts ("0.70EUR").
    pub currency: String,

    /// JSON catalog to load at startup.
    pub catalog_path: PathBuf,

    /// How change is picked from `coins`.
    pub change_strategy: ChangeStrategy,

    /// Accepted coins; change is paid from the same set.
    pub coins: Vec<CoinConfig>,
}

/// A coin as written in the config file. The value is a decimal string so
/// it is parsed exactly (`"0.10"`, not `0.1`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoinConfig {
    pub label: String,
    pub value: String,
}

impl Default for ConfigState {
    /// Euro machine reading `products.json`, greedy change.
    fn default() -> Self {
        let coins = [
            ("One Cent", "0.01"),
            ("Two Cents", "0.02"),
            ("Five Cents", "0.05"),
            ("Ten Cents", "0.10"),
            ("Twenty Cents", "0.20"),
            ("Fifty Cents", "0.50"),
            ("One Euro", "1.00"),
            ("Two Euro", "2.00"),
        ]
        .into_iter()
        .map(|(label, value)| CoinConfig {
            label: label.to_string(),
            value: value.to_string(),
        })
        .collect();

        ConfigState {
            machine_name: "The Vending Oasis".to_string(),
            currency: "EUR".to_string(),
            catalog_path: PathBuf::from("products.json"),
            change_strategy: ChangeStrategy::Greedy,
            coins,
        }
    }
}

impl ConfigState {
    /// Loads defaults, then the config file, then `VENDING_*` variables.
    ///
    /// An explicit `path` must exist; the default `vending.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false),
        };

        let config: ConfigState = Config::builder()
            .add_source(Config::try_from(&ConfigState::default())?)
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        config.coin_set()?;
        Ok(config)
    }

    /// Parses the configured coins.
    pub fn coin_set(&self) -> Result<Vec<Coin>, ConfigError> {
        let coins = self
            .coins
            .iter()
            .map(|c| {
                let value: Money = c.value.parse().map_err(|e| ConfigError::InvalidValue {
                    key: format!("coins.{}", c.label),
                    source: e,
                })?;
                Ok(Coin::new(c.label.clone(), value))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let values: Vec<Money> = coins.iter().map(|c| c.value).collect();
        validate_denominations(&values).map_err(|e| ConfigError::InvalidValue {
            key: "coins".to_string(),
            source: e,
        })?;

        Ok(coins)
    }

    /// Builds the change calculator for the configured coins and strategy.
    pub fn calculator(&self) -> Result<ChangeCalculator, ConfigError> {
        let values: Vec<Money> = self.coin_set()?.into_iter().map(|c| c.value).collect();
        Ok(ChangeCalculator::new(&values)?.with_strategy(self.change_strategy))
    }

    /// Formats an amount with the currency label, e.g. `1.30EUR`.
    pub fn format_currency(&self, amount: Money) -> String {
        format!("{}{}", amount, self.currency)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {key}: {source}")]
    InvalidValue {
        key: String,
        #[source]
        source: ValidationError,
    },

    #[error("Invalid coin set: {0}")]
    Coins(#[from] ChangeError),
}
