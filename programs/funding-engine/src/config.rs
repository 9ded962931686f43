//! Market configuration: which payoff transform each asset uses.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;
use crate::payoff::{PayoffTransform, MAX_DECIMAL_SHIFT};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketConfig {
    #[serde(default)]
    pub markets: Vec<MarketEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketEntry {
    pub asset: String,
    pub payoff: PayoffTransform,
}

impl MarketConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: MarketConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        info!(path = %path.display(), markets = config.markets.len(), "loaded market config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for entry in &self.markets {
            let asset = entry.asset.trim();
            if asset.is_empty() {
                return Err(ConfigError::EmptyAsset);
            }
            if !seen.insert(asset.to_ascii_lowercase()) {
                return Err(ConfigError::DuplicateAsset(asset.to_string()));
            }
            if let PayoffTransform::DecimalShift { decimals } = entry.payoff {
                if decimals.unsigned_abs() > MAX_DECIMAL_SHIFT {
                    return Err(ConfigError::InvalidDecimalShift {
                        asset: asset.to_string(),
                        decimals,
                    });
                }
            }
        }
        Ok(())
    }

    /// Asset lookup is case-insensitive.
    pub fn payoff_for(&self, asset: &str) -> Option<PayoffTransform> {
        self.markets
            .iter()
            .find(|entry| entry.asset.trim().eq_ignore_ascii_case(asset.trim()))
            .map(|entry| entry.payoff)
    }
}
