use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TrackerError};
use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::store::{FileStore, InvestmentStore, MemoryStore};
use crate::validation::ValidationLimits;

pub const DEFAULT_PORT: u16 = 3000;

/// where the history lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StorageConfig {
    Memory,
    File { path: PathBuf },
}

/// tracker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    pub listen_addr: String,
    pub storage: StorageConfig,
    pub history_limit: usize,
    pub limits: ValidationLimits,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            listen_addr: format!("0.0.0.0:{}", DEFAULT_PORT),
            storage: StorageConfig::Memory,
            history_limit: DEFAULT_HISTORY_LIMIT,
            limits: ValidationLimits::default(),
        }
    }
}

impl TrackerConfig {
    /// build from process environment variables, after loading any `.env` file
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// build from any key lookup, falling back to defaults for unset keys.
    ///
    /// Keys: `INTEREST_TRACKER_ADDR` (or `PORT` for `0.0.0.0:<port>`),
    /// `INTEREST_TRACKER_DATA`, `INTEREST_TRACKER_HISTORY_LIMIT`,
    /// `INTEREST_TRACKER_MIN_PRINCIPAL`, `INTEREST_TRACKER_MAX_RATE`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup("INTEREST_TRACKER_ADDR") {
            config.listen_addr = addr;
        } else if let Some(port) = lookup("PORT") {
            let port: u16 = parse_value("PORT", &port)?;
            config.listen_addr = format!("0.0.0.0:{}", port);
        }

        if let Some(path) = lookup("INTEREST_TRACKER_DATA") {
            config.storage = StorageConfig::File { path: PathBuf::from(path) };
        }
        if let Some(limit) = lookup("INTEREST_TRACKER_HISTORY_LIMIT") {
            config.history_limit = parse_value("INTEREST_TRACKER_HISTORY_LIMIT", &limit)?;
        }
        if let Some(min) = lookup("INTEREST_TRACKER_MIN_PRINCIPAL") {
            config.limits.min_principal = parse_value::<Decimal>("INTEREST_TRACKER_MIN_PRINCIPAL", &min)?;
        }
        if let Some(max) = lookup("INTEREST_TRACKER_MAX_RATE") {
            config.limits.max_monthly_rate = parse_value::<Decimal>("INTEREST_TRACKER_MAX_RATE", &max)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.history_limit == 0 {
            return Err(TrackerError::InvalidConfiguration {
                message: "history limit must be at least 1".to_string(),
            });
        }
        if self.limits.min_principal <= Decimal::ZERO {
            return Err(TrackerError::InvalidConfiguration {
                message: format!("minimum principal must be positive, got {}", self.limits.min_principal),
            });
        }
        if self.limits.max_monthly_rate < Decimal::ZERO {
            return Err(TrackerError::InvalidConfiguration {
                message: format!("maximum rate cannot be negative, got {}", self.limits.max_monthly_rate),
            });
        }
        Ok(())
    }

    /// open the configured store
    pub fn open_store(&self) -> Result<Box<dyn InvestmentStore>> {
        self.validate()?;
        Ok(match &self.storage {
            StorageConfig::Memory => Box::new(MemoryStore::new(self.history_limit)),
            StorageConfig::File { path } => Box::new(FileStore::open(path, self.history_limit)?),
        })
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| TrackerError::InvalidConfiguration {
        message: format!("{}={}: {}", key, raw, e),
    })
}
