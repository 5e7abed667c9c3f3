//! Configuration loaded from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `GROUNDWORK_SEED_PATH` | bundled mock data |
//! | `GROUNDWORK_CURRENCY` | `USD` |
//! | `GROUNDWORK_MAX_DISPATCH_DEPTH` | `32` |
//! | `GROUNDWORK_LOG` | `info` (used when `RUST_LOG` is unset) |

use crate::error::ConfigError;
use groundwork_runtime::StoreConfig;
use std::path::PathBuf;

const SEED_PATH: &str = "GROUNDWORK_SEED_PATH";
const CURRENCY: &str = "GROUNDWORK_CURRENCY";
const MAX_DISPATCH_DEPTH: &str = "GROUNDWORK_MAX_DISPATCH_DEPTH";
const LOG: &str = "GROUNDWORK_LOG";

/// Workspace configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErpConfig {
    /// JSON seed file; `None` uses the bundled mock data
    pub seed_path: Option<PathBuf>,
    /// ISO 4217 code used when displaying amounts
    pub currency: String,
    /// Bound on effect feedback chains in every store
    pub max_dispatch_depth: usize,
    /// Log filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for ErpConfig {
    fn default() -> Self {
        Self {
            seed_path: None,
            currency: "USD".to_string(),
            max_dispatch_depth: StoreConfig::DEFAULT_MAX_DISPATCH_DEPTH,
            log_filter: "info".to_string(),
        }
    }
}

impl ErpConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set to an unusable
    /// value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value
    ///
    /// Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set to an unusable
    /// value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let currency = match get(CURRENCY) {
            Some(code) => parse_currency(&code)?,
            None => defaults.currency,
        };

        let max_dispatch_depth = match get(MAX_DISPATCH_DEPTH) {
            Some(raw) => parse_depth(&raw)?,
            None => defaults.max_dispatch_depth,
        };

        Ok(Self {
            seed_path: get(SEED_PATH).map(PathBuf::from),
            currency,
            max_dispatch_depth,
            log_filter: get(LOG).unwrap_or(defaults.log_filter),
        })
    }

    /// Store configuration derived from these settings
    #[must_use]
    pub const fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.max_dispatch_depth)
    }
}

fn parse_currency(code: &str) -> Result<String, ConfigError> {
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code.to_ascii_uppercase())
    } else {
        Err(ConfigError::Invalid {
            key: CURRENCY,
            value: code.to_string(),
            reason: "expected a three-letter currency code".to_string(),
        })
    }
}

fn parse_depth(raw: &str) -> Result<usize, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        key: MAX_DISPATCH_DEPTH,
        value: raw.to_string(),
        reason,
    };

    match raw.parse::<usize>() {
        Ok(0) => Err(invalid("must be at least 1".to_string())),
        Ok(depth) => Ok(depth),
        Err(e) => Err(invalid(e.to_string())),
    }
}
