//! Runtime configuration resolved from environment variables.
//!
//! # Invariants
//! - Blank variables fall back to defaults.
//! - `bcrypt_cost` is always within bcrypt's accepted range.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "RECIPEBOOK_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "RECIPEBOOK_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "RECIPEBOOK_LOG_DIR";
pub const ENV_BCRYPT_COST: &str = "RECIPEBOOK_BCRYPT_COST";

const DEFAULT_DB_FILE_NAME: &str = "recipebook.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "recipebook-logs";
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidBcryptCost(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBcryptCost(value) => write!(
                f,
                "{ENV_BCRYPT_COST}=`{value}` must be an integer in {MIN_BCRYPT_COST}..={MAX_BCRYPT_COST}"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Settings shared by every front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
    pub bcrypt_cost: u32,
}

impl AppConfig {
    /// Resolves configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through `lookup`, which maps a variable name
    /// to its raw value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = read(ENV_DB_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
        let log_level = read(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string());
        let log_dir = read(ENV_LOG_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME));
        let bcrypt_cost = match read(ENV_BCRYPT_COST) {
            None => bcrypt::DEFAULT_COST,
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|cost| (MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(cost))
                .ok_or(ConfigError::InvalidBcryptCost(raw))?,
        };

        Ok(Self {
            db_path,
            log_level,
            log_dir,
            bcrypt_cost,
        })
    }
}
