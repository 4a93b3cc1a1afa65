use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Environment variable prefix for every configuration key
pub const ENV_PREFIX: &str = "BOOKGRAPH_";

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Delimited file the catalogue is loaded from
    #[serde(default = "default_catalogue_path")]
    pub catalogue_path: PathBuf,

    /// Maximum number of books kept from the catalogue file
    #[serde(default = "default_max_books")]
    pub max_books: usize,

    /// Maximum number of registered users
    #[serde(default = "default_max_users")]
    pub max_users: usize,

    /// Bucket count of the user directory hash table
    #[serde(default = "default_user_buckets")]
    pub user_buckets: usize,

    /// Accept a second user with an id that is already registered.
    /// The newer record then shadows the older one on lookup.
    #[serde(default)]
    pub allow_duplicate_user_ids: bool,
}

fn default_catalogue_path() -> PathBuf {
    PathBuf::from("books.csv")
}

fn default_max_books() -> usize {
    1000
}

fn default_max_users() -> usize {
    100
}

fn default_user_buckets() -> usize {
    101
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalogue_path: default_catalogue_path(),
            max_books: default_max_books(),
            max_users: default_max_users(),
            user_buckets: default_user_buckets(),
            allow_duplicate_user_ids: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::prefixed(ENV_PREFIX)
            .from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the data structures cannot work with
    pub fn validate(&self) -> AppResult<()> {
        if self.max_books == 0 {
            return Err(AppError::Config("max_books must be positive".to_string()));
        }
        if self.user_buckets == 0 {
            return Err(AppError::Config(
                "user_buckets must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
