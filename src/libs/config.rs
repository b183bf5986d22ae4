//! Configuration for the SQLite connection provider.
//!
//! Settings live in `config.json` inside the platform data directory resolved
//! by [`DataStorage`]. A missing file is not an error: defaults are used, so a
//! fresh installation works without any setup.
//!
//! ## File Location
//!
//! - **Windows**: `%LOCALAPPDATA%\daolab\daolab\config.json`
//! - **macOS**: `~/Library/Application Support/daolab/daolab/config.json`
//! - **Linux**: `~/.local/share/daolab/daolab/config.json`
//!
//! The database path can also be overridden with `DAOLAB_DB_PATH`, either in
//! the environment or in a `.env` file in the working directory.
//!
//! ```rust,no_run
//! use daolab::libs::config::Config;
//!
//! let mut config = Config::read()?;
//! config.database.busy_timeout_ms = 10_000;
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_debug;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable overriding the database file location.
pub const DB_PATH_ENV: &str = "DAOLAB_DB_PATH";

/// Connection settings applied to every connection the data source opens.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database file name inside the data directory.
    pub file_name: String,

    /// Whether `PRAGMA foreign_keys` is enabled.
    ///
    /// Cascading comment deletion and the photo reference check on new
    /// comments rely on it, so turning it off changes DAO behavior.
    pub foreign_keys: bool,

    /// How long a connection waits on a locked database, in milliseconds.
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            file_name: "daolab.db".to_string(),
            foreign_keys: true,
            busy_timeout_ms: 5000,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
}

impl Config {
    /// Reads `config.json`, falling back to defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            msg_debug!(Message::ConfigFileNotFound(config_file_path.display().to_string()));
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(&config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        msg_debug!(Message::ConfigLoaded(config_file_path.display().to_string()));
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(&config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        msg_debug!(Message::ConfigSaved(config_file_path.display().to_string()));
        Ok(())
    }

    /// Resolves the database file path.
    ///
    /// `DAOLAB_DB_PATH` (environment or `.env`) wins over the configured file
    /// name in the data directory.
    pub fn database_path(&self) -> Result<PathBuf> {
        dotenv::dotenv().ok();

        if let Ok(path) = env::var(DB_PATH_ENV) {
            if !path.trim().is_empty() {
                msg_debug!(Message::DatabasePathOverridden(path.clone()));
                return Ok(PathBuf::from(path));
            }
        }

        DataStorage::new().get_path(&self.database.file_name)
    }
}
