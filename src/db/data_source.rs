//! Connection provisioning.
//!
//! DAOs depend only on [`DataSource`]: they acquire a connection at the start
//! of an operation and drop it before returning. [`SqliteDataSource`] is the
//! file-backed implementation; it opens a new connection for every acquire and
//! applies the configured pragmas to it.

use crate::db::migrations::init_with_migrations;
use crate::libs::config::{Config, DatabaseConfig};
use anyhow::Result;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Supplies ready-to-use database connections.
pub trait DataSource {
    fn get_connection(&self) -> rusqlite::Result<Connection>;
}

impl<T: DataSource + ?Sized> DataSource for &T {
    fn get_connection(&self) -> rusqlite::Result<Connection> {
        (**self).get_connection()
    }
}

impl<T: DataSource + ?Sized> DataSource for Arc<T> {
    fn get_connection(&self) -> rusqlite::Result<Connection> {
        (**self).get_connection()
    }
}

#[derive(Debug, Clone)]
pub struct SqliteDataSource {
    path: PathBuf,
    config: DatabaseConfig,
}

impl SqliteDataSource {
    /// Builds a data source from the user configuration and brings the schema
    /// up to date.
    pub fn new() -> Result<Self> {
        let config = Config::read()?;
        let path = config.database_path()?;
        Self::open(path, config.database)
    }

    /// Opens the database at `path` and applies pending migrations.
    pub fn open(path: impl Into<PathBuf>, config: DatabaseConfig) -> Result<Self> {
        let data_source = Self::new_without_migrations(path, config);
        let mut conn = data_source.get_connection()?;
        init_with_migrations(&mut conn)?;
        Ok(data_source)
    }

    pub fn new_without_migrations(path: impl Into<PathBuf>, config: DatabaseConfig) -> Self {
        Self { path: path.into(), config }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }
}

impl DataSource for SqliteDataSource {
    fn get_connection(&self) -> rusqlite::Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.pragma_update(None, "foreign_keys", self.config.foreign_keys)?;
        conn.busy_timeout(Duration::from_millis(self.config.busy_timeout_ms))?;
        Ok(conn)
    }
}
