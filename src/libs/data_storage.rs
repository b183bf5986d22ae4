//! Location of daolab's files on disk.
//!
//! The configuration file and, unless overridden, the database file live in
//! one per-user directory:
//!
//! - **Windows**: `%LOCALAPPDATA%\daolab\daolab`
//! - **macOS**: `~/Library/Application Support/daolab/daolab`
//! - **Linux**: `~/.local/share/daolab/daolab`
//!
//! When the relevant environment variable is missing the current directory is
//! used instead.

use anyhow::Result;
use std::env::consts::OS;
use std::env::var;
use std::fs;
use std::path::{Path, PathBuf};

pub const VENDOR_NAME: &str = "daolab";
pub const APP_NAME: &str = "daolab";

/// Per-user data directory.
#[derive(Clone, Debug)]
pub struct DataStorage {
    base_path: PathBuf,
}

impl DataStorage {
    pub fn new() -> Self {
        Self {
            base_path: platform_data_dir().join(VENDOR_NAME).join(APP_NAME),
        }
    }

    /// The directory itself; it may not exist yet.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Path of `file_name` inside the data directory.
    ///
    /// Creates the directory on first use so the caller can open the file
    /// straight away.
    pub fn get_path(&self, file_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.base_path)?;
        Ok(self.base_path.join(file_name))
    }
}

impl Default for DataStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn platform_data_dir() -> PathBuf {
    let home = || PathBuf::from(var("HOME").unwrap_or_else(|_| ".".into()));
    match OS {
        "windows" => PathBuf::from(var("LOCALAPPDATA").unwrap_or_else(|_| ".".into())),
        "macos" => home().join("Library").join("Application Support"),
        _ => home().join(".local").join("share"),
    }
}
