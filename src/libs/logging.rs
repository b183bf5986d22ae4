//! Tracing subscriber setup for applications and tests using the library.

use crate::libs::messages::macros::is_debug_mode;
use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber filtered by `RUST_LOG`.
///
/// Without `RUST_LOG` the level is `debug` when `DAOLAB_DEBUG` is set and
/// `warn` otherwise. Fails if a global subscriber is already installed, which
/// callers initializing from several places can ignore.
pub fn init() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if is_debug_mode() { "daolab=debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))
}
