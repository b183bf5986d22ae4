//! Logging and error macros built on top of [`Message`](super::Message).
//!
//! All log output goes through `tracing`; the library never prints to the
//! terminal itself. Whether anything is shown is decided by the subscriber
//! the caller installs (see [`crate::libs::logging::init`]).
//!
//! ## Macro Categories
//!
//! - **`msg_debug!`**, **`msg_info!`**, **`msg_warning!`**, **`msg_error!`**:
//!   emit a message at the matching level with a short prefix
//! - **`op_failed!`**: build a [`DaoError::OperationFailed`](crate::libs::error::DaoError)
//!   from a message
//! - **`bail_op_failed!`**: early return with that error
//!
//! ```rust
//! use daolab::{msg_debug, op_failed};
//! use daolab::libs::messages::Message;
//!
//! msg_debug!(Message::ProductSaved(42));
//! let err = op_failed!(Message::ProductNotFound(5));
//! assert_eq!(err.to_string(), "Product with id = 5 does not exist");
//! ```

use std::sync::OnceLock;

/// Cached result of the debug-mode environment check.
static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// Returns `true` when `DAOLAB_DEBUG` or `RUST_LOG` is set.
///
/// The check runs once per process; later calls read the cached value.
#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var("DAOLAB_DEBUG").is_ok() || std::env::var("RUST_LOG").is_ok())
}

/// Logs a message at debug level with a 🔍 prefix.
#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        $crate::tracing::debug!("🔍 {}", $msg)
    };
}

/// Logs a message at info level with an ℹ️ prefix.
#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        $crate::tracing::info!("ℹ️ {}", $msg)
    };
}

/// Logs a message at warn level with a ⚠️ prefix.
#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        $crate::tracing::warn!("⚠️ {}", $msg)
    };
}

/// Logs a message at error level with a ❌ prefix.
#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        $crate::tracing::error!("❌ {}", $msg)
    };
}

/// Creates a `DaoError::OperationFailed` carrying the message and no cause.
///
/// ```rust
/// use daolab::op_failed;
/// use daolab::libs::messages::Message;
///
/// let err = op_failed!(Message::ProductIdNull);
/// assert!(err.to_string().contains("cannot be null"));
/// ```
#[macro_export]
macro_rules! op_failed {
    ($msg:expr) => {
        $crate::libs::error::DaoError::operation_failed($msg)
    };
}

/// Returns early with `op_failed!(msg)`.
#[macro_export]
macro_rules! bail_op_failed {
    ($msg:expr) => {
        return Err($crate::op_failed!($msg))
    };
}
