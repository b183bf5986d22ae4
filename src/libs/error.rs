//! The single error type returned by every DAO operation.
//!
//! Any failure, whether a missing identifier, a write that touched no rows, or
//! a native `rusqlite` error, surfaces as [`DaoError::OperationFailed`] with a
//! readable message and, when there is one, the underlying cause.

use crate::libs::messages::Message;
use std::error::Error as StdError;
use thiserror::Error;

pub type BoxedCause = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum DaoError {
    #[error("{message}")]
    OperationFailed {
        message: String,
        #[source]
        source: Option<BoxedCause>,
    },
}

pub type DaoResult<T> = Result<T, DaoError>;

impl DaoError {
    pub fn operation_failed(message: impl ToString) -> Self {
        DaoError::OperationFailed {
            message: message.to_string(),
            source: None,
        }
    }

    pub fn with_cause<E>(message: impl ToString, cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        DaoError::OperationFailed {
            message: message.to_string(),
            source: Some(Box::new(cause)),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            DaoError::OperationFailed { message, .. } => message,
        }
    }

    /// Returns the wrapped native error, if the failure came from the store.
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        match self {
            DaoError::OperationFailed { source, .. } => source.as_deref(),
        }
    }
}

/// Wraps native errors into [`DaoError::OperationFailed`], `anyhow::Context` style.
pub trait Context<T> {
    fn context(self, msg: Message) -> DaoResult<T>;

    fn with_context<F>(self, f: F) -> DaoResult<T>
    where
        F: FnOnce() -> Message;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context(self, msg: Message) -> DaoResult<T> {
        self.map_err(|e| DaoError::with_cause(msg, e))
    }

    fn with_context<F>(self, f: F) -> DaoResult<T>
    where
        F: FnOnce() -> Message,
    {
        self.map_err(|e| DaoError::with_cause(f(), e))
    }
}
