//! Scoped access to the store.
//!
//! Every DAO operation runs through one of three helpers:
//!
//! - [`do_within_connection`]: acquire, run, release. Statements auto-commit.
//! - [`do_read_only`]: same, with `PRAGMA query_only` set on the session as a
//!   hint. Nothing relies on the hint for correctness.
//! - [`do_in_transaction`]: acquire, begin, run, commit, release. When the
//!   operation fails the transaction is rolled back and the operation's error
//!   is returned. Commit is never attempted after a failure and rollback is
//!   never attempted when `BEGIN` itself failed.
//!
//! The session is released on every path. Early returns drop it, and during a
//! panic the transaction guard rolls back and the connection closes on unwind.

use crate::db::data_source::DataSource;
use crate::libs::error::{Context, DaoResult};
use crate::libs::messages::Message;
use crate::{msg_debug, msg_warning};
use rusqlite::{Connection, Transaction};

/// A connection held for the duration of one DAO operation.
pub struct Session {
    conn: Connection,
}

impl Session {
    pub fn open<D: DataSource + ?Sized>(data_source: &D) -> DaoResult<Self> {
        let conn = data_source.get_connection().context(Message::ConnectionFailed)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Rejects writes for the rest of this session.
    pub fn set_read_only(&self) -> DaoResult<()> {
        self.conn
            .pragma_update(None, "query_only", true)
            .context(Message::ReadOnlyHintFailed)
    }

    /// Runs `op` inside a transaction: commit on `Ok`, roll back on `Err`.
    pub fn in_transaction<T, F>(&mut self, op: F) -> DaoResult<T>
    where
        F: FnOnce(&Transaction<'_>) -> DaoResult<T>,
    {
        let tx = self.conn.transaction().context(Message::TransactionBeginFailed)?;

        match op(&tx) {
            Ok(value) => {
                tx.commit().context(Message::TransactionCommitFailed)?;
                Ok(value)
            }
            Err(err) => {
                match tx.rollback() {
                    Ok(()) => msg_debug!(Message::TransactionRolledBack(err.to_string())),
                    // The operation's error wins over a failed rollback.
                    Err(rollback_err) => msg_warning!(Message::TransactionRollbackFailed(rollback_err.to_string())),
                }
                Err(err)
            }
        }
    }

    /// Closes the connection, logging instead of failing if SQLite refuses.
    pub fn close(self) {
        if let Err((_conn, err)) = self.conn.close() {
            msg_warning!(Message::ConnectionCloseFailed(err.to_string()));
        }
    }
}

pub fn do_within_connection<D, T, F>(data_source: &D, op: F) -> DaoResult<T>
where
    D: DataSource + ?Sized,
    F: FnOnce(&Connection) -> DaoResult<T>,
{
    let session = Session::open(data_source)?;
    let result = op(session.connection());
    session.close();
    result
}

pub fn do_read_only<D, T, F>(data_source: &D, op: F) -> DaoResult<T>
where
    D: DataSource + ?Sized,
    F: FnOnce(&Connection) -> DaoResult<T>,
{
    let session = Session::open(data_source)?;
    let result = session.set_read_only().and_then(|()| op(session.connection()));
    session.close();
    result
}

pub fn do_in_transaction<D, T, F>(data_source: &D, op: F) -> DaoResult<T>
where
    D: DataSource + ?Sized,
    F: FnOnce(&Transaction<'_>) -> DaoResult<T>,
{
    let mut session = Session::open(data_source)?;
    let result = session.in_transaction(op);
    session.close();
    result
}
