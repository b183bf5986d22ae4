#[cfg(test)]
mod tests {
    use daolab::db::data_source::{DataSource, SqliteDataSource};
    use daolab::db::session::{do_in_transaction, do_read_only, do_within_connection, Session};
    use daolab::libs::config::DatabaseConfig;
    use daolab::libs::error::{Context, DaoResult};
    use daolab::libs::logging;
    use daolab::libs::messages::Message;
    use daolab::op_failed;
    use std::panic::{self, AssertUnwindSafe};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    const INSERT_COMPANY: &str = "INSERT INTO company (name) VALUES (?1)";

    struct SessionTestContext {
        _temp_dir: TempDir,
        data_source: SqliteDataSource,
    }

    impl TestContext for SessionTestContext {
        fn setup() -> Self {
            let _ = logging::init();
            let temp_dir = tempfile::tempdir().unwrap();
            let data_source = SqliteDataSource::open(temp_dir.path().join("sessions.db"), DatabaseConfig::default()).unwrap();
            SessionTestContext {
                _temp_dir: temp_dir,
                data_source,
            }
        }
    }

    impl SessionTestContext {
        fn company_count(&self) -> i64 {
            let conn = self.data_source.get_connection().unwrap();
            conn.query_row("SELECT COUNT(*) FROM company", [], |row| row.get(0)).unwrap()
        }
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_transaction_commits_on_success(ctx: &mut SessionTestContext) {
        let id = do_in_transaction(&ctx.data_source, |tx| {
            tx.execute(INSERT_COMPANY, ["Acme"]).context(Message::CompanySaveFailed("Acme".into()))?;
            Ok(tx.last_insert_rowid())
        })
        .unwrap();

        assert!(id > 0);
        assert_eq!(ctx.company_count(), 1);
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_transaction_rolls_back_on_error(ctx: &mut SessionTestContext) {
        let result: DaoResult<()> = do_in_transaction(&ctx.data_source, |tx| {
            tx.execute(INSERT_COMPANY, ["Acme"]).context(Message::CompanySaveFailed("Acme".into()))?;
            Err(op_failed!(Message::CompanyNotFound(1)))
        });

        // The operation's own error is returned, not a rollback or commit error.
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Company with id = 1 does not exist");
        assert_eq!(ctx.company_count(), 0);
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_transaction_rolls_back_on_panic(ctx: &mut SessionTestContext) {
        let data_source = &ctx.data_source;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let _: DaoResult<()> = do_in_transaction(data_source, |tx| {
                tx.execute(INSERT_COMPANY, ["Acme"]).context(Message::CompanySaveFailed("Acme".into()))?;
                panic!("boom");
            });
        }));

        assert!(outcome.is_err());
        assert_eq!(ctx.company_count(), 0);
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_read_only_rejects_writes(ctx: &mut SessionTestContext) {
        let result = do_read_only(&ctx.data_source, |conn| {
            conn.execute(INSERT_COMPANY, ["Acme"]).context(Message::CompanySaveFailed("Acme".into()))
        });

        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Error saving company 'Acme'");
        assert!(err.cause().is_some());
        assert_eq!(ctx.company_count(), 0);
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_read_only_allows_reads(ctx: &mut SessionTestContext) {
        let count: i64 = do_read_only(&ctx.data_source, |conn| {
            conn.query_row("SELECT COUNT(*) FROM company", [], |row| row.get(0))
                .context(Message::CompanyFetchFailed(0))
        })
        .unwrap();

        assert_eq!(count, 0);
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_within_connection_auto_commits(ctx: &mut SessionTestContext) {
        let result: DaoResult<()> = do_within_connection(&ctx.data_source, |conn| {
            conn.execute(INSERT_COMPANY, ["Acme"]).context(Message::CompanySaveFailed("Acme".into()))?;
            Err(op_failed!(Message::CompanyNotFound(1)))
        });

        // Without a transaction the statement before the failure stays applied.
        assert!(result.is_err());
        assert_eq!(ctx.company_count(), 1);
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_sessions_are_independent(ctx: &mut SessionTestContext) {
        let mut first = Session::open(&ctx.data_source).unwrap();
        first
            .in_transaction(|tx| {
                tx.execute(INSERT_COMPANY, ["Acme"]).context(Message::CompanySaveFailed("Acme".into()))?;
                Ok(())
            })
            .unwrap();
        first.close();

        let second = Session::open(&ctx.data_source).unwrap();
        let count: i64 = second
            .connection()
            .query_row("SELECT COUNT(*) FROM company", [], |row| row.get(0))
            .unwrap();
        second.close();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_open_failure_is_reported() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("no-such-dir").join("sessions.db");
        let data_source = SqliteDataSource::new_without_migrations(missing, DatabaseConfig::default());

        let result: DaoResult<()> = do_in_transaction(&data_source, |_| Ok(()));
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Failed to acquire database connection");
        assert!(err.cause().is_some());
    }
}
