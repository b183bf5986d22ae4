#[cfg(test)]
mod tests {
    use daolab::db::data_source::{DataSource, SqliteDataSource};
    use daolab::db::migrations::{get_db_version, needs_migration, MigrationManager};
    use daolab::libs::config::DatabaseConfig;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct MigrationTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    impl TestContext for MigrationTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("migrations.db");
            MigrationTestContext {
                _temp_dir: temp_dir,
                db_path,
            }
        }
    }

    fn table_exists(conn: &rusqlite::Connection, name: &str) -> bool {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [name],
            |row| row.get::<_, i64>(0),
        )
        .unwrap()
            > 0
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migrations_run_on_open(ctx: &mut MigrationTestContext) {
        let data_source = SqliteDataSource::open(&ctx.db_path, DatabaseConfig::default()).unwrap();
        let conn = data_source.get_connection().unwrap();

        assert_eq!(get_db_version(&conn).unwrap(), 3);
        assert!(!needs_migration(&conn).unwrap());
        for table in ["products", "company", "product", "photo", "photo_comment"] {
            assert!(table_exists(&conn, table), "missing table {}", table);
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_fresh_database_needs_migration(ctx: &mut MigrationTestContext) {
        let data_source = SqliteDataSource::new_without_migrations(&ctx.db_path, DatabaseConfig::default());
        let conn = data_source.get_connection().unwrap();

        assert_eq!(get_db_version(&conn).unwrap(), 0);
        assert!(needs_migration(&conn).unwrap());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migration_history(ctx: &mut MigrationTestContext) {
        let data_source = SqliteDataSource::new_without_migrations(&ctx.db_path, DatabaseConfig::default());
        let mut conn = data_source.get_connection().unwrap();
        let manager = MigrationManager::new();

        manager.run_migrations(&mut conn).unwrap();

        let history = manager.get_migration_history(&conn).unwrap();
        assert_eq!(history.len() as u32, manager.latest_version());
        for (i, (version, _, _)) in history.iter().enumerate() {
            assert_eq!(*version as usize, i + 1);
        }
        assert_eq!(history[2].1, "create_photo_and_photo_comment");
        assert!(manager.is_migration_applied(&conn, 2).unwrap());
        assert!(!manager.is_migration_applied(&conn, 4).unwrap());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migration_idempotency(ctx: &mut MigrationTestContext) {
        let data_source = SqliteDataSource::new_without_migrations(&ctx.db_path, DatabaseConfig::default());
        let mut conn = data_source.get_connection().unwrap();
        let manager = MigrationManager::new();

        manager.run_migrations(&mut conn).unwrap();
        let version_after_first = get_db_version(&conn).unwrap();
        manager.run_migrations(&mut conn).unwrap();

        assert_eq!(get_db_version(&conn).unwrap(), version_after_first);
        assert_eq!(manager.get_migration_history(&conn).unwrap().len(), 3);
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_photo_comments_cascade(ctx: &mut MigrationTestContext) {
        let data_source = SqliteDataSource::open(&ctx.db_path, DatabaseConfig::default()).unwrap();
        let conn = data_source.get_connection().unwrap();

        conn.execute("INSERT INTO photo (url) VALUES ('a.png')", []).unwrap();
        let photo_id = conn.last_insert_rowid();
        conn.execute(
            "INSERT INTO photo_comment (text, photo_id) VALUES ('hi', ?1)",
            [photo_id],
        )
        .unwrap();
        conn.execute("DELETE FROM photo WHERE id = ?1", [photo_id]).unwrap();

        let comments: i64 = conn
            .query_row("SELECT COUNT(*) FROM photo_comment", [], |row| row.get(0))
            .unwrap();
        assert_eq!(comments, 0);
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_unreadable_migrations_table_is_an_error(ctx: &mut MigrationTestContext) {
        let data_source = SqliteDataSource::new_without_migrations(&ctx.db_path, DatabaseConfig::default());
        let mut conn = data_source.get_connection().unwrap();
        // A table with the right name but no version column.
        conn.execute("CREATE TABLE migrations (id INTEGER PRIMARY KEY)", []).unwrap();

        assert!(get_db_version(&conn).is_err());
        assert!(needs_migration(&conn).is_err());
        assert!(MigrationManager::new().run_migrations(&mut conn).is_err());
    }
}
