#[derive(Debug, Clone)]
pub enum Message {
    // === PRODUCT MESSAGES ===
    ProductIdNull,
    ProductAlreadyPersisted(i64),
    ProductSaved(i64),
    ProductSaveFailed(String), // product debug view
    ProductNotFound(i64),
    ProductsFetchFailed,
    ProductFetchFailed(i64),
    ProductUpdated(i64),
    ProductUpdateFailed(i64),
    ProductRemoved(i64),
    ProductRemoveFailed(i64),
    GeneratedIdMissing,

    // === COMPANY MESSAGES ===
    CompanyAlreadyPersisted(i64),
    CompanySaved(i64),
    CompanySaveFailed(String), // company name
    CompanyNotFound(i64),
    CompanyFetchFailed(i64),

    // === PHOTO MESSAGES ===
    PhotoIdNull,
    PhotoAlreadyPersisted(i64),
    PhotoSaved(i64),
    PhotoSaveFailed(String), // url
    PhotoNotFound(i64),
    PhotoFetchFailed(i64),
    PhotosFetchFailed,
    PhotoMerged(i64),
    PhotoMergeFailed(i64),
    PhotoRemoved(i64),
    PhotoRemoveFailed(i64),
    OrphanCommentsRemoved(i64, usize), // photo id, count
    CommentAdded(i64, i64),            // photo id, comment id
    CommentAddFailed(i64),             // photo id

    // === SESSION MESSAGES ===
    ConnectionFailed,
    ConnectionCloseFailed(String),
    ReadOnlyHintFailed,
    TransactionBeginFailed,
    TransactionCommitFailed,
    TransactionRolledBack(String),
    TransactionRollbackFailed(String),

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
    DatabaseUpToDate,

    // === CONFIGURATION MESSAGES ===
    ConfigFileNotFound(String),
    ConfigLoaded(String),
    ConfigSaved(String),
    DatabasePathOverridden(String),
}
