//! Display implementation for daolab messages.
//!
//! Every human-readable string the library produces, whether logged or carried
//! inside a [`DaoError`](crate::libs::error::DaoError), is defined here.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter) -> Result {
        let s = match self {
            // === PRODUCT MESSAGES ===
            Message::ProductIdNull => "Product id cannot be null".to_string(),
            Message::ProductAlreadyPersisted(id) => format!("Product already has id = {}", id),
            Message::ProductSaved(id) => format!("Product saved with id = {}", id),
            Message::ProductSaveFailed(product) => format!("Error saving product: {}", product),
            Message::ProductNotFound(id) => format!("Product with id = {} does not exist", id),
            Message::ProductsFetchFailed => "Error getting all products".to_string(),
            Message::ProductFetchFailed(id) => format!("Error getting product with id = {}", id),
            Message::ProductUpdated(id) => format!("Product with id = {} updated", id),
            Message::ProductUpdateFailed(id) => format!("Error updating product with id = {}", id),
            Message::ProductRemoved(id) => format!("Product with id = {} removed", id),
            Message::ProductRemoveFailed(id) => format!("Error removing product with id = {}", id),
            Message::GeneratedIdMissing => "Cannot fetch generated id".to_string(),

            // === COMPANY MESSAGES ===
            Message::CompanyAlreadyPersisted(id) => format!("Company already has id = {}", id),
            Message::CompanySaved(id) => format!("Company saved with id = {}", id),
            Message::CompanySaveFailed(name) => format!("Error saving company '{}'", name),
            Message::CompanyNotFound(id) => format!("Company with id = {} does not exist", id),
            Message::CompanyFetchFailed(id) => format!("Error getting company with id = {}", id),

            // === PHOTO MESSAGES ===
            Message::PhotoIdNull => "Photo id cannot be null".to_string(),
            Message::PhotoAlreadyPersisted(id) => format!("Photo already has id = {}", id),
            Message::PhotoSaved(id) => format!("Photo saved with id = {}", id),
            Message::PhotoSaveFailed(url) => format!("Error saving photo with url '{}'", url),
            Message::PhotoNotFound(id) => format!("Photo with id = {} does not exist", id),
            Message::PhotoFetchFailed(id) => format!("Error getting photo with id = {}", id),
            Message::PhotosFetchFailed => "Error getting all photos".to_string(),
            Message::PhotoMerged(id) => format!("Photo with id = {} merged", id),
            Message::PhotoMergeFailed(id) => format!("Error merging photo with id = {}", id),
            Message::PhotoRemoved(id) => format!("Photo with id = {} removed", id),
            Message::PhotoRemoveFailed(id) => format!("Error removing photo with id = {}", id),
            Message::OrphanCommentsRemoved(id, count) => {
                format!("Removed {} orphan comment(s) of photo with id = {}", count, id)
            }
            Message::CommentAdded(photo_id, comment_id) => {
                format!("Comment with id = {} added to photo with id = {}", comment_id, photo_id)
            }
            Message::CommentAddFailed(photo_id) => format!("Error adding comment to photo with id = {}", photo_id),

            // === SESSION MESSAGES ===
            Message::ConnectionFailed => "Failed to acquire database connection".to_string(),
            Message::ConnectionCloseFailed(error) => format!("Failed to close database connection: {}", error),
            Message::ReadOnlyHintFailed => "Failed to mark session as read-only".to_string(),
            Message::TransactionBeginFailed => "Failed to begin transaction".to_string(),
            Message::TransactionCommitFailed => "Failed to commit transaction".to_string(),
            Message::TransactionRolledBack(error) => format!("Transaction rolled back: {}", error),
            Message::TransactionRollbackFailed(error) => format!("Failed to roll back transaction: {}", error),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All database migrations completed successfully".to_string(),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigFileNotFound(path) => format!("Configuration file {} not found, using defaults", path),
            Message::ConfigLoaded(path) => format!("Configuration loaded from {}", path),
            Message::ConfigSaved(path) => format!("Configuration saved to {}", path),
            Message::DatabasePathOverridden(path) => format!("Database path overridden by environment: {}", path),
        };
        write!(f, "{}", s)
    }
}
