//! # Daolab - Data access objects over SQLite
//!
//! A small data access layer showing two ways of talking to a relational
//! store: hand-written parameterized statements, and session-managed
//! operations with explicit transaction scoping.
//!
//! ## Features
//!
//! - **Product DAO**: statement-based CRUD with generated ids
//! - **Company DAO**: one query loading a company with its products
//! - **Photo DAO**: transactional CRUD, comment cascade and orphan removal
//! - **Relationship helpers**: consistent parent/child links without back-pointers
//! - **Single error type**: every failure is a `DaoError::OperationFailed`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use daolab::db::data_source::SqliteDataSource;
//! use daolab::db::products::{ProductDao, Products};
//! use daolab::libs::product::Product;
//!
//! let dao = Products::new(SqliteDataSource::new()?);
//! let mut milk = Product::new("Milk", "Acme", "1.50".parse()?, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
//! dao.save(&mut milk)?;
//! println!("saved {:?}", milk.id);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod db;
pub mod libs;

#[doc(hidden)]
pub use tracing;
