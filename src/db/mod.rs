//! Data access layer over SQLite.
//!
//! Two styles of DAO live here:
//!
//! - **Statement-based**: [`products`] runs hand-written SQL on a fresh
//!   connection per call, relying on auto-commit.
//! - **Session-managed**: [`companies`] and [`photos`] run every operation in a
//!   scoped session from [`session`]; writes are transactional and reads carry a
//!   read-only hint.
//!
//! Connections come from a [`data_source::DataSource`]; the schema is created
//! by [`migrations`].
//!
//! ```rust,no_run
//! use daolab::db::data_source::SqliteDataSource;
//! use daolab::db::companies::{Companies, CompanyDao};
//!
//! let dao = Companies::new(SqliteDataSource::new()?);
//! let company = dao.find_by_id_fetch_products(1)?;
//! println!("{} has {} products", company.name, company.products().len());
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection provisioning: the `DataSource` trait and its SQLite implementation.
pub mod data_source;

/// Versioned schema migrations.
pub mod migrations;

/// Scoped connection, read-only and transaction helpers.
pub mod session;

/// Statement-based product DAO.
pub mod products;

/// Session-managed company DAO.
pub mod companies;

/// Session-managed photo DAO with comment cascade and orphan removal.
pub mod photos;
