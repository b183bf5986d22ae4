//! Statement-based product DAO.
//!
//! Every operation acquires its own connection from the [`DataSource`], runs
//! one hand-written statement with positional parameters, and releases the
//! connection before returning. No explicit transaction is opened; each
//! statement auto-commits.
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
//! assert!(milk.id.is_some());
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::db::data_source::DataSource;
use crate::db::session::do_within_connection;
use crate::libs::error::{Context, DaoResult};
use crate::libs::messages::Message;
use crate::libs::product::Product;
use crate::{bail_op_failed, msg_debug, msg_warning, op_failed};
use chrono::Local;
use rusqlite::{params, OptionalExtension, Row};

const INSERT_PRODUCT: &str =
    "INSERT INTO products (name, producer, price, expiration_date, creation_time) VALUES (?1, ?2, ?3, ?4, ?5)";
const UPDATE_PRODUCT: &str = "UPDATE products SET name = ?1, producer = ?2, price = ?3, expiration_date = ?4 WHERE id = ?5";
const SELECT_ALL_PRODUCTS: &str = "SELECT id, name, producer, price, expiration_date, creation_time FROM products";
const SELECT_PRODUCT_BY_ID: &str =
    "SELECT id, name, producer, price, expiration_date, creation_time FROM products WHERE id = ?1";
const DELETE_PRODUCT: &str = "DELETE FROM products WHERE id = ?1";

pub trait ProductDao {
    /// Inserts a product that has no id yet and writes the generated id and
    /// creation time back into it.
    fn save(&self, product: &mut Product) -> DaoResult<()>;

    /// All products, in whatever order the store returns them.
    fn find_all(&self) -> DaoResult<Vec<Product>>;

    /// The product with `id`; a missing row is an error, never an empty result.
    fn find_one(&self, id: i64) -> DaoResult<Product>;

    /// Overwrites every field except id and creation time.
    fn update(&self, product: &Product) -> DaoResult<()>;

    fn remove(&self, product: &Product) -> DaoResult<()>;
}

/// Product store backed by any [`DataSource`].
///
/// Holds no connection between calls; each operation acquires one and drops
/// it before returning.
pub struct Products<D: DataSource> {
    data_source: D,
}

impl<D: DataSource> Products<D> {
    pub fn new(data_source: D) -> Self {
        Self { data_source }
    }
}

impl<D: DataSource> ProductDao for Products<D> {
    fn save(&self, product: &mut Product) -> DaoResult<()> {
        if let Some(id) = product.id {
            bail_op_failed!(Message::ProductAlreadyPersisted(id));
        }

        let creation_time = Local::now().naive_local();
        let id = do_within_connection(&self.data_source, |conn| {
            let save_failed = || Message::ProductSaveFailed(format!("{:?}", product));
            let rows = conn
                .execute(
                    INSERT_PRODUCT,
                    params![
                        product.name,
                        product.producer,
                        product.price,
                        product.expiration_date,
                        creation_time
                    ],
                )
                .with_context(save_failed)?;
            if rows == 0 {
                bail_op_failed!(save_failed());
            }
            fetch_generated_id(conn.last_insert_rowid())
        })
        .inspect_err(|e| msg_warning!(e))?;

        product.id = Some(id);
        product.creation_time = Some(creation_time);
        msg_debug!(Message::ProductSaved(id));
        Ok(())
    }

    fn find_all(&self) -> DaoResult<Vec<Product>> {
        do_within_connection(&self.data_source, |conn| {
            let mut stmt = conn.prepare(SELECT_ALL_PRODUCTS).context(Message::ProductsFetchFailed)?;
            let product_iter = stmt.query_map([], extract_product).context(Message::ProductsFetchFailed)?;

            let mut products = Vec::new();
            for product in product_iter {
                products.push(product.context(Message::ProductsFetchFailed)?);
            }
            Ok(products)
        })
    }

    fn find_one(&self, id: i64) -> DaoResult<Product> {
        do_within_connection(&self.data_source, |conn| {
            conn.query_row(SELECT_PRODUCT_BY_ID, params![id], extract_product)
                .optional()
                .context(Message::ProductFetchFailed(id))?
                .ok_or_else(|| op_failed!(Message::ProductNotFound(id)))
        })
    }

    fn update(&self, product: &Product) -> DaoResult<()> {
        let Some(id) = product.id else {
            bail_op_failed!(Message::ProductIdNull);
        };

        do_within_connection(&self.data_source, |conn| {
            let rows = conn
                .execute(
                    UPDATE_PRODUCT,
                    params![product.name, product.producer, product.price, product.expiration_date, id],
                )
                .context(Message::ProductUpdateFailed(id))?;
            check_updated(rows, || Message::ProductNotFound(id))
        })
        .inspect_err(|e| msg_warning!(e))?;

        msg_debug!(Message::ProductUpdated(id));
        Ok(())
    }

    fn remove(&self, product: &Product) -> DaoResult<()> {
        let Some(id) = product.id else {
            bail_op_failed!(Message::ProductIdNull);
        };

        do_within_connection(&self.data_source, |conn| {
            let rows = conn
                .execute(DELETE_PRODUCT, params![id])
                .context(Message::ProductRemoveFailed(id))?;
            check_updated(rows, || Message::ProductNotFound(id))
        })
        .inspect_err(|e| msg_warning!(e))?;

        msg_debug!(Message::ProductRemoved(id));
        Ok(())
    }
}

fn extract_product(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        producer: row.get(2)?,
        price: row.get(3)?,
        expiration_date: row.get(4)?,
        creation_time: Some(row.get(5)?),
    })
}

/// SQLite reports 0 when the last insert produced no row id.
fn fetch_generated_id(rowid: i64) -> DaoResult<i64> {
    if rowid > 0 {
        Ok(rowid)
    } else {
        Err(op_failed!(Message::GeneratedIdMissing))
    }
}

fn check_updated<F>(rows: usize, not_found: F) -> DaoResult<()>
where
    F: FnOnce() -> Message,
{
    if rows == 0 {
        bail_op_failed!(not_found());
    }
    Ok(())
}
