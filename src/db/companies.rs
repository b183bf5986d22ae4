//! Session-managed company DAO.
//!
//! A company is always read together with its products: one `LEFT JOIN`
//! query, run on a read-only session, returns the company row repeated once
//! per product (or once with empty product columns). The rows are folded into
//! a [`Company`] whose products carry its id as their back-reference.
//!
//! Saving writes the company and every product in its collection inside one
//! transaction, so either all rows exist afterwards or none do.
//!
//! ```rust,no_run
//! use daolab::db::companies::{Companies, CompanyDao};
//! use daolab::db::data_source::SqliteDataSource;
//! use daolab::libs::company::{Company, Product};
//!
//! let dao = Companies::new(SqliteDataSource::new()?);
//! let mut company = Company::new("Acme");
//! company.add_product(Product::new("Anvil"));
//! dao.save(&mut company)?;
//!
//! let loaded = dao.find_by_id_fetch_products(company.id.unwrap())?;
//! assert_eq!(loaded.products().len(), 1);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::db::data_source::DataSource;
use crate::db::session::{do_in_transaction, do_read_only};
use crate::libs::company::{Company, Product};
use crate::libs::error::{Context, DaoResult};
use crate::libs::messages::Message;
use crate::{bail_op_failed, msg_debug, msg_warning};
use rusqlite::params;

const INSERT_COMPANY: &str = "INSERT INTO company (name) VALUES (?1)";
const INSERT_PRODUCT: &str = "INSERT INTO product (name, company_id) VALUES (?1, ?2)";
// LEFT JOIN so a company without products still loads.
const SELECT_COMPANY_FETCH_PRODUCTS: &str = "
    SELECT c.id, c.name, p.id, p.name
    FROM company c
    LEFT JOIN product p ON p.company_id = c.id
    WHERE c.id = ?1
    ORDER BY p.id
";

pub trait CompanyDao {
    /// Loads the company together with all of its products in one query.
    fn find_by_id_fetch_products(&self, id: i64) -> DaoResult<Company>;

    /// Inserts the company and every product in its collection.
    fn save(&self, company: &mut Company) -> DaoResult<()>;
}

/// Company store backed by any [`DataSource`].
pub struct Companies<D: DataSource> {
    data_source: D,
}

impl<D: DataSource> Companies<D> {
    pub fn new(data_source: D) -> Self {
        Self { data_source }
    }
}

impl<D: DataSource> CompanyDao for Companies<D> {
    fn find_by_id_fetch_products(&self, id: i64) -> DaoResult<Company> {
        do_read_only(&self.data_source, |conn| {
            let mut stmt = conn
                .prepare(SELECT_COMPANY_FETCH_PRODUCTS)
                .context(Message::CompanyFetchFailed(id))?;
            let rows = stmt
                .query_map(params![id], |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, Option<i64>>(2)?,
                        row.get::<_, Option<String>>(3)?,
                    ))
                })
                .context(Message::CompanyFetchFailed(id))?
                .collect::<Result<Vec<_>, _>>()
                .context(Message::CompanyFetchFailed(id))?;

            let Some((company_id, company_name, _, _)) = rows.first() else {
                bail_op_failed!(Message::CompanyNotFound(id));
            };
            let mut company = Company::new(company_name);
            company.id = Some(*company_id);

            for (_, _, product_id, product_name) in &rows {
                if let (Some(product_id), Some(product_name)) = (product_id, product_name) {
                    let mut product = Product::new(product_name);
                    product.id = Some(*product_id);
                    company.add_product(product);
                }
            }
            Ok(company)
        })
    }

    fn save(&self, company: &mut Company) -> DaoResult<()> {
        if let Some(id) = company.id {
            bail_op_failed!(Message::CompanyAlreadyPersisted(id));
        }

        let save_failed = || Message::CompanySaveFailed(company.name.clone());
        let (company_id, product_ids) = do_in_transaction(&self.data_source, |tx| {
            tx.execute(INSERT_COMPANY, params![company.name]).with_context(save_failed)?;
            let company_id = tx.last_insert_rowid();

            let mut product_ids = Vec::with_capacity(company.products().len());
            for product in company.products() {
                tx.execute(INSERT_PRODUCT, params![product.name, company_id])
                    .with_context(save_failed)?;
                product_ids.push(tx.last_insert_rowid());
            }
            Ok((company_id, product_ids))
        })
        .inspect_err(|e| msg_warning!(e))?;

        company.assign_id(company_id);
        for (product, id) in company.products_mut().iter_mut().zip(product_ids) {
            product.id = Some(id);
        }
        msg_debug!(Message::CompanySaved(company_id));
        Ok(())
    }
}
