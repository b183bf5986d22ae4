//! Company and its products, linked by a company id on each product.
//!
//! The company owns its products. The only ways to change the collection are
//! [`Company::add_product`], [`Company::remove_product`] and
//! [`Company::remove_product_at`], which also keep
//! every product's `company_id` in step with the owning company.

/// A row of the `product` table, owned by a [`Company`].
#[derive(Debug, Clone)]
pub struct Product {
    pub id: Option<i64>,
    pub name: String,
    company_id: Option<i64>,
}

impl Product {
    pub fn new(name: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            company_id: None,
        }
    }

    /// Identifier of the owning company, if attached to a persisted one.
    pub fn company_id(&self) -> Option<i64> {
        self.company_id
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id.is_some() && self.id == other.id
    }
}

/// A row of the `company` table with its products.
#[derive(Debug, Clone)]
pub struct Company {
    pub id: Option<i64>,
    pub name: String,
    products: Vec<Product>,
}

impl Company {
    pub fn new(name: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            products: Vec::new(),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Attaches `product` to this company, setting its back-reference.
    pub fn add_product(&mut self, mut product: Product) {
        product.company_id = self.id;
        self.products.push(product);
    }

    /// Detaches the persisted product equal to `product` and returns it with
    /// the back-reference cleared. Products without an id never match; use
    /// [`Company::remove_product_at`] for those.
    pub fn remove_product(&mut self, product: &Product) -> Option<Product> {
        let index = self.products.iter().position(|p| p == product)?;
        self.remove_product_at(index)
    }

    /// Detaches the product at `index`, saved or not.
    pub fn remove_product_at(&mut self, index: usize) -> Option<Product> {
        if index >= self.products.len() {
            return None;
        }
        let mut removed = self.products.remove(index);
        removed.company_id = None;
        Some(removed)
    }

    /// Assigns the company id after insert and propagates it to every product.
    pub(crate) fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
        for product in &mut self.products {
            product.company_id = Some(id);
        }
    }

    pub(crate) fn products_mut(&mut self) -> &mut [Product] {
        &mut self.products
    }
}

impl PartialEq for Company {
    fn eq(&self, other: &Self) -> bool {
        self.id.is_some() && self.id == other.id
    }
}
