//! Catalog
//!
//! The admin-managed product collection the storefront reads. The checkout
//! core treats products as immutable; only lookup and admin insertion are
//! modelled here.

use thiserror::Error;

use crate::products::{Product, ProductId};

/// Errors raised by catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product has the given identifier.
    #[error("product {0} not found")]
    NotFound(ProductId),

    /// A product with the same name already exists.
    #[error("a product named {0:?} already exists")]
    DuplicateName(String),
}

/// Admin-managed product collection.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateName`] when another product already
    /// carries the same name.
    pub fn add(&mut self, product: Product) -> Result<(), CatalogError> {
        if self
            .products
            .iter()
            .any(|existing| existing.name == product.name)
        {
            return Err(CatalogError::DuplicateName(product.name));
        }

        self.products.push(product);

        Ok(())
    }

    /// Look up a product by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when the identifier is absent.
    pub fn find(&self, id: ProductId) -> Result<&Product, CatalogError> {
        self.products
            .iter()
            .find(|product| product.id == id)
            .ok_or(CatalogError::NotFound(id))
    }

    /// All products, in insertion order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
