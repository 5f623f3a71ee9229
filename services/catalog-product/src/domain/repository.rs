//! Product storage port

use async_trait::async_trait;
use nexus_common::{PaginationParams, PaginationResult};
use nexus_errors::AppResult;

use super::params::ProductFilter;
use super::product::{NewProduct, Product};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Product>>;

    /// Product referenced by a product-on-payment row
    async fn find_by_pop_id(&self, product_on_payment_id: i64) -> AppResult<Option<Product>>;

    /// One page of matching products ordered by id. `pagination` is already
    /// normalized.
    async fn list(
        &self,
        filter: &ProductFilter,
        pagination: PaginationParams,
    ) -> AppResult<PaginationResult<Product>>;

    /// Store a new product; storage assigns id and timestamps
    async fn insert(&self, product: NewProduct) -> AppResult<Product>;

    /// Overwrite every column of an existing product. Returns false when the
    /// product no longer exists.
    async fn update(&self, product: &Product) -> AppResult<bool>;

    /// Returns false when nothing was deleted
    async fn delete(&self, id: i64) -> AppResult<bool>;

    /// Record that a payment line references `product_id`; returns the
    /// product-on-payment id
    async fn link_payment(&self, product_id: i64, quantity: i64) -> AppResult<i64>;
}
