//! Product service contract consumed by the gRPC layer

use async_trait::async_trait;
use nexus_common::PaginationResult;
use nexus_errors::AppResult;

use super::params::{ListProductsParams, UpdateProductParams};
use super::product::{NewProduct, Product};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductService: Send + Sync {
    async fn get_product(&self, id: i64) -> AppResult<Product>;

    async fn list_products(&self, params: ListProductsParams)
    -> AppResult<PaginationResult<Product>>;

    async fn create_product(&self, product: NewProduct) -> AppResult<Product>;

    async fn update_product(&self, params: UpdateProductParams) -> AppResult<()>;

    async fn delete_product(&self, id: i64) -> AppResult<()>;

    async fn get_product_by_pop_id(&self, product_on_payment_id: i64) -> AppResult<Product>;
}
