//! Product catalog service

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use nexus_common::PaginationResult;
use nexus_errors::{AppError, AppResult};
use tracing::{debug, info, instrument};

use crate::domain::product::parse_metadata;
use crate::domain::{
    ListProductsParams, NewProduct, Product, ProductRepository, ProductService,
    UpdateProductParams,
};

/// [`ProductService`] over a [`ProductRepository`]: normalizes pagination and
/// enforces stock invariants before anything reaches storage.
pub struct ProductCatalog {
    repository: Arc<dyn ProductRepository>,
}

impl ProductCatalog {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    async fn require(&self, id: i64) -> AppResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("product {}", id)))
    }
}

#[async_trait]
impl ProductService for ProductCatalog {
    #[instrument(skip(self))]
    async fn get_product(&self, id: i64) -> AppResult<Product> {
        self.require(id).await
    }

    #[instrument(skip(self, params), fields(page = params.pagination.page, limit = params.pagination.limit))]
    async fn list_products(
        &self,
        params: ListProductsParams,
    ) -> AppResult<PaginationResult<Product>> {
        if let Some(raw) = &params.filter.metadata {
            parse_metadata(raw)?;
        }

        let pagination = params.pagination.normalized();
        let result = self.repository.list(&params.filter, pagination).await?;
        debug!(returned = result.data.len(), total = result.total, "Listed products");
        Ok(result)
    }

    #[instrument(skip(self, product), fields(product_model_id = product.product_model_id))]
    async fn create_product(&self, product: NewProduct) -> AppResult<Product> {
        // validate through the entity so create and update share one rule set
        Product::from_new(0, product.clone(), Utc::now()).validate()?;

        let created = self.repository.insert(product).await?;
        info!(product_id = created.id, remaining = created.remaining(), "Product created");
        Ok(created)
    }

    #[instrument(skip(self, params), fields(product_id = params.id))]
    async fn update_product(&self, params: UpdateProductParams) -> AppResult<()> {
        let mut product = self.require(params.id).await?;
        if params.is_empty() {
            debug!("Update carries no fields");
            return Ok(());
        }

        params.apply_to(&mut product);
        product.validate()?;
        product.date_updated = Utc::now();

        if !self.repository.update(&product).await? {
            return Err(AppError::not_found(format!("product {}", product.id)));
        }
        info!(remaining = product.remaining(), "Product updated");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, id: i64) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(AppError::not_found(format!("product {}", id)));
        }
        info!(product_id = id, "Product deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_product_by_pop_id(&self, product_on_payment_id: i64) -> AppResult<Product> {
        self.repository
            .find_by_pop_id(product_on_payment_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "product for product_on_payment {}",
                    product_on_payment_id
                ))
            })
    }
}
