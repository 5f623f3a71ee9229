//! PostgreSQL product repository

use async_trait::async_trait;
use nexus_bootstrap::metrics::DbQueryTimer;
use nexus_common::{PaginationParams, PaginationResult};
use nexus_errors::{AppError, AppResult};
use serde_json::Value;
use sqlx::migrate::Migrator;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::rows::{PRODUCT_COLUMNS, ProductRow};
use crate::domain::product::parse_metadata;
use crate::domain::{NewProduct, Product, ProductFilter, ProductRepository};

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append `AND ...` clauses for every present filter field
fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter, metadata: Option<&Value>) {
    if let Some(v) = filter.product_model_id {
        qb.push(" AND product_model_id = ").push_bind(v);
    }
    if let Some(v) = filter.quantity_from {
        qb.push(" AND quantity >= ").push_bind(v);
    }
    if let Some(v) = filter.quantity_to {
        qb.push(" AND quantity <= ").push_bind(v);
    }
    if let Some(v) = filter.sold_from {
        qb.push(" AND sold >= ").push_bind(v);
    }
    if let Some(v) = filter.sold_to {
        qb.push(" AND sold <= ").push_bind(v);
    }
    if let Some(v) = filter.add_price_from {
        qb.push(" AND add_price >= ").push_bind(v);
    }
    if let Some(v) = filter.add_price_to {
        qb.push(" AND add_price <= ").push_bind(v);
    }
    if let Some(v) = filter.is_active {
        qb.push(" AND is_active = ").push_bind(v);
    }
    if let Some(v) = metadata {
        qb.push(" AND metadata @> ").push_bind(v.clone());
    }
    if let Some(v) = filter.date_created_from {
        qb.push(" AND date_created >= ").push_bind(v);
    }
    if let Some(v) = filter.date_created_to {
        qb.push(" AND date_created <= ").push_bind(v);
    }
}

/// Empty metadata is stored as NULL
fn metadata_column(raw: &[u8]) -> AppResult<Option<Value>> {
    parse_metadata(raw)
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Product>> {
        let timer = DbQueryTimer::new("select", "product");
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM product WHERE id = $1",
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(row.is_ok());

        row.map_err(|e| AppError::database(format!("Failed to load product {}: {}", id, e)))?
            .map(Product::try_from)
            .transpose()
    }

    async fn find_by_pop_id(&self, product_on_payment_id: i64) -> AppResult<Option<Product>> {
        let timer = DbQueryTimer::new("select", "product_on_payment");
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM product \
             WHERE id = (SELECT product_id FROM product_on_payment WHERE id = $1)",
            PRODUCT_COLUMNS
        ))
        .bind(product_on_payment_id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(row.is_ok());

        row.map_err(|e| {
            AppError::database(format!(
                "Failed to load product for product_on_payment {}: {}",
                product_on_payment_id, e
            ))
        })?
        .map(Product::try_from)
        .transpose()
    }

    async fn list(
        &self,
        filter: &ProductFilter,
        pagination: PaginationParams,
    ) -> AppResult<PaginationResult<Product>> {
        let metadata = match &filter.metadata {
            Some(raw) => parse_metadata(raw)?,
            None => None,
        };

        let timer = DbQueryTimer::new("count", "product");
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM product WHERE TRUE");
        push_filters(&mut count, filter, metadata.as_ref());
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await;
        timer.finish(total.is_ok());
        let total = total.map_err(|e| AppError::database(format!("Failed to count products: {}", e)))?;

        let timer = DbQueryTimer::new("select", "product");
        let mut select = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM product WHERE TRUE",
            PRODUCT_COLUMNS
        ));
        push_filters(&mut select, filter, metadata.as_ref());
        select
            .push(" ORDER BY id LIMIT ")
            .push_bind(i64::from(pagination.limit))
            .push(" OFFSET ")
            .push_bind(pagination.offset());
        let rows = select
            .build_query_as::<ProductRow>()
            .fetch_all(&self.pool)
            .await;
        timer.finish(rows.is_ok());
        let rows = rows.map_err(|e| AppError::database(format!("Failed to list products: {}", e)))?;

        let data = rows
            .into_iter()
            .map(Product::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(PaginationResult::new(data, total, &pagination))
    }

    async fn insert(&self, product: NewProduct) -> AppResult<Product> {
        let metadata = metadata_column(&product.metadata)?;

        let timer = DbQueryTimer::new("insert", "product");
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "INSERT INTO product (product_model_id, quantity, sold, add_price, is_active, \
             can_combine, metadata, resources) \
             VALUES ($1, $2, 0, $3, $4, $5, $6, $7) \
             RETURNING {}",
            PRODUCT_COLUMNS
        ))
        .bind(product.product_model_id)
        .bind(product.quantity)
        .bind(product.add_price)
        .bind(product.is_active)
        .bind(product.can_combine)
        .bind(metadata)
        .bind(&product.resources)
        .fetch_one(&self.pool)
        .await;
        timer.finish(row.is_ok());

        row.map_err(|e| AppError::database(format!("Failed to insert product: {}", e)))?
            .try_into()
    }

    async fn update(&self, product: &Product) -> AppResult<bool> {
        let metadata = metadata_column(&product.metadata)?;

        let timer = DbQueryTimer::new("update", "product");
        let result = sqlx::query(
            r#"
            UPDATE product SET
                product_model_id = $1,
                quantity = $2,
                sold = $3,
                add_price = $4,
                is_active = $5,
                can_combine = $6,
                metadata = $7,
                resources = $8,
                date_updated = $9
            WHERE id = $10
            "#,
        )
        .bind(product.product_model_id)
        .bind(product.quantity)
        .bind(product.sold)
        .bind(product.add_price)
        .bind(product.is_active)
        .bind(product.can_combine)
        .bind(metadata)
        .bind(&product.resources)
        .bind(product.date_updated)
        .bind(product.id)
        .execute(&self.pool)
        .await;
        timer.finish(result.is_ok());

        let result = result
            .map_err(|e| AppError::database(format!("Failed to update product {}: {}", product.id, e)))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let timer = DbQueryTimer::new("delete", "product");
        let result = sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.finish(result.is_ok());

        let result =
            result.map_err(|e| AppError::database(format!("Failed to delete product {}: {}", id, e)))?;
        Ok(result.rows_affected() > 0)
    }

    async fn link_payment(&self, product_id: i64, quantity: i64) -> AppResult<i64> {
        let timer = DbQueryTimer::new("insert", "product_on_payment");
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO product_on_payment (product_id, quantity) VALUES ($1, $2) RETURNING id",
        )
        .bind(product_id)
        .bind(quantity)
        .fetch_one(&self.pool)
        .await;
        timer.finish(id.is_ok());

        id.map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                AppError::not_found(format!("product {}", product_id))
            }
            _ => AppError::database(format!("Failed to link payment to product {}: {}", product_id, e)),
        })
    }
}
