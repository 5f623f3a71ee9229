//! Database row mapping

use chrono::{DateTime, Utc};
use nexus_errors::{AppError, AppResult};
use sqlx::FromRow;

use crate::domain::Product;

/// Column list matching [`ProductRow`]
pub const PRODUCT_COLUMNS: &str = "id, product_model_id, quantity, sold, add_price, is_active, \
     can_combine, metadata, resources, date_created, date_updated";

#[derive(Debug, FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub product_model_id: i64,
    pub quantity: i64,
    pub sold: i64,
    pub add_price: i64,
    pub is_active: bool,
    pub can_combine: bool,
    pub metadata: Option<serde_json::Value>,
    pub resources: Vec<String>,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = AppError;

    fn try_from(row: ProductRow) -> AppResult<Self> {
        let metadata = match row.metadata {
            Some(value) => serde_json::to_vec(&value)
                .map_err(|e| AppError::internal(format!("encode metadata of product {}: {}", row.id, e)))?,
            None => Vec::new(),
        };

        Ok(Product {
            id: row.id,
            product_model_id: row.product_model_id,
            quantity: row.quantity,
            sold: row.sold,
            add_price: row.add_price,
            is_active: row.is_active,
            can_combine: row.can_combine,
            metadata,
            resources: row.resources,
            date_created: row.date_created,
            date_updated: row.date_updated,
        })
    }
}
