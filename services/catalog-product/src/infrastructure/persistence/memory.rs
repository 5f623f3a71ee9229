//! In-memory product repository
//!
//! Used when no database is configured and by tests. Filter semantics match
//! the PostgreSQL repository.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use nexus_common::{PaginationParams, PaginationResult};
use nexus_errors::{AppError, AppResult};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::domain::product::{json_contains, parse_metadata};
use crate::domain::{NewProduct, Product, ProductFilter, ProductRepository};

#[derive(Default)]
struct Store {
    products: BTreeMap<i64, Product>,
    /// product_on_payment id -> product id
    payments: HashMap<i64, i64>,
    next_product_id: i64,
    next_payment_id: i64,
}

#[derive(Default)]
pub struct InMemoryProductRepository {
    store: RwLock<Store>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn in_range(value: i64, from: Option<i64>, to: Option<i64>) -> bool {
    from.is_none_or(|f| value >= f) && to.is_none_or(|t| value <= t)
}

fn matches(product: &Product, filter: &ProductFilter, metadata: Option<&Value>) -> bool {
    if filter.product_model_id.is_some_and(|id| product.product_model_id != id) {
        return false;
    }
    if filter.is_active.is_some_and(|active| product.is_active != active) {
        return false;
    }
    if !in_range(product.quantity, filter.quantity_from, filter.quantity_to)
        || !in_range(product.sold, filter.sold_from, filter.sold_to)
        || !in_range(product.add_price, filter.add_price_from, filter.add_price_to)
    {
        return false;
    }
    if filter.date_created_from.is_some_and(|from| product.date_created < from)
        || filter.date_created_to.is_some_and(|to| product.date_created > to)
    {
        return false;
    }
    match metadata {
        Some(needle) => parse_metadata(&product.metadata)
            .ok()
            .flatten()
            .is_some_and(|doc| json_contains(&doc, needle)),
        None => true,
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Product>> {
        Ok(self.store.read().await.products.get(&id).cloned())
    }

    async fn find_by_pop_id(&self, product_on_payment_id: i64) -> AppResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store
            .payments
            .get(&product_on_payment_id)
            .and_then(|product_id| store.products.get(product_id))
            .cloned())
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

        let store = self.store.read().await;
        let matching: Vec<&Product> = store
            .products
            .values()
            .filter(|p| matches(p, filter, metadata.as_ref()))
            .collect();

        let total = matching.len() as i64;
        let data = matching
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit.max(0) as usize)
            .cloned()
            .collect();

        Ok(PaginationResult::new(data, total, &pagination))
    }

    async fn insert(&self, product: NewProduct) -> AppResult<Product> {
        let mut store = self.store.write().await;
        store.next_product_id += 1;
        let product = Product::from_new(store.next_product_id, product, Utc::now());
        store.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update(&self, product: &Product) -> AppResult<bool> {
        let mut store = self.store.write().await;
        match store.products.get_mut(&product.id) {
            Some(existing) => {
                *existing = product.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut store = self.store.write().await;
        let removed = store.products.remove(&id).is_some();
        if removed {
            store.payments.retain(|_, product_id| *product_id != id);
        }
        Ok(removed)
    }

    async fn link_payment(&self, product_id: i64, _quantity: i64) -> AppResult<i64> {
        let mut store = self.store.write().await;
        if !store.products.contains_key(&product_id) {
            return Err(AppError::not_found(format!("product {}", product_id)));
        }
        store.next_payment_id += 1;
        let pop_id = store.next_payment_id;
        store.payments.insert(pop_id, product_id);
        Ok(pop_id)
    }
}
