//! Service call parameters

use chrono::{DateTime, Utc};
use nexus_common::PaginationParams;

use super::product::Product;

/// Optional list filters; `None` means "do not filter on this".
/// Ranges are inclusive on both ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub product_model_id: Option<i64>,
    pub quantity_from: Option<i64>,
    pub quantity_to: Option<i64>,
    pub sold_from: Option<i64>,
    pub sold_to: Option<i64>,
    pub add_price_from: Option<i64>,
    pub add_price_to: Option<i64>,
    pub is_active: Option<bool>,
    /// JSON document the product metadata must contain
    pub metadata: Option<Vec<u8>>,
    pub date_created_from: Option<DateTime<Utc>>,
    pub date_created_to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListProductsParams {
    pub pagination: PaginationParams,
    pub filter: ProductFilter,
}

/// Partial update. Each `Some` field is written, each `None` field is left
/// untouched; `Some` of a zero/empty value is still a write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProductParams {
    pub id: i64,
    pub product_model_id: Option<i64>,
    pub quantity: Option<i64>,
    pub sold: Option<i64>,
    pub add_price: Option<i64>,
    pub is_active: Option<bool>,
    pub can_combine: Option<bool>,
    pub metadata: Option<Vec<u8>>,
    pub resources: Option<Vec<String>>,
}

impl UpdateProductParams {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.product_model_id.is_none()
            && self.quantity.is_none()
            && self.sold.is_none()
            && self.add_price.is_none()
            && self.is_active.is_none()
            && self.can_combine.is_none()
            && self.metadata.is_none()
            && self.resources.is_none()
    }

    /// Write the present fields onto `product`
    pub fn apply_to(self, product: &mut Product) {
        if let Some(v) = self.product_model_id {
            product.product_model_id = v;
        }
        if let Some(v) = self.quantity {
            product.quantity = v;
        }
        if let Some(v) = self.sold {
            product.sold = v;
        }
        if let Some(v) = self.add_price {
            product.add_price = v;
        }
        if let Some(v) = self.is_active {
            product.is_active = v;
        }
        if let Some(v) = self.can_combine {
            product.can_combine = v;
        }
        if let Some(v) = self.metadata {
            product.metadata = v;
        }
        if let Some(v) = self.resources {
            product.resources = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::NewProduct;

    fn product() -> Product {
        Product::from_new(
            3,
            NewProduct {
                product_model_id: 7,
                quantity: 10,
                add_price: 500,
                is_active: true,
                can_combine: true,
                metadata: br#"{"a":1}"#.to_vec(),
                resources: vec!["img/1.png".to_string()],
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_empty_update_changes_nothing() {
        let params = UpdateProductParams::new(3);
        assert!(params.is_empty());

        let mut p = product();
        let before = p.clone();
        params.apply_to(&mut p);
        assert_eq!(p, before);
    }

    #[test]
    fn test_falsy_values_are_applied() {
        let params = UpdateProductParams {
            quantity: Some(0),
            add_price: Some(0),
            is_active: Some(false),
            can_combine: Some(false),
            metadata: Some(Vec::new()),
            resources: Some(Vec::new()),
            ..UpdateProductParams::new(3)
        };
        assert!(!params.is_empty());

        let mut p = product();
        params.apply_to(&mut p);
        assert_eq!(p.quantity, 0);
        assert_eq!(p.add_price, 0);
        assert!(!p.is_active);
        assert!(!p.can_combine);
        assert!(p.metadata.is_empty());
        assert!(p.resources.is_empty());
        // untouched
        assert_eq!(p.product_model_id, 7);
    }
}
