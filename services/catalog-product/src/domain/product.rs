//! Product entity

use chrono::{DateTime, Utc};
use nexus_errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// A sellable product: a stocked variant of a product model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub product_model_id: i64,
    pub quantity: i64,
    pub sold: i64,
    /// Price delta on top of the product model's base price
    pub add_price: i64,
    pub is_active: bool,
    pub can_combine: bool,
    /// Free-form JSON document, empty when unset
    pub metadata: Vec<u8>,
    pub resources: Vec<String>,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

impl Product {
    /// Build a stored product from creation input. `sold` starts at zero.
    pub fn from_new(id: i64, new: NewProduct, now: DateTime<Utc>) -> Self {
        Self {
            id,
            product_model_id: new.product_model_id,
            quantity: new.quantity,
            sold: 0,
            add_price: new.add_price,
            is_active: new.is_active,
            can_combine: new.can_combine,
            metadata: new.metadata,
            resources: new.resources,
            date_created: now,
            date_updated: now,
        }
    }

    /// Units still available for sale
    pub fn remaining(&self) -> i64 {
        self.quantity - self.sold
    }

    /// Stock invariants: non-negative counters, never sold more than stocked
    pub fn validate(&self) -> AppResult<()> {
        if self.product_model_id <= 0 {
            return Err(AppError::validation("product_model_id must be positive"));
        }
        if self.quantity < 0 {
            return Err(AppError::validation("quantity must not be negative"));
        }
        if self.sold < 0 {
            return Err(AppError::validation("sold must not be negative"));
        }
        if self.sold > self.quantity {
            return Err(AppError::validation(format!(
                "sold ({}) exceeds quantity ({})",
                self.sold, self.quantity
            )));
        }
        parse_metadata(&self.metadata)?;
        Ok(())
    }
}

/// Creation input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProduct {
    pub product_model_id: i64,
    pub quantity: i64,
    pub add_price: i64,
    pub is_active: bool,
    pub can_combine: bool,
    pub metadata: Vec<u8>,
    pub resources: Vec<String>,
}

/// Parse a metadata blob. Empty means "no metadata".
pub fn parse_metadata(raw: &[u8]) -> AppResult<Option<serde_json::Value>> {
    if raw.is_empty() {
        return Ok(None);
    }
    serde_json::from_slice(raw)
        .map(Some)
        .map_err(|e| AppError::validation(format!("metadata is not valid JSON: {}", e)))
}

/// JSONB `@>`: every key/element of `needle` appears in `haystack`.
/// A top-level array also contains a bare scalar equal to one of its elements.
pub fn json_contains(haystack: &serde_json::Value, needle: &serde_json::Value) -> bool {
    match (haystack, needle) {
        (serde_json::Value::Array(h), scalar) if !scalar.is_object() && !scalar.is_array() => {
            h.iter().any(|hv| hv == scalar)
        }
        _ => contains_nested(haystack, needle),
    }
}

/// Below the top level, structures match only structures of the same kind
fn contains_nested(haystack: &serde_json::Value, needle: &serde_json::Value) -> bool {
    use serde_json::Value;

    match (haystack, needle) {
        (Value::Object(h), Value::Object(n)) => n
            .iter()
            .all(|(k, nv)| h.get(k).is_some_and(|hv| contains_nested(hv, nv))),
        (Value::Array(h), Value::Array(n)) => {
            n.iter().all(|nv| h.iter().any(|hv| contains_nested(hv, nv)))
        }
        (h, n) => h == n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product() -> Product {
        Product::from_new(
            1,
            NewProduct {
                product_model_id: 10,
                quantity: 5,
                ..Default::default()
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_from_new_starts_unsold() {
        let p = product();
        assert_eq!(p.sold, 0);
        assert_eq!(p.remaining(), 5);
        assert_eq!(p.date_created, p.date_updated);
    }

    #[test]
    fn test_validate_rejects_oversold() {
        let mut p = product();
        p.sold = 6;
        assert!(matches!(p.validate(), Err(AppError::Validation(_))));

        p.sold = 5;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_metadata() {
        let mut p = product();
        p.metadata = b"{not json".to_vec();
        assert!(p.validate().is_err());

        p.metadata = br#"{"color":"red"}"#.to_vec();
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_json_contains() {
        let doc = json!({"color": "red", "size": {"eu": 42, "us": 9}, "tags": ["new", "sale"]});

        assert!(json_contains(&doc, &json!({"color": "red"})));
        assert!(json_contains(&doc, &json!({"size": {"eu": 42}})));
        assert!(json_contains(&doc, &json!({"tags": ["sale"]})));
        assert!(json_contains(&doc, &json!({})));
        assert!(!json_contains(&doc, &json!({"color": "blue"})));
        assert!(!json_contains(&doc, &json!({"tags": ["old"]})));
        assert!(json_contains(&json!(["a", "b"]), &json!("a")));
        assert!(!json_contains(&json!(["a", "b"]), &json!("c")));
        assert!(json_contains(&json!([[1, 2], 3]), &json!([[1], 3])));
    }

    #[test]
    fn test_json_contains_scalar_in_array_only_at_top_level() {
        // nested arrays never contain a bare scalar
        assert!(!json_contains(&json!({"tags": ["a"]}), &json!({"tags": "a"})));
        // scalar needle elements match scalar haystack elements only
        assert!(!json_contains(&json!([[1]]), &json!([1])));
        assert!(!json_contains(&json!({"a": [{"b": 1}]}), &json!({"a": {"b": 1}})));
    }
}
