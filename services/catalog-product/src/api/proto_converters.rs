//! Domain to proto conversions

use chrono::{DateTime, Utc};
use nexus_common::PaginationResult;

use crate::common::v1::PaginationResponse;
use crate::domain::Product;
use crate::proto::ProductEntity;

fn timestamp_to_proto(dt: &DateTime<Utc>) -> prost_types::Timestamp {
    prost_types::Timestamp {
        seconds: dt.timestamp(),
        nanos: dt.timestamp_subsec_nanos() as i32,
    }
}

pub fn product_to_entity(product: Product) -> ProductEntity {
    ProductEntity {
        id: product.id,
        product_model_id: product.product_model_id,
        quantity: product.quantity,
        sold: product.sold,
        add_price: product.add_price,
        is_active: product.is_active,
        can_combine: product.can_combine,
        date_created: Some(timestamp_to_proto(&product.date_created)),
        date_updated: Some(timestamp_to_proto(&product.date_updated)),
        metadata: product.metadata,
        resources: product.resources,
    }
}

pub fn pagination_to_proto<T>(result: &PaginationResult<T>) -> PaginationResponse {
    PaginationResponse {
        page: result.page,
        limit: result.limit,
        total: result.total,
        next_page: result.next_page(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewProduct;
    use nexus_common::PaginationParams;

    #[test]
    fn test_product_to_entity_keeps_every_field() {
        let created = DateTime::from_timestamp(1_700_000_000, 123).unwrap();
        let mut product = Product::from_new(
            11,
            NewProduct {
                product_model_id: 4,
                quantity: 8,
                add_price: 250,
                is_active: true,
                can_combine: false,
                metadata: br#"{"size":"L"}"#.to_vec(),
                resources: vec!["a.png".into(), "b.png".into()],
            },
            created,
        );
        product.sold = 3;

        let entity = product_to_entity(product);
        assert_eq!(entity.id, 11);
        assert_eq!(entity.product_model_id, 4);
        assert_eq!(entity.quantity, 8);
        assert_eq!(entity.sold, 3);
        assert_eq!(entity.add_price, 250);
        assert!(entity.is_active);
        assert!(!entity.can_combine);
        assert_eq!(entity.metadata, br#"{"size":"L"}"#.to_vec());
        assert_eq!(entity.resources, vec!["a.png", "b.png"]);
        let ts = entity.date_created.unwrap();
        assert_eq!((ts.seconds, ts.nanos), (1_700_000_000, 123));
    }

    #[test]
    fn test_pagination_to_proto() {
        let result = PaginationResult::new(vec![1, 2], 5, &PaginationParams::new(1, 2));
        let proto = pagination_to_proto(&result);
        assert_eq!(proto.page, 1);
        assert_eq!(proto.limit, 2);
        assert_eq!(proto.total, 5);
        assert_eq!(proto.next_page, Some(2));

        let last = PaginationResult::new(vec![5], 5, &PaginationParams::new(3, 2));
        assert_eq!(pagination_to_proto(&last).next_page, None);
    }
}
