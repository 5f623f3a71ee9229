//! Proto requests to service parameters

use chrono::{DateTime, Utc};
use nexus_common::PaginationParams;
use nexus_errors::{AppError, AppResult};

use crate::common::v1::PaginationRequest;
use crate::domain::{ListProductsParams, NewProduct, ProductFilter, UpdateProductParams};
use crate::proto::{CreateProductRequest, ListProductsRequest, ResourceList, UpdateProductRequest};

/// Absent timestamps stay absent; out-of-range ones are rejected
pub fn proto_to_timestamp(
    proto: Option<prost_types::Timestamp>,
    field: &str,
) -> AppResult<Option<DateTime<Utc>>> {
    proto
        .map(|ts| {
            u32::try_from(ts.nanos)
                .ok()
                .and_then(|nanos| DateTime::from_timestamp(ts.seconds, nanos))
                .ok_or_else(|| AppError::validation(format!("invalid timestamp for {}", field)))
        })
        .transpose()
}

/// Missing pagination forwards zeros; defaults are applied by the service
pub fn parse_pagination(proto: Option<PaginationRequest>) -> PaginationParams {
    proto
        .map(|p| PaginationParams::new(p.page, p.limit))
        .unwrap_or_else(|| PaginationParams::new(0, 0))
}

pub fn list_request_to_params(req: ListProductsRequest) -> AppResult<ListProductsParams> {
    Ok(ListProductsParams {
        pagination: parse_pagination(req.pagination),
        filter: ProductFilter {
            product_model_id: req.product_model_id,
            quantity_from: req.quantity_from,
            quantity_to: req.quantity_to,
            sold_from: req.sold_from,
            sold_to: req.sold_to,
            add_price_from: req.add_price_from,
            add_price_to: req.add_price_to,
            is_active: req.is_active,
            metadata: req.metadata,
            date_created_from: proto_to_timestamp(req.date_created_from, "date_created_from")?,
            date_created_to: proto_to_timestamp(req.date_created_to, "date_created_to")?,
        },
    })
}

pub fn create_request_to_new(req: CreateProductRequest) -> NewProduct {
    NewProduct {
        product_model_id: req.product_model_id,
        quantity: req.quantity,
        add_price: req.add_price,
        is_active: req.is_active,
        can_combine: req.can_combine,
        metadata: req.metadata,
        resources: req.resources,
    }
}

pub fn update_request_to_params(req: UpdateProductRequest) -> UpdateProductParams {
    UpdateProductParams {
        id: req.id,
        product_model_id: req.product_model_id,
        quantity: req.quantity,
        sold: req.sold,
        add_price: req.add_price,
        is_active: req.is_active,
        can_combine: req.can_combine,
        metadata: req.metadata,
        resources: req.resources.map(|ResourceList { values }| values),
    }
}
