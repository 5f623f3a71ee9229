//! catalog-product service library

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;

// Proto generated code modules
pub mod common {
    pub mod v1 {
        tonic::include_proto!("common.v1");
    }
}

pub mod catalog {
    pub mod product {
        pub mod v1 {
            tonic::include_proto!("catalog.product.v1");
        }
    }
}

pub use catalog::product::v1 as proto;

pub const FILE_DESCRIPTOR_SET: &[u8] =
    tonic::include_file_descriptor_set!("catalog_product_descriptor");
