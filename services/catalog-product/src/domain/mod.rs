//! Domain layer

pub mod params;
pub mod product;
pub mod repository;
pub mod service;

pub use params::{ListProductsParams, ProductFilter, UpdateProductParams};
pub use product::{NewProduct, Product};
pub use repository::ProductRepository;
pub use service::ProductService;
