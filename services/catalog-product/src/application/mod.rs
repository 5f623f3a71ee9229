//! Application layer - product business rules

mod catalog;

pub use catalog::ProductCatalog;
