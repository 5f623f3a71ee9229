//! Product repositories

mod memory;
mod postgres;
mod rows;

pub use memory::InMemoryProductRepository;
pub use postgres::{MIGRATOR, PostgresProductRepository};
