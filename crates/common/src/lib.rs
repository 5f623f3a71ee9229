//! nexus-common - shared value types and helpers

pub mod retry;
pub mod types;

pub use retry::*;
pub use types::*;
