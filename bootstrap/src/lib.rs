//! nexus-bootstrap - shared service startup
//!
//! Every service binary goes through [`run_server`]: configuration, tracing,
//! metrics, backing infrastructure, the HTTP health server and the gRPC server
//! with graceful shutdown.

pub mod health;
pub mod infrastructure;
pub mod metrics;
pub mod reflection;
mod runtime;
mod starter;

pub use infrastructure::Infrastructure;
pub use runtime::*;
pub use starter::*;
