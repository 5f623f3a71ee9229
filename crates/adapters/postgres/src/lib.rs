//! nexus-adapter-postgres - PostgreSQL pool and migrations

mod connection;
mod migration;

pub use connection::*;
pub use migration::*;
