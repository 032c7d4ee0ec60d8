//! # Postboard Infrastructure
//!
//! Concrete implementations of the ports defined in `postboard-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL post store via SeaORM
//!
//! Without `postgres` only the in-memory store is built.

pub mod database;
pub mod memory;

pub use memory::InMemoryPostRepository;

pub use database::DatabaseConfig;

#[cfg(feature = "postgres")]
pub use database::{DatabaseConnections, PostgresPostRepository};
