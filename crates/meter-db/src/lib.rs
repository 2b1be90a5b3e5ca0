//! Meter Readings Storage Layer
//!
//! This crate provides the implementations of the storage port defined in
//! meter-core. It includes:
//!
//! - Connection pool management and embedded migrations with sqlx
//! - A PostgreSQL store with a unique constraint on the reading tuple
//! - An in-memory store with the same invariants, for tests and local runs

pub mod pool;
pub mod stores;

pub use pool::{create_pool, run_migrations};
pub use stores::*;

// Re-export commonly used types
pub use meter_core::{AppError, AppResult};
pub use sqlx::PgPool;
