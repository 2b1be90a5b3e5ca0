//! Meter Readings Core Library
//!
//! This crate provides the foundational types, traits, and error handling
//! for the meter readings service. It includes:
//!
//! - Domain models (MeterReading, views, calendar months)
//! - The storage port implemented by the database layer
//! - The clock abstraction used for calendar bounds
//! - Unified error handling with HTTP response mapping
//! - Application configuration

pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod traits;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::AppConfig;
pub use error::AppError;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
