//! Business logic services for meter readings
//!
//! This crate holds the only decision logic in the system: input
//! validation, the create/update/delete guards keyed by the reading tuple,
//! and the yearly and monthly views.
//!
//! # Architecture
//!
//! - `Validator` - fail-fast input checks, one message per failure
//! - `ReadingService` - orchestrates validation, storage and views
//! - `view` - pure mapping from stored rows to response shapes
//!
//! Services hold no mutable state. Storage and the clock are injected as
//! trait objects so tests can swap them.

pub mod reading_service;
pub mod validator;
pub mod view;

pub use reading_service::ReadingService;
pub use validator::{ValidatedReading, Validator};
