//! Meter reading DTOs
//!
//! Request bodies reuse [`MeterReadingInput`]; responses are the core views.

use meter_core::{models::MeterReadingInput, AppError, AppResult};
use serde::{Deserialize, Serialize};

pub use meter_core::models::{AggregateView, MonthlyView};

/// Path `/{id}/{year}`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MeterYearPath {
    /// Meter id
    pub id: i64,
    /// Calendar year
    pub year: i32,
}

/// Path `/{id}/{year}/{month}`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MeterYearMonthPath {
    /// Meter id
    pub id: i64,
    /// Calendar year
    pub year: i32,
    /// Calendar month, 1-12
    pub month: i32,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "healthy" when the process answers
    pub status: String,
    /// Service name
    pub service: String,
    /// Crate version
    pub version: String,
}

/// Parse a write request body
///
/// An empty body and a JSON `null` both mean "no reading", which the
/// validator rejects with its own message.
pub fn parse_reading_body(body: &[u8]) -> AppResult<Option<MeterReadingInput>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice::<Option<MeterReadingInput>>(body)
        .map_err(|e| AppError::Validation(format!("Malformed meter reading: {}", e)))
}
