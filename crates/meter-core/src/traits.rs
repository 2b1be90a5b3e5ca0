//! Storage port consumed by the service layer
//!
//! The service never touches SQL; it talks to whatever implements
//! [`MeterReadingStore`].

use crate::error::AppError;
use crate::models::MeterReading;
use async_trait::async_trait;

/// Persistence operations for meters and their monthly readings
#[async_trait]
pub trait MeterReadingStore: Send + Sync {
    /// Whether a meter with this id exists
    async fn exists_meter(&self, id: i64) -> Result<bool, AppError>;

    /// Whether a reading with this id exists
    async fn exists_reading(&self, id: i64) -> Result<bool, AppError>;

    /// Sum of consumption for a meter and year
    ///
    /// `None` when no reading matched, which is distinct from `Some(0)`.
    async fn sum_consumption(&self, meter_id: i64, year: i32) -> Result<Option<i64>, AppError>;

    /// All readings for a meter and year, ordered by month
    async fn find_readings(&self, meter_id: i64, year: i32) -> Result<Vec<MeterReading>, AppError>;

    /// The reading for a meter, year and month
    async fn find_reading(
        &self,
        meter_id: i64,
        year: i32,
        month: i32,
    ) -> Result<Option<MeterReading>, AppError>;

    /// Insert when `reading.id` is `None`, otherwise overwrite that row
    async fn save(&self, reading: MeterReading) -> Result<MeterReading, AppError>;

    /// Delete a reading by id
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

/// Message used whenever a reading tuple is already taken
pub fn duplicate_reading_message(meter_id: i64, year: i32, month_name: &str) -> String {
    format!(
        "Meter reading for meter id {}, year {} and month {} already exists",
        meter_id, year, month_name
    )
}
