//! Input validation
//!
//! Every check returns the first violation as `AppError::Validation` with
//! the exact client-facing message. Checks that need storage (meter and
//! reading existence) go through the storage port.

use meter_core::{
    models::{CalendarMonth, MeterReadingInput},
    traits::MeterReadingStore,
    AppError, AppResult, Clock,
};
use std::sync::Arc;
use tracing::warn;

/// Reading input that passed every check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedReading {
    pub meter_id: i64,
    pub year: i32,
    pub month: CalendarMonth,
    pub energy_consumed: i32,
}

fn reject<T>(message: impl Into<String>) -> AppResult<T> {
    let message = message.into();
    warn!(%message, "Validation failed");
    Err(AppError::Validation(message))
}

fn require<T>(value: Option<T>, message: &str) -> AppResult<T> {
    match value {
        Some(v) => Ok(v),
        None => reject(message),
    }
}

/// Validates meter ids, calendar bounds, consumption and reading ids
#[derive(Clone)]
pub struct Validator {
    store: Arc<dyn MeterReadingStore>,
    clock: Arc<dyn Clock>,
}

impl Validator {
    /// Create a validator over a store and a clock
    pub fn new(store: Arc<dyn MeterReadingStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Meter id must be present, positive and refer to an existing meter
    pub async fn validate_meter_id(&self, id: impl Into<Option<i64>>) -> AppResult<i64> {
        let id = require(id.into(), "Meter id must not be null")?;
        if id <= 0 {
            return reject("Meter id must be greater than 0");
        }
        if !self.store.exists_meter(id).await? {
            return reject(format!("Meter with id {} does not exist", id));
        }
        Ok(id)
    }

    /// Year must be present, non-negative and not after the current year
    pub fn validate_year(&self, year: impl Into<Option<i32>>) -> AppResult<i32> {
        let year = require(year.into(), "Year must not be null")?;
        if year < 0 {
            return reject("Year must be greater than or equal 0");
        }
        if year > self.clock.current_year() {
            return reject("Year must not be in the future");
        }
        Ok(year)
    }

    /// Month must be present and within 1..=12
    pub fn validate_month(&self, month: impl Into<Option<i32>>) -> AppResult<CalendarMonth> {
        let month = require(month.into(), "Month must not be null")?;
        match CalendarMonth::new(month) {
            Some(m) => Ok(m),
            None => reject("Month must be between 1 and 12"),
        }
    }

    /// Consumption must be present and non-negative
    pub fn validate_energy_consumed(&self, value: impl Into<Option<i32>>) -> AppResult<i32> {
        let value = require(value.into(), "Energy consumed must not be null")?;
        if value < 0 {
            return reject("Energy consumed must greater or equals 0");
        }
        Ok(value)
    }

    /// Full write input: meter id, year, month, then energy; first failure wins
    pub async fn validate_reading_input(
        &self,
        input: Option<&MeterReadingInput>,
    ) -> AppResult<ValidatedReading> {
        let input = require(input, "Meter reading must not be null")?;

        let meter_id = self.validate_meter_id(input.meter_id).await?;
        let year = self.validate_year(input.year)?;
        let month = self.validate_month(input.month)?;
        let energy_consumed = self.validate_energy_consumed(input.energy_consumed)?;

        Ok(ValidatedReading {
            meter_id,
            year,
            month,
            energy_consumed,
        })
    }

    /// Reading id must be present, positive and refer to a stored reading
    pub async fn validate_reading_id(&self, id: impl Into<Option<i64>>) -> AppResult<i64> {
        let id = require(id.into(), "Meter reading id must not be null")?;
        if id <= 0 {
            return reject("Meter reading id must be greater than 0");
        }
        if !self.store.exists_reading(id).await? {
            return reject(format!("Meter reading with id {} does not exist", id));
        }
        Ok(id)
    }
}
