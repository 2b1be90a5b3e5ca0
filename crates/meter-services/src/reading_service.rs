//! Reading service
//!
//! Orchestrates validation, storage and view assembly for every meter
//! reading operation. Create and update are guarded by the natural tuple
//! `(meter_id, year, month)`; the surrogate id on the input is ignored.

use crate::validator::{ValidatedReading, Validator};
use crate::view;
use meter_core::{
    models::{AggregateView, MeterReading, MeterReadingInput, MonthlyView},
    traits::{duplicate_reading_message, MeterReadingStore},
    AppError, AppResult, Clock,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

fn readings_not_found(meter_id: i64, year: i32) -> AppError {
    AppError::NotFound(format!(
        "Meter readings for meter id {} and year {} does not exist",
        meter_id, year
    ))
}

fn reading_missing_message(meter_id: i64, year: i32, month_name: &str) -> String {
    format!(
        "Meter reading for meter id {}, year {} and month {} does not exist",
        meter_id, year, month_name
    )
}

/// Meter reading operations
#[derive(Clone)]
pub struct ReadingService {
    store: Arc<dyn MeterReadingStore>,
    validator: Validator,
}

impl ReadingService {
    /// Create a new reading service
    pub fn new(store: Arc<dyn MeterReadingStore>, clock: Arc<dyn Clock>) -> Self {
        let validator = Validator::new(Arc::clone(&store), clock);
        Self { store, validator }
    }

    /// Total consumption for a meter over one year
    #[instrument(skip(self))]
    pub async fn aggregate_by_meter_and_year(
        &self,
        meter_id: i64,
        year: i32,
    ) -> AppResult<AggregateView> {
        let meter_id = self.validator.validate_meter_id(meter_id).await?;
        let year = self.validator.validate_year(year)?;

        let total = self
            .store
            .sum_consumption(meter_id, year)
            .await?
            .ok_or_else(|| readings_not_found(meter_id, year))?;

        debug!(meter_id, year, total, "Aggregated consumption");
        Ok(view::aggregate(year, total))
    }

    /// Consumption per month for a meter over one year
    #[instrument(skip(self))]
    pub async fn find_by_meter_and_year(&self, meter_id: i64, year: i32) -> AppResult<MonthlyView> {
        let meter_id = self.validator.validate_meter_id(meter_id).await?;
        let year = self.validator.validate_year(year)?;

        let readings = self.store.find_readings(meter_id, year).await?;
        if readings.is_empty() {
            return Err(readings_not_found(meter_id, year));
        }

        debug!(meter_id, year, count = readings.len(), "Found readings");
        view::monthly(year, &readings)
    }

    /// Consumption for a single meter-month
    #[instrument(skip(self))]
    pub async fn find_by_meter_and_year_and_month(
        &self,
        meter_id: i64,
        year: i32,
        month: i32,
    ) -> AppResult<MonthlyView> {
        let meter_id = self.validator.validate_meter_id(meter_id).await?;
        let year = self.validator.validate_year(year)?;
        let month = self.validator.validate_month(month)?;

        let reading = self
            .store
            .find_reading(meter_id, year, month.number())
            .await?
            .ok_or_else(|| {
                AppError::NotFound(reading_missing_message(meter_id, year, month.name()))
            })?;

        view::single_month(&reading)
    }

    /// Create a reading; the tuple must be free
    ///
    /// Returns the input as received.
    #[instrument(skip(self))]
    pub async fn save(&self, input: Option<MeterReadingInput>) -> AppResult<MeterReadingInput> {
        let validated = self.validator.validate_reading_input(input.as_ref()).await?;

        if self.find_existing(&validated).await?.is_some() {
            let message = duplicate_reading_message(
                validated.meter_id,
                validated.year,
                validated.month.name(),
            );
            warn!(%message, "Meter reading create rejected");
            return Err(AppError::Validation(message));
        }

        let reading = MeterReading::new(
            validated.meter_id,
            validated.year,
            validated.month.number(),
            validated.energy_consumed,
        );
        let saved = self.store.save(reading).await?;

        info!(id = ?saved.id, tuple = ?saved.tuple(), "Meter reading created");
        Ok(input.unwrap_or_default())
    }

    /// Replace the consumption of an existing reading; the tuple must exist
    ///
    /// Returns the input as received.
    #[instrument(skip(self))]
    pub async fn update(&self, input: Option<MeterReadingInput>) -> AppResult<MeterReadingInput> {
        let validated = self.validator.validate_reading_input(input.as_ref()).await?;

        let existing = match self.find_existing(&validated).await? {
            Some(existing) => existing,
            None => {
                let message = reading_missing_message(
                    validated.meter_id,
                    validated.year,
                    validated.month.name(),
                );
                warn!(%message, "Meter reading update rejected");
                return Err(AppError::Validation(message));
            }
        };

        let reading = MeterReading {
            energy_consumed: validated.energy_consumed,
            ..existing
        };
        let saved = self.store.save(reading).await?;

        info!(id = ?saved.id, tuple = ?saved.tuple(), "Meter reading updated");
        Ok(input.unwrap_or_default())
    }

    /// Delete a reading by id
    #[instrument(skip(self))]
    pub async fn delete(&self, reading_id: i64) -> AppResult<()> {
        let reading_id = self.validator.validate_reading_id(reading_id).await?;

        self.store.delete(reading_id).await?;

        info!(id = reading_id, "Meter reading deleted");
        Ok(())
    }

    async fn find_existing(&self, reading: &ValidatedReading) -> AppResult<Option<MeterReading>> {
        self.store
            .find_reading(reading.meter_id, reading.year, reading.month.number())
            .await
    }
}
