//! In-memory meter reading store
//!
//! Keeps meters and readings behind a single lock and enforces the same
//! invariants as the PostgreSQL schema: one reading per tuple and a
//! reference to an existing meter.

use async_trait::async_trait;
use meter_core::{
    models::{CalendarMonth, MeterReading},
    traits::{duplicate_reading_message, MeterReadingStore},
    AppError, AppResult,
};
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, instrument};

#[derive(Debug, Default)]
struct State {
    meters: BTreeSet<i64>,
    readings: BTreeMap<i64, MeterReading>,
    next_id: i64,
}

impl State {
    fn tuple_taken(&self, reading: &MeterReading) -> bool {
        self.readings
            .values()
            .any(|r| r.tuple() == reading.tuple() && r.id != reading.id)
    }
}

/// Storage port backed by process memory
#[derive(Debug, Default)]
pub struct InMemoryMeterReadingStore {
    state: RwLock<State>,
}

impl InMemoryMeterReadingStore {
    /// Empty store with no meters
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the given meter ids
    pub fn with_meters(ids: impl IntoIterator<Item = i64>) -> Self {
        let store = Self::new();
        store.state.write().meters.extend(ids);
        store
    }

    /// Register a meter
    pub fn insert_meter(&self, id: i64) {
        self.state.write().meters.insert(id);
    }

    /// Number of stored readings
    pub fn reading_count(&self) -> usize {
        self.state.read().readings.len()
    }
}

#[async_trait]
impl MeterReadingStore for InMemoryMeterReadingStore {
    async fn exists_meter(&self, id: i64) -> AppResult<bool> {
        Ok(self.state.read().meters.contains(&id))
    }

    async fn exists_reading(&self, id: i64) -> AppResult<bool> {
        Ok(self.state.read().readings.contains_key(&id))
    }

    async fn sum_consumption(&self, meter_id: i64, year: i32) -> AppResult<Option<i64>> {
        let state = self.state.read();
        let mut matched = state
            .readings
            .values()
            .filter(|r| r.meter_id == meter_id && r.year == year)
            .peekable();

        if matched.peek().is_none() {
            return Ok(None);
        }

        Ok(Some(matched.map(|r| i64::from(r.energy_consumed)).sum()))
    }

    async fn find_readings(&self, meter_id: i64, year: i32) -> AppResult<Vec<MeterReading>> {
        let mut readings: Vec<MeterReading> = self
            .state
            .read()
            .readings
            .values()
            .filter(|r| r.meter_id == meter_id && r.year == year)
            .cloned()
            .collect();

        readings.sort_by_key(|r| (r.month, r.id));
        Ok(readings)
    }

    async fn find_reading(
        &self,
        meter_id: i64,
        year: i32,
        month: i32,
    ) -> AppResult<Option<MeterReading>> {
        Ok(self
            .state
            .read()
            .readings
            .values()
            .find(|r| r.tuple() == (meter_id, year, month))
            .cloned())
    }

    #[instrument(skip(self))]
    async fn save(&self, mut reading: MeterReading) -> AppResult<MeterReading> {
        let mut state = self.state.write();

        if !state.meters.contains(&reading.meter_id) {
            return Err(AppError::Validation(format!(
                "Meter with id {} does not exist",
                reading.meter_id
            )));
        }

        if state.tuple_taken(&reading) {
            let month = CalendarMonth::new(reading.month)
                .map(|m| m.name().to_string())
                .unwrap_or_else(|| reading.month.to_string());
            return Err(AppError::Validation(duplicate_reading_message(
                reading.meter_id,
                reading.year,
                &month,
            )));
        }

        let id = match reading.id {
            Some(id) if state.readings.contains_key(&id) => id,
            Some(id) => {
                return Err(AppError::NotFound(format!(
                    "Meter reading with id {} does not exist",
                    id
                )))
            }
            None => {
                state.next_id += 1;
                state.next_id
            }
        };

        reading.id = Some(id);
        state.readings.insert(id, reading.clone());
        debug!(id, "Stored meter reading");

        Ok(reading)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> AppResult<()> {
        match self.state.write().readings.remove(&id) {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!(
                "Meter reading with id {} does not exist",
                id
            ))),
        }
    }
}
