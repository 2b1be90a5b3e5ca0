//! Meter reading model
//!
//! One stored row per meter and calendar month, plus the loosely-typed
//! input accepted from clients before validation.

use serde::{Deserialize, Serialize};

/// Stored monthly reading
///
/// At most one reading exists per `(meter_id, year, month)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeterReading {
    /// Surrogate identifier, `None` until persisted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Meter this reading belongs to
    pub meter_id: i64,

    /// Calendar year
    pub year: i32,

    /// Calendar month, 1-12
    pub month: i32,

    /// Energy consumed during the month
    pub energy_consumed: i32,
}

impl MeterReading {
    /// Create an unsaved reading
    pub fn new(meter_id: i64, year: i32, month: i32, energy_consumed: i32) -> Self {
        Self {
            id: None,
            meter_id,
            year,
            month,
            energy_consumed,
        }
    }

    /// Same reading carrying a storage id
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Natural key `(meter_id, year, month)`
    #[inline]
    pub fn tuple(&self) -> (i64, i32, i32) {
        (self.meter_id, self.year, self.month)
    }
}

/// Write request for a reading
///
/// Every field is optional so that absent values reach validation and
/// produce the matching "must not be null" message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeterReadingInput {
    /// Ignored by create and update; the tuple selects the row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meter_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_consumed: Option<i32>,
}

impl MeterReadingInput {
    /// Fully populated input
    pub fn new(meter_id: i64, year: i32, month: i32, energy_consumed: i32) -> Self {
        Self {
            id: None,
            meter_id: Some(meter_id),
            year: Some(year),
            month: Some(month),
            energy_consumed: Some(energy_consumed),
        }
    }
}
