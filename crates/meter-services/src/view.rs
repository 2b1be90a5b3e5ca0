//! View assembly
//!
//! Pure mapping from stored readings to the response shapes. Month keys
//! are full English names and maps iterate in calendar order.

use meter_core::{
    models::{AggregateView, CalendarMonth, MeterReading, MonthlyView},
    AppError, AppResult,
};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tracing::error;

fn stored_month(reading: &MeterReading) -> AppResult<CalendarMonth> {
    CalendarMonth::new(reading.month).ok_or_else(|| {
        error!(id = ?reading.id, month = reading.month, "Stored reading has invalid month");
        AppError::Internal(format!(
            "Stored meter reading {:?} has invalid month {}",
            reading.id, reading.month
        ))
    })
}

/// Yearly total
pub fn aggregate(year: i32, total: i64) -> AggregateView {
    AggregateView { year, total }
}

/// Single reading as a one-entry monthly map
pub fn single_month(reading: &MeterReading) -> AppResult<MonthlyView> {
    let month = stored_month(reading)?;

    Ok(MonthlyView {
        year: reading.year,
        monthly_energy_consumption: BTreeMap::from([(month, reading.energy_consumed)]),
    })
}

/// One entry per reading, keyed by month
///
/// Two readings for the same month break the tuple invariant; that is
/// reported as an internal error instead of letting one value win.
pub fn monthly(year: i32, readings: &[MeterReading]) -> AppResult<MonthlyView> {
    let mut monthly_energy_consumption = BTreeMap::new();

    for reading in readings {
        let month = stored_month(reading)?;
        match monthly_energy_consumption.entry(month) {
            Entry::Vacant(slot) => {
                slot.insert(reading.energy_consumed);
            }
            Entry::Occupied(_) => {
                error!(
                    meter_id = reading.meter_id,
                    year,
                    month = %month,
                    "Duplicate meter readings for one month"
                );
                return Err(AppError::Internal(format!(
                    "Duplicate meter readings for meter id {}, year {} and month {}",
                    reading.meter_id, year, month
                )));
            }
        }
    }

    Ok(MonthlyView {
        year,
        monthly_energy_consumption,
    })
}
