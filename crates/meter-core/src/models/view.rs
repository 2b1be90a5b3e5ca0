//! Derived read views
//!
//! Never persisted; built per request from stored readings.

use super::month::CalendarMonth;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Yearly consumption total for one meter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateView {
    pub year: i32,
    pub total: i64,
}

/// Consumption per calendar month for one meter and year
///
/// Only months with a stored reading appear; missing months are not
/// zero-filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyView {
    pub year: i32,
    pub monthly_energy_consumption: BTreeMap<CalendarMonth, i32>,
}

impl MonthlyView {
    /// Consumption recorded for a month number, if present
    pub fn consumption_for(&self, month: i32) -> Option<i32> {
        CalendarMonth::new(month).and_then(|m| self.monthly_energy_consumption.get(&m).copied())
    }
}
