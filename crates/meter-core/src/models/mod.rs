//! Domain models for meter readings
//!
//! This module contains the stored reading, the write input, and the
//! derived views returned by read operations.

pub mod month;
pub mod reading;
pub mod view;

pub use month::CalendarMonth;
pub use reading::{MeterReading, MeterReadingInput};
pub use view::{AggregateView, MonthlyView};
