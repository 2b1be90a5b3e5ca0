//! Source of "now" for calendar validation

use chrono::{Datelike, Utc};

/// Provides the current calendar year
pub trait Clock: Send + Sync {
    /// Current calendar year
    fn current_year(&self) -> i32;
}

/// Wall-clock implementation, read on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_year(&self) -> i32 {
        Utc::now().year()
    }
}

/// Clock pinned to a single year
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i32);

impl Clock for FixedClock {
    fn current_year(&self) -> i32 {
        self.0
    }
}
