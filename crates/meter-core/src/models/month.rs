//! Calendar month with English display names

use chrono::Month;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// A month of the year, 1 (January) through 12 (December)
///
/// Ordered by calendar position. Serializes as its full English name, so a
/// map keyed by `CalendarMonth` renders as `{"January": .., "February": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarMonth(u8);

impl CalendarMonth {
    /// Build from a month number; `None` outside 1..=12
    pub fn new(month: i32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self(month as u8))
        } else {
            None
        }
    }

    /// Month number, 1-based
    pub fn number(&self) -> i32 {
        i32::from(self.0)
    }

    /// Full English name, e.g. "January"
    pub fn name(&self) -> &'static str {
        MONTHS[usize::from(self.0 - 1)].name()
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CalendarMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MONTHS
            .iter()
            .position(|m| m.name() == s)
            .map(|i| Self(i as u8 + 1))
            .ok_or_else(|| format!("Unknown month name: {}", s))
    }
}

impl Serialize for CalendarMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for CalendarMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(de::Error::custom)
    }
}
