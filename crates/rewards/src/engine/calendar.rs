use chrono::{Datelike, NaiveDate};
use std::fmt;

/// Fixed English month table. Grouping keys and sort order must not vary
/// with the host locale.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Position of a month name in the calendar, January = 0.
pub fn month_index(name: &str) -> usize {
    MONTH_NAMES
        .iter()
        .position(|month| *month == name)
        .unwrap_or(usize::MAX)
}

/// Calendar-month grouping bucket.
///
/// Built from the date components directly, never through timezone
/// arithmetic, so the same date string always lands in the same bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
}

impl MonthBucket {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Canonical zero-padded `MM/YYYY` key.
    pub fn key(&self) -> String {
        self.to_string()
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }
}

impl fmt::Display for MonthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
