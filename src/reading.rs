//! Row records and their validation into Fahrenheit readings.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::convert::kelvin_to_fahrenheit;

/// Temperature cell after dynamic coercion: finite numeric text becomes a
/// number, anything else (including `NaN` and `inf`) is kept as text.
#[derive(Debug, Clone, PartialEq)]
pub enum KelvinField {
    Number(f64),
    Text(String),
}

impl KelvinField {
    pub fn coerce(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => KelvinField::Number(v),
            _ => KelvinField::Text(trimmed.to_string()),
        })
    }
}

/// One CSV row, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawReading {
    pub time: Option<String>,
    pub kelvin: Option<KelvinField>,
}

/// A row that passed validation, already converted to Fahrenheit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidReading {
    pub date: NaiveDate,
    pub fahrenheit: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MissingTime,
    MissingTemperature,
    NonNumericTemperature,
    InvalidTimestamp,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Valid(ValidReading),
    Skipped(SkipReason),
}

impl RawReading {
    pub fn new(time: &str, kelvin: f64) -> Self {
        Self {
            time: Some(time.to_string()),
            kelvin: Some(KelvinField::Number(kelvin)),
        }
    }

    /// Classifies the row. Only presence, numeric temperature and a parseable
    /// date are checked; out-of-range temperatures are accepted.
    pub fn validate(&self) -> RowOutcome {
        let time = match self.time.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => return RowOutcome::Skipped(SkipReason::MissingTime),
        };

        let kelvin = match &self.kelvin {
            Some(KelvinField::Number(v)) if v.is_finite() => *v,
            Some(KelvinField::Number(_) | KelvinField::Text(_)) => {
                return RowOutcome::Skipped(SkipReason::NonNumericTemperature);
            }
            None => return RowOutcome::Skipped(SkipReason::MissingTemperature),
        };

        match parse_timestamp(time) {
            Some(date) => RowOutcome::Valid(ValidReading {
                date,
                fahrenheit: kelvin_to_fahrenheit(kelvin),
            }),
            None => RowOutcome::Skipped(SkipReason::InvalidTimestamp),
        }
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parses a timestamp into the calendar date it names.
///
/// Offsets are not applied: `2020-06-30T23:00:00-05:00` is June 30.
pub fn parse_timestamp(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
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

    /// Zero-based position in the calendar year.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::ALL.get(ordinal).copied()
    }

    pub fn of(date: NaiveDate) -> Self {
        // month0() is always in 0..12
        Self::ALL[date.month0() as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
