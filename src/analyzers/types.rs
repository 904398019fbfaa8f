//! Data types produced by the aggregation pipeline.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::reading::{Month, SkipReason};

/// Mean temperature for one calendar month across all years.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyAverage {
    pub month: Month,
    pub avg_temperature_f: Option<f64>,
    pub ordinal: usize,
}

/// Mean temperature for one observed calendar year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyAverage {
    pub year: i32,
    pub avg_temperature_f: Option<f64>,
}

/// Mean temperature for one observed (year, month) pair.
///
/// `year_month` is pinned to the 15th so the point sits mid-month on a time axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearMonthAverage {
    pub year_month: NaiveDate,
    pub year: i32,
    pub month: Month,
    pub avg_temperature_f: Option<f64>,
}

impl YearMonthAverage {
    /// Sortable bucket key, e.g. `2020-06`.
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year_month.year(), self.year_month.month())
    }
}

/// Everything the presentation layer reads after one load.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemperatureSummary {
    pub monthly_averages: Vec<MonthlyAverage>,
    pub yearly_averages: Vec<YearlyAverage>,
    pub year_month_averages: Vec<YearMonthAverage>,
    pub threshold_finding: Option<YearlyAverage>,

    // row accounting
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub skipped_by_reason: BTreeMap<SkipReason, usize>,
}

impl TemperatureSummary {
    pub fn rows_used(&self) -> usize {
        self.rows_read - self.rows_skipped
    }
}
