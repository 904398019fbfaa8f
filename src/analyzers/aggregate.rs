use crate::analyzers::threshold::{WARM_THRESHOLD_F, first_year_above};
use crate::analyzers::types::{MonthlyAverage, TemperatureSummary, YearMonthAverage, YearlyAverage};
use crate::analyzers::utility::BucketAccumulator;
use crate::reading::{Month, RawReading, RowOutcome, SkipReason};
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

struct YearMonthBucket {
    year: i32,
    month: Month,
    acc: BucketAccumulator,
}

/// Folds rows into monthly, yearly and year-month Fahrenheit means.
///
/// Rows that fail validation are counted per reason and otherwise ignored.
/// The result depends only on which (year, month) each valid row falls in,
/// never on row order.
pub fn aggregate_readings<'a, I>(rows: I) -> TemperatureSummary
where
    I: IntoIterator<Item = &'a RawReading>,
{
    let mut monthly = [BucketAccumulator::default(); 12];
    let mut yearly: HashMap<i32, BucketAccumulator> = HashMap::new();
    let mut year_month: BTreeMap<String, YearMonthBucket> = BTreeMap::new();

    let mut rows_read: usize = 0;
    let mut skipped_by_reason: BTreeMap<SkipReason, usize> = BTreeMap::new();

    for row in rows {
        rows_read += 1;

        let reading = match row.validate() {
            RowOutcome::Valid(reading) => reading,
            RowOutcome::Skipped(reason) => {
                *skipped_by_reason.entry(reason).or_insert(0) += 1;
                continue;
            }
        };

        let year = reading.date.year();
        let month = Month::of(reading.date);

        monthly[month.ordinal()].add(reading.fahrenheit);
        yearly.entry(year).or_default().add(reading.fahrenheit);

        let key = format!("{:04}-{:02}", year, month.ordinal() + 1);
        year_month
            .entry(key)
            .or_insert_with(|| YearMonthBucket {
                year,
                month,
                acc: BucketAccumulator::default(),
            })
            .acc
            .add(reading.fahrenheit);
    }

    let monthly_averages = Month::ALL
        .iter()
        .map(|&month| MonthlyAverage {
            month,
            avg_temperature_f: monthly[month.ordinal()].mean(),
            ordinal: month.ordinal(),
        })
        .collect();

    let mut yearly_averages: Vec<YearlyAverage> = yearly
        .into_iter()
        .map(|(year, acc)| YearlyAverage {
            year,
            avg_temperature_f: acc.mean(),
        })
        .collect();
    yearly_averages.sort_by_key(|y| y.year);

    let mut year_month_averages: Vec<YearMonthAverage> = year_month
        .into_values()
        .filter_map(|bucket| {
            let month_number = bucket.month.ordinal() as u32 + 1;
            let year_month = NaiveDate::from_ymd_opt(bucket.year, month_number, 15)?;
            Some(YearMonthAverage {
                year_month,
                year: bucket.year,
                month: bucket.month,
                avg_temperature_f: bucket.acc.mean(),
            })
        })
        .collect();
    // string keys only order correctly for four-digit years
    year_month_averages.sort_by_key(|ym| ym.year_month);

    let threshold_finding = first_year_above(&yearly_averages, WARM_THRESHOLD_F);

    let rows_skipped: usize = skipped_by_reason.values().sum();
    if rows_skipped > 0 {
        warn!(
            rows_read,
            rows_skipped,
            reasons = ?skipped_by_reason,
            "Skipped rows without a usable timestamp or temperature"
        );
    }
    debug!(
        rows_read,
        years = yearly_averages.len(),
        year_months = year_month_averages.len(),
        warm_year = ?threshold_finding.as_ref().map(|y| y.year),
        "Aggregation complete"
    );

    TemperatureSummary {
        monthly_averages,
        yearly_averages,
        year_month_averages,
        threshold_finding,
        rows_read,
        rows_skipped,
        skipped_by_reason,
    }
}
