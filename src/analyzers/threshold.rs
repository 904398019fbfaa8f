use crate::analyzers::types::YearlyAverage;

/// Annual mean, in Fahrenheit, that a year must exceed to be reported as warm.
pub const WARM_THRESHOLD_F: f64 = 55.0;

/// Returns the first year, in the slice's ascending-year order, whose average
/// is strictly greater than `threshold`. Years without an average never qualify.
pub fn first_year_above(yearly: &[YearlyAverage], threshold: f64) -> Option<YearlyAverage> {
    yearly
        .iter()
        .find(|y| y.avg_temperature_f.is_some_and(|avg| avg > threshold))
        .cloned()
}
