//! Temperature aggregation.
//!
//! This module folds validated readings into monthly, yearly and year-month
//! Fahrenheit means and derives the first year whose mean crosses
//! [`threshold::WARM_THRESHOLD_F`].

pub mod aggregate;
pub mod threshold;
pub mod types;
pub mod utility;
