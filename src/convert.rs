//! Kelvin conversions used by the aggregation pass and the converter widget.

use serde::Serialize;
use std::fmt;

/// Offset between the Kelvin and Celsius scales.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Converts Kelvin to Fahrenheit. Accepts any input, physically plausible or not.
pub fn kelvin_to_fahrenheit(k: f64) -> f64 {
    (k - KELVIN_OFFSET) * (9.0 / 5.0) + 32.0
}

/// Converts Kelvin to Celsius.
pub fn kelvin_to_celsius(k: f64) -> f64 {
    k - KELVIN_OFFSET
}

pub fn celsius_to_kelvin(c: f64) -> f64 {
    c + KELVIN_OFFSET
}

/// State of the interactive converter: one Kelvin input and its derived values.
///
/// Values are kept at full precision; only [`fmt::Display`] rounds to two
/// decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Conversion {
    pub kelvin: f64,
    pub celsius: f64,
    pub fahrenheit: f64,
}

impl Conversion {
    pub fn from_kelvin(kelvin: f64) -> Self {
        Self {
            kelvin,
            celsius: kelvin_to_celsius(kelvin),
            fahrenheit: kelvin_to_fahrenheit(kelvin),
        }
    }

    /// Recomputes from raw user input. Unparseable input yields NaN values.
    pub fn from_input(input: &str) -> Self {
        let kelvin = input.trim().parse::<f64>().unwrap_or(f64::NAN);
        Self::from_kelvin(kelvin)
    }
}

impl Default for Conversion {
    fn default() -> Self {
        Self::from_kelvin(KELVIN_OFFSET)
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Kelvin: {}  Celsius: {:.2}  Fahrenheit: {:.2}",
            self.kelvin, self.celsius, self.fahrenheit
        )
    }
}
