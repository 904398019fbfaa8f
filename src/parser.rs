//! CSV parser for temperature exports.

use thiserror::Error;
use tracing::debug;

use crate::reading::{KelvinField, RawReading};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("CSV has no header row")]
    MissingHeader,

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Names of the columns carrying the timestamp and the Kelvin temperature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub time: String,
    pub temperature: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            time: "time".to_string(),
            temperature: "Ktemp".to_string(),
        }
    }
}

/// Decodes CSV bytes into raw rows.
///
/// A named column that is absent from the header is not an error: every row
/// simply lacks that field and is dropped during validation. Blank lines are
/// ignored and short rows yield absent fields.
///
/// # Errors
///
/// Returns an error if the input has no header or cannot be tokenized
/// (including invalid UTF-8).
pub fn parse_readings(bytes: &[u8], columns: &ColumnNames) -> Result<Vec<RawReading>, ParseError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(ParseError::MissingHeader);
    }

    let time_idx = headers.iter().position(|h| h == columns.time);
    let temp_idx = headers.iter().position(|h| h == columns.temperature);
    debug!(?time_idx, ?temp_idx, columns = headers.len(), "CSV header read");

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;

        let time = time_idx
            .and_then(|i| record.get(i))
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        let kelvin = temp_idx
            .and_then(|i| record.get(i))
            .and_then(KelvinField::coerce);

        rows.push(RawReading { time, kelvin });
    }

    Ok(rows)
}
