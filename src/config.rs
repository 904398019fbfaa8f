use anyhow::Result;
use serde::Deserialize;

use crate::parser::ColumnNames;

pub const DEFAULT_SOURCE: &str = "data/weather.csv";

/// Where to load readings from and which columns to read.
///
/// Built from the environment (after `.env` is loaded), optionally overlaid
/// by a JSON file whose keys are all optional:
/// ```json
/// {
///   "source": "https://example.com/data/weather.csv",
///   "columns": { "time": "time", "temperature": "Ktemp" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub source: String,
    pub columns: ColumnNames,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            columns: ColumnNames::default(),
        }
    }
}

impl DashboardConfig {
    /// Reads `WEATHER_CSV_SOURCE`, `WEATHER_TIME_COLUMN` and
    /// `WEATHER_TEMPERATURE_COLUMN`, falling back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            source: lookup("WEATHER_CSV_SOURCE").unwrap_or(defaults.source),
            columns: ColumnNames {
                time: lookup("WEATHER_TIME_COLUMN").unwrap_or(defaults.columns.time),
                temperature: lookup("WEATHER_TEMPERATURE_COLUMN")
                    .unwrap_or(defaults.columns.temperature),
            },
        }
    }

    /// Overlays the JSON file at `path`. Keys the file leaves out keep their
    /// current values.
    pub fn overlay_file(self, path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let overlay: ConfigOverlay = serde_json::from_str(&content)?;
        Ok(self.overlay(overlay))
    }

    fn overlay(mut self, overlay: ConfigOverlay) -> Self {
        if let Some(source) = overlay.source {
            self.source = source;
        }
        if let Some(columns) = overlay.columns {
            if let Some(time) = columns.time {
                self.columns.time = time;
            }
            if let Some(temperature) = columns.temperature {
                self.columns.temperature = temperature;
            }
        }
        self
    }

    pub fn with_source(mut self, source: Option<String>) -> Self {
        if let Some(source) = source {
            self.source = source;
        }
        self
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigOverlay {
    source: Option<String>,
    columns: Option<ColumnsOverlay>,
}

#[derive(Debug, Default, Deserialize)]
struct ColumnsOverlay {
    time: Option<String>,
    temperature: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::env;
    use std::fs;

    #[test]
    fn test_defaults_when_env_empty() {
        let config = DashboardConfig::from_lookup(|_| None);
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.source, "data/weather.csv");
        assert_eq!(config.columns.temperature, "Ktemp");
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("WEATHER_CSV_SOURCE", "https://example.com/w.csv"),
            ("WEATHER_TEMPERATURE_COLUMN", "kelvin"),
        ]
        .into_iter()
        .collect();
        let config = DashboardConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.source, "https://example.com/w.csv");
        assert_eq!(config.columns.time, "time");
        assert_eq!(config.columns.temperature, "kelvin");
    }

    #[test]
    fn test_overlay_partial_json() {
        let path = format!("{}/temperature_trends_config_test.json", env::temp_dir().display());
        fs::write(&path, r#"{ "columns": { "time": "timestamp" } }"#).unwrap();

        let config = DashboardConfig::default().overlay_file(&path).unwrap();
        assert_eq!(config.source, DEFAULT_SOURCE);
        assert_eq!(config.columns.time, "timestamp");
        assert_eq!(config.columns.temperature, "Ktemp");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_json_overlay_keeps_env_values() {
        let config = DashboardConfig::from_lookup(|k| {
            (k == "WEATHER_TEMPERATURE_COLUMN").then(|| "kelvin".to_string())
        });

        let path = format!("{}/temperature_trends_config_env_test.json", env::temp_dir().display());
        fs::write(&path, r#"{ "source": "x.csv" }"#).unwrap();

        let config = config.overlay_file(&path).unwrap();
        assert_eq!(config.source, "x.csv");
        assert_eq!(config.columns.time, "time");
        assert_eq!(config.columns.temperature, "kelvin");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_overlay_file_missing_fails() {
        let result = DashboardConfig::default().overlay_file("/nonexistent/config.json");
        assert!(result.is_err());
    }

    #[test]
    fn test_with_source() {
        let config = DashboardConfig::default().with_source(Some("other.csv".into()));
        assert_eq!(config.source, "other.csv");
        let config = config.with_source(None);
        assert_eq!(config.source, "other.csv");
    }
}
