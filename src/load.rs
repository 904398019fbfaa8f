//! The single load of a dashboard session: retrieve, parse, aggregate.

use thiserror::Error;
use tracing::{error, info};

use crate::analyzers::aggregate::aggregate_readings;
use crate::analyzers::types::TemperatureSummary;
use crate::config::DashboardConfig;
use crate::fetch::{HttpClient, read_source};
use crate::parser::{ParseError, parse_readings};

#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be fetched or read.
    #[error("failed to retrieve {source_name}: {cause:#}")]
    Retrieval {
        source_name: String,
        cause: anyhow::Error,
    },

    #[error("failed to parse CSV: {0}")]
    Parse(#[from] ParseError),
}

/// What the presentation shell shows while and after loading.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Loaded(TemperatureSummary),
    /// Loading ended without data.
    Failed(String),
}

impl LoadState {
    pub fn summary(&self) -> Option<&TemperatureSummary> {
        match self {
            LoadState::Loaded(summary) => Some(summary),
            _ => None,
        }
    }
}

/// Retrieves and aggregates the configured source. Runs once; no retry.
#[tracing::instrument(skip(client, config), fields(source = %config.source))]
pub async fn load_summary<C: HttpClient>(
    client: &C,
    config: &DashboardConfig,
) -> Result<TemperatureSummary, LoadError> {
    let bytes = read_source(client, &config.source)
        .await
        .map_err(|cause| LoadError::Retrieval {
            source_name: config.source.clone(),
            cause,
        })?;

    let rows = parse_readings(&bytes, &config.columns)?;
    let summary = aggregate_readings(&rows);

    info!(
        rows_read = summary.rows_read,
        rows_skipped = summary.rows_skipped,
        years = summary.yearly_averages.len(),
        "Temperature data loaded"
    );
    Ok(summary)
}

/// Runs [`load_summary`] and folds the outcome into a [`LoadState`],
/// logging failures.
pub async fn load_state<C: HttpClient>(client: &C, config: &DashboardConfig) -> LoadState {
    match load_summary(client, config).await {
        Ok(summary) => LoadState::Loaded(summary),
        Err(e) => {
            error!(error = %e, "Loading temperature data failed");
            LoadState::Failed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::BasicClient;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn config_for(path: &str) -> DashboardConfig {
        DashboardConfig::default().with_source(Some(path.to_string()))
    }

    #[tokio::test]
    async fn test_load_local_csv() {
        let path = temp_path("temperature_trends_load_ok.csv");
        fs::write(&path, "time,Ktemp\n2020-06-15,300\nnot-a-date,300\n").unwrap();

        let summary = load_summary(&BasicClient::new(), &config_for(&path))
            .await
            .unwrap();
        assert_eq!(summary.rows_read, 2);
        assert_eq!(summary.rows_skipped, 1);
        assert_eq!(summary.yearly_averages.len(), 1);

        fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_is_retrieval_failure() {
        let config = config_for("/nonexistent/temperature_trends.csv");
        let result = load_summary(&BasicClient::new(), &config).await;
        assert!(matches!(result, Err(LoadError::Retrieval { .. })));
    }

    #[tokio::test]
    async fn test_bad_csv_is_parse_failure() {
        let path = temp_path("temperature_trends_load_bad.csv");
        fs::write(&path, b"time,Ktemp\n\xFF,300\n").unwrap();

        let result = load_summary(&BasicClient::new(), &config_for(&path)).await;
        assert!(matches!(result, Err(LoadError::Parse(_))));

        fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_empty_state() {
        let config = config_for("/nonexistent/temperature_trends.csv");
        let state = load_state(&BasicClient::new(), &config).await;

        assert!(matches!(state, LoadState::Failed(_)));
        assert_eq!(state.summary(), None);
    }
}
