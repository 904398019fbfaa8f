//! Output formatting for temperature summaries.
//!
//! Supports plain-text dashboard tabs, pretty-printing, JSON serialization,
//! and CSV export of the three series.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::analyzers::threshold::WARM_THRESHOLD_F;
use crate::analyzers::types::TemperatureSummary;
use crate::convert::Conversion;
use crate::load::LoadState;

/// Points kept per year-month entry on the trends tab.
pub const TREND_STEP: usize = 12;

/// Dashboard tabs. Monthly is shown first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Tab {
    #[default]
    Monthly,
    Yearly,
    Trends,
    Converter,
}

/// Keeps every `step`-th entry, starting with the first.
pub fn downsample<T>(series: &[T], step: usize) -> Vec<&T> {
    series.iter().step_by(step.max(1)).collect()
}

fn fmt_temp(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}°F"),
        None => "-".to_string(),
    }
}

/// Renders one tab for the current load state.
///
/// The converter tab does not depend on loaded data.
pub fn render_tab(state: &LoadState, tab: Tab) -> String {
    match tab {
        Tab::Monthly => with_summary(state, render_monthly),
        Tab::Yearly => with_summary(state, render_yearly),
        Tab::Trends => with_summary(state, render_trends),
        Tab::Converter => render_converter(&Conversion::default()),
    }
}

fn with_summary(state: &LoadState, render: fn(&TemperatureSummary) -> String) -> String {
    match state {
        LoadState::Loading => "Loading...\n".to_string(),
        LoadState::Failed(_) => "No data available.\n".to_string(),
        LoadState::Loaded(summary) => render(summary),
    }
}

fn render_monthly(summary: &TemperatureSummary) -> String {
    let mut out = String::from("Monthly Average Temperatures (in Fahrenheit)\n");
    for m in &summary.monthly_averages {
        out.push_str(&format!("{:<10} {:>10}\n", m.month.name(), fmt_temp(m.avg_temperature_f)));
    }
    out
}

fn render_yearly(summary: &TemperatureSummary) -> String {
    let finding = summary
        .threshold_finding
        .as_ref()
        .map(|y| y.year.to_string())
        .unwrap_or_else(|| "None found".to_string());

    let mut out = format!(
        "Yearly Average Temperatures (in Fahrenheit)\n\
         First year with average temperature above {WARM_THRESHOLD_F}°F: {finding}\n"
    );
    for y in &summary.yearly_averages {
        out.push_str(&format!("{:<6} {:>10}\n", y.year, fmt_temp(y.avg_temperature_f)));
    }
    out
}

fn render_trends(summary: &TemperatureSummary) -> String {
    let mut out = String::from("Temperature Trend Over Time (in Fahrenheit)\n");
    for ym in downsample(&summary.year_month_averages, TREND_STEP) {
        out.push_str(&format!("{:<8} {:>10}\n", ym.key(), fmt_temp(ym.avg_temperature_f)));
    }
    out
}

/// Renders the converter widget for one input value.
pub fn render_converter(conversion: &Conversion) -> String {
    format!(
        "Temperature Converter\n{conversion}\n°F = (K - 273.15) × 9/5 + 32\n"
    )
}

/// Logs the summary using Rust's debug pretty-print format.
pub fn print_pretty(summary: &TemperatureSummary) {
    debug!("{:#?}", summary);
}

/// Logs the summary as pretty-printed JSON.
pub fn print_json(summary: &TemperatureSummary) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `monthly.csv`, `yearly.csv` and `year_month.csv` into `dir`,
/// creating it if needed. Returns the written paths.
pub fn write_series_csv(dir: &str, summary: &TemperatureSummary) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let dir = Path::new(dir);

    let monthly = dir.join("monthly.csv");
    let yearly = dir.join("yearly.csv");
    let year_month = dir.join("year_month.csv");

    write_csv(&monthly, &summary.monthly_averages)?;
    write_csv(&yearly, &summary.yearly_averages)?;
    write_csv(&year_month, &summary.year_month_averages)?;

    debug!(dir = %dir.display(), "Series CSVs written");
    Ok(vec![monthly, yearly, year_month])
}
