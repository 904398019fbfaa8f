//! CLI entry point for the temperature trends dashboard.
//!
//! Loads a CSV of Kelvin readings once, then renders monthly, yearly and
//! year-month Fahrenheit averages, exports them, or runs the converter.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::io::BufRead;
use std::path::Path;
use temperature_trends::{
    config::DashboardConfig,
    convert::Conversion,
    fetch::BasicClient,
    load::{LoadState, load_state},
    output::{Tab, print_json, print_pretty, render_converter, render_tab, write_series_csv},
};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "temperature_trends")]
#[command(about = "Monthly and yearly averages of historical temperature readings", long_about = None)]
struct Cli {
    /// JSON config file overriding environment settings
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the data and render one dashboard tab
    Show {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// Tab to render
        #[arg(short, long, value_enum, default_value_t = Tab::Monthly)]
        tab: Tab,
    },
    /// Log the full summary
    Summary {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// Log as JSON instead of debug output
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Write the three series as CSV files
    Export {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// Directory to write CSVs into
        #[arg(short = 'd', long, default_value = "aggregates")]
        output_dir: String,
    },
    /// Convert Kelvin to Celsius and Fahrenheit; reads stdin lines when no value is given
    Convert {
        #[arg(value_name = "KELVIN", allow_hyphen_values = true)]
        kelvin: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/temperature_trends.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("temperature_trends.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    // env, then the JSON file, then per-command flags
    let base_config = match &cli.config {
        Some(path) => DashboardConfig::from_env().overlay_file(path)?,
        None => DashboardConfig::from_env(),
    };

    match cli.command {
        Commands::Show { source, tab } => {
            let state = if tab == Tab::Converter {
                LoadState::Loading
            } else {
                load(base_config.with_source(source)).await
            };
            print!("{}", render_tab(&state, tab));
        }
        Commands::Summary { source, json } => {
            if let LoadState::Loaded(summary) = load(base_config.with_source(source)).await {
                if json {
                    print_json(&summary)?;
                } else {
                    print_pretty(&summary);
                }
            }
        }
        Commands::Export { source, output_dir } => {
            if let LoadState::Loaded(summary) = load(base_config.with_source(source)).await {
                let paths = write_series_csv(&output_dir, &summary)?;
                info!(output_dir, files = paths.len(), "Export complete");
            }
        }
        Commands::Convert { kelvin: Some(input) } => {
            print!("{}", render_converter(&Conversion::from_input(&input)));
        }
        Commands::Convert { kelvin: None } => {
            print!("{}", render_converter(&Conversion::default()));
            for line in std::io::stdin().lock().lines() {
                let line = line?;
                print!("{}", render_converter(&Conversion::from_input(&line)));
            }
        }
    }

    Ok(())
}

/// Runs the one load of this session. Failure leaves the dashboard empty.
async fn load(config: DashboardConfig) -> LoadState {
    info!(source = %config.source, "Loading temperature data");
    let state = load_state(&BasicClient::new(), &config).await;
    if let LoadState::Failed(_) = state {
        warn!("No data to display");
    }
    state
}
