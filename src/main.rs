//! CLI entry point for the particulate-matter dashboard.
//!
//! Provides subcommands for showing the hourly reference data, the CSV
//! measurements, their nearest-time comparison and the chart series.

use anyhow::Result;
use clap::{Parser, Subcommand};
use pm_dashboard::{
    compare::compare,
    grade::Theme,
    output::{
        append_records, comparison_report, print_json, render_comparison_table,
        render_measurement_table, render_reference_table, stats_line,
    },
    parser::CsvReading,
    reference::{ReferenceSeries, reference_date_label},
    series::comparison_chart,
    source::{Origin, load_csv},
    stats::{Field, StatsCache},
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEFAULT_CSV_PATH: &str = "particular-matter.csv";
const CSV_SERIES_LABEL: &str = "구미고";
const REFERENCE_SERIES_LABEL: &str = "원평동";

#[derive(Parser)]
#[command(name = "pm_dashboard")]
#[command(about = "Particulate-matter (PM10/PM2.5) dashboard", long_about = None)]
struct Cli {
    /// Palette used for grade colors in JSON output
    #[arg(long, value_enum, global = true, default_value_t = Theme::Light)]
    theme: Theme,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the hourly reference table with PM10 and PM2.5 statistics
    Reference,
    /// Show the CSV measurements with statistics
    Measurements {
        /// CSV file to load (defaults to $PM_DASHBOARD_CSV or particular-matter.csv)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Compare each CSV measurement with the nearest hourly reading
    Compare {
        /// CSV file to load (defaults to $PM_DASHBOARD_CSV or particular-matter.csv)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// CSV file to append comparison rows to
        #[arg(short, long)]
        output: Option<String>,

        /// Print the comparison as JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the comparison chart series as JSON
    Chart {
        /// CSV file to load (defaults to $PM_DASHBOARD_CSV or particular-matter.csv)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/pm_dashboard.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("pm_dashboard.log"));

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
    let reference = ReferenceSeries::hourly();
    let mut cache = StatsCache::default();

    debug!(theme = ?cli.theme, "Dashboard starting");

    match cli.command {
        Commands::Reference => {
            println!(
                "{}",
                render_reference_table(reference.as_slice(), &reference_date_label())
            );
            for (label, field) in [("PM10", Field::Pm10), ("PM2.5", Field::Pm25)] {
                if let Some(stats) = cache.compute(reference.as_slice(), field) {
                    println!("{}", stats_line(label, &stats));
                }
            }
        }
        Commands::Measurements { file } => {
            let readings = load_readings(file);
            println!("{}", render_measurement_table(&readings));
            if let Some(stats) = cache.compute(&readings, Field::Value) {
                println!("{}", stats_line("PM2.5", &stats));
            }
        }
        Commands::Compare { file, output, json } => {
            let readings = load_readings(file);
            let rows = compare(&readings, reference.as_slice());

            if let Some(path) = output {
                append_records(&path, &rows)?;
                info!(path = %path, rows = rows.len(), "Comparison rows appended");
            }

            if json {
                print_json(&comparison_report(rows, cli.theme))?;
            } else {
                println!("{}", render_comparison_table(&rows));
            }
        }
        Commands::Chart { file } => {
            let readings = load_readings(file);
            let chart = comparison_chart(
                &readings,
                reference.as_slice(),
                CSV_SERIES_LABEL,
                REFERENCE_SERIES_LABEL,
            );
            print_json(&chart)?;
        }
    }

    Ok(())
}

/// Resolves the CSV path from the flag, `PM_DASHBOARD_CSV` or the default
/// name, then loads it with fallback.
fn load_readings(file: Option<PathBuf>) -> Vec<CsvReading> {
    let path = file.unwrap_or_else(|| {
        std::env::var("PM_DASHBOARD_CSV")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CSV_PATH))
    });

    let (readings, origin) = load_csv(&path);
    if origin == Origin::Fallback {
        info!(count = readings.len(), "Showing built-in default measurements");
    }
    readings
}
