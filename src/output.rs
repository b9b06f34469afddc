//! Output formatting and persistence for dashboard data.
//!
//! Supports plain-text tables, JSON reports and CSV append.

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::OpenOptions;
use std::path::Path;
use tracing::debug;

use crate::compare::ComparisonRow;
use crate::grade::{GradeInfo, Pollutant, Theme, classify, grade_info};
use crate::parser::CsvReading;
use crate::reference::Reading;
use crate::stats::StatsSummary;
use crate::time_codec::{format_clock_label, format_date, format_hour_label, format_reference_label};

pub const UNIT: &str = "㎍/㎥";
pub const NO_DATA: &str = "데이터가 없습니다.";
pub const NO_COMPARISON_DATA: &str = "비교할 CSV 데이터가 없습니다.";
pub const NO_MATCH: &str = "데이터 없음";

/// `"36 ㎍/㎥ (나쁨)"`
pub fn concentration_cell(value: f64, pollutant: Pollutant) -> String {
    format!("{value} {UNIT} ({})", classify(value, pollutant).label())
}

/// Signed difference with one decimal: `"+3.0"`, `"-26.0"`, `"0.0"`.
pub fn format_difference(difference: f64) -> String {
    if difference > 0.0 {
        format!("+{difference:.1}")
    } else {
        format!("{difference:.1}")
    }
}

/// `"PM10: 24개 측정 | 평균 43.1 ㎍/㎥ (보통) | 최고 82 ㎍/㎥ | 최저 19 ㎍/㎥"`
pub fn stats_line(label: &str, stats: &StatsSummary) -> String {
    format!(
        "{label}: {}개 측정 | 평균 {:.1} {UNIT} ({}) | 최고 {} {UNIT} | 최저 {} {UNIT}",
        stats.count,
        stats.average,
        stats.current_grade.label(),
        stats.max,
        stats.min,
    )
}

fn table(header: &[&str], rows: Vec<String>, placeholder: &str) -> String {
    let mut lines = vec![header.join(" | ")];
    if rows.is_empty() {
        lines.push(placeholder.to_string());
    } else {
        lines.extend(rows);
    }
    lines.join("\n")
}

/// Hourly reference table: time, PM10 and PM2.5 with grades.
pub fn render_reference_table(reference: &[Reading], date_label: &str) -> String {
    let rows = reference
        .iter()
        .map(|r| {
            format!(
                "{date_label} {} | {} | {}",
                format_reference_label(&r.time),
                concentration_cell(r.pm10 as f64, Pollutant::Pm10),
                concentration_cell(r.pm25 as f64, Pollutant::Pm25),
            )
        })
        .collect();

    table(&["측정 시각", "PM10", "PM2.5"], rows, NO_DATA)
}

/// CSV measurement table, graded on the PM2.5 ladder.
pub fn render_measurement_table(readings: &[CsvReading]) -> String {
    let rows = readings
        .iter()
        .map(|r| {
            format!(
                "{} {} | {}",
                format_date(&r.date),
                format_clock_label(&r.time),
                concentration_cell(r.value, Pollutant::Pm25),
            )
        })
        .collect();

    table(&["측정 시각", "PM2.5"], rows, NO_DATA)
}

pub fn render_comparison_table(rows: &[ComparisonRow]) -> String {
    let lines = rows
        .iter()
        .map(|row| {
            let (nearest, difference) = match (row.nearest_pm25, row.difference) {
                (Some(pm25), Some(difference)) => (
                    concentration_cell(pm25 as f64, Pollutant::Pm25),
                    format_difference(difference),
                ),
                _ => (NO_MATCH.to_string(), "-".to_string()),
            };
            format!(
                "{} | {} | {nearest} | {difference}",
                format_hour_label(&row.time),
                concentration_cell(row.csv_value, Pollutant::Pm25),
            )
        })
        .collect();

    table(&["시간", "측정값", "기준값", "차이"], lines, NO_COMPARISON_DATA)
}

/// A comparison row with display grades for both sides.
#[derive(Debug, Serialize)]
pub struct GradedComparison {
    #[serde(flatten)]
    pub row: ComparisonRow,
    pub csv_grade: GradeInfo,
    pub nearest_grade: Option<GradeInfo>,
}

#[derive(Debug, Serialize)]
pub struct ComparisonReport {
    pub generated_at: DateTime<Utc>,
    pub theme: Theme,
    pub rows: Vec<GradedComparison>,
}

/// Attaches PM2.5 grades, colored for `theme`, to every comparison row.
pub fn comparison_report(rows: Vec<ComparisonRow>, theme: Theme) -> ComparisonReport {
    let rows = rows
        .into_iter()
        .map(|row| GradedComparison {
            csv_grade: grade_info(row.csv_value, Pollutant::Pm25, theme),
            nearest_grade: row
                .nearest_pm25
                .map(|pm25| grade_info(pm25 as f64, Pollutant::Pm25, theme)),
            row,
        })
        .collect();

    ComparisonReport {
        generated_at: Utc::now(),
        theme,
        rows,
    }
}

/// Prints any serializable value as pretty JSON on stdout.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Appends records as rows to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_records<T: Serialize>(path: &str, records: &[T]) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, count = records.len(), "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}
