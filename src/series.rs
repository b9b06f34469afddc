//! Point series for the line charts.
//!
//! Every chart shares a linear x axis in decimal hours from 0 to 23 with one
//! `HH:00` label per hour.

use serde::Serialize;

use crate::parser::CsvReading;
use crate::reference::Reading;
use crate::time_codec::{clock_to_minutes, to_decimal_hour};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    /// Decimal hour.
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub points: Vec<Point>,
}

/// Everything the comparison chart plots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonChart {
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

/// `"00:00"` through `"23:00"`.
pub fn hour_axis_labels() -> Vec<String> {
    (0..24).map(|h| format!("{h:02}:00")).collect()
}

/// CSV measurements placed at their decimal hour. Readings whose time has no
/// hour are left out.
pub fn csv_points(readings: &[CsvReading]) -> Vec<Point> {
    readings
        .iter()
        .filter_map(|r| {
            to_decimal_hour(&r.time).map(|x| Point { x, y: r.value })
        })
        .collect()
}

/// Reference PM2.5 placed at the whole hour of each entry.
pub fn reference_pm25_points(reference: &[Reading]) -> Vec<Point> {
    reference
        .iter()
        .filter_map(|r| {
            clock_to_minutes(&r.time).map(|m| Point {
                x: (m / 60) as f64,
                y: r.pm25 as f64,
            })
        })
        .collect()
}

pub fn comparison_chart(
    csv: &[CsvReading],
    reference: &[Reading],
    csv_label: &str,
    reference_label: &str,
) -> ComparisonChart {
    ComparisonChart {
        labels: hour_axis_labels(),
        series: vec![
            ChartSeries {
                label: csv_label.to_string(),
                points: csv_points(csv),
            },
            ChartSeries {
                label: reference_label.to_string(),
                points: reference_pm25_points(reference),
            },
        ],
    }
}
