//! Nearest-time join between CSV measurements and the hourly reference series.

use serde::Serialize;

use crate::parser::CsvReading;
use crate::reference::Reading;
use crate::time_codec::{clock_to_minutes, fractional_to_minutes};

/// The reference reading closest in time to a CSV measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearestMatch {
    pub time: String,
    pub pm25: u32,
    pub pm10: u32,
    /// Absolute distance between the two timestamps.
    pub diff_minutes: u64,
}

/// One CSV measurement paired with its nearest reference reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub date: String,
    pub time: String,
    pub csv_value: f64,
    pub nearest_time: Option<String>,
    pub nearest_pm25: Option<u32>,
    pub nearest_pm10: Option<u32>,
    pub diff_minutes: Option<u64>,
    /// `csv_value - nearest_pm25`; positive when the CSV reading is higher.
    pub difference: Option<f64>,
}

/// Finds the reference reading closest to `csv_time` (`H.MM`).
///
/// Distances are plain minutes since midnight, so 23:50 and 00:10 are 1420
/// minutes apart. On a tie the earlier entry in `reference` wins. Reference
/// entries whose time cannot be read are skipped.
///
/// Returns `None` when `reference` is empty or `csv_time` has no hour.
pub fn find_nearest(csv_time: &str, reference: &[Reading]) -> Option<NearestMatch> {
    let csv_minutes = fractional_to_minutes(csv_time)?;

    let mut nearest: Option<NearestMatch> = None;
    for reading in reference {
        let Some(minutes) = clock_to_minutes(&reading.time) else {
            continue;
        };
        let diff = csv_minutes.abs_diff(minutes);

        if nearest.as_ref().is_none_or(|n| diff < n.diff_minutes) {
            nearest = Some(NearestMatch {
                time: reading.time.clone(),
                pm25: reading.pm25,
                pm10: reading.pm10,
                diff_minutes: diff,
            });
        }
    }

    nearest
}

/// Pairs every CSV reading with its nearest reference reading, in CSV order.
pub fn compare(csv: &[CsvReading], reference: &[Reading]) -> Vec<ComparisonRow> {
    csv.iter()
        .map(|reading| {
            let nearest = find_nearest(&reading.time, reference);
            ComparisonRow {
                date: reading.date.clone(),
                time: reading.time.clone(),
                csv_value: reading.value,
                nearest_time: nearest.as_ref().map(|n| n.time.clone()),
                nearest_pm25: nearest.as_ref().map(|n| n.pm25),
                nearest_pm10: nearest.as_ref().map(|n| n.pm10),
                diff_minutes: nearest.as_ref().map(|n| n.diff_minutes),
                difference: nearest.as_ref().map(|n| reading.value - n.pm25 as f64),
            }
        })
        .collect()
}
