//! The embedded hourly reference dataset and the built-in fallback CSV.

use chrono::NaiveDate;
use serde::Serialize;

/// Fallback measurements used when no CSV source can be loaded.
pub const DEFAULT_CSV: &str = "날짜,시간,농도\n25.12.28,22.45,36";

/// (time, pm25, pm10) for every hour of the reference day.
static HOURLY: [(&str, u32, u32); 24] = [
    ("00:00", 22, 43),
    ("01:00", 26, 40),
    ("02:00", 22, 36),
    ("03:00", 23, 34),
    ("04:00", 20, 21),
    ("05:00", 21, 23),
    ("06:00", 17, 38),
    ("07:00", 22, 19),
    ("08:00", 25, 25),
    ("09:00", 23, 44),
    ("10:00", 32, 26),
    ("11:00", 32, 82),
    ("12:00", 29, 57),
    ("13:00", 27, 58),
    ("14:00", 28, 59),
    ("15:00", 31, 64),
    ("16:00", 27, 54),
    ("17:00", 28, 28),
    ("18:00", 29, 48),
    ("19:00", 36, 58),
    ("20:00", 42, 60),
    ("21:00", 42, 37),
    ("22:00", 33, 38),
    ("23:00", 62, 43),
];

/// One hourly reading from the reference station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reading {
    /// `HH:MM`
    pub time: String,
    pub pm25: u32,
    pub pm10: u32,
}

/// An ordered, read-only series of [`Reading`]s.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReferenceSeries {
    readings: Vec<Reading>,
}

impl ReferenceSeries {
    /// The 24-entry table for the reference day.
    pub fn hourly() -> Self {
        Self::from_readings(
            HOURLY
                .iter()
                .map(|&(time, pm25, pm10)| Reading {
                    time: time.to_string(),
                    pm25,
                    pm10,
                })
                .collect(),
        )
    }

    pub fn from_readings(readings: Vec<Reading>) -> Self {
        Self { readings }
    }

    pub fn as_slice(&self) -> &[Reading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

/// Day on which the reference series was recorded.
pub fn reference_date() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2025, 12, 29)
}

/// `"2025년 12월 29일"`
pub fn reference_date_label() -> String {
    reference_date()
        .map(|d| d.format("%Y년 %-m월 %-d일").to_string())
        .unwrap_or_default()
}
