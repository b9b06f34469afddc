//! Air-quality grading for PM10 and PM2.5 concentrations.
//!
//! The band a value falls into depends only on the pollutant. The display
//! colors attached to a band additionally depend on the [`Theme`].

use clap::ValueEnum;
use serde::Serialize;

/// Ordinal air-quality band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Grade {
    Good,
    Normal,
    Bad,
    VeryBad,
}

impl Grade {
    /// Display label shown next to a concentration.
    pub fn label(self) -> &'static str {
        match self {
            Grade::Good => "좋음",
            Grade::Normal => "보통",
            Grade::Bad => "나쁨",
            Grade::VeryBad => "매우나쁨",
        }
    }
}

/// Particulate-matter size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Pollutant {
    Pm10,
    Pm25,
}

impl Pollutant {
    /// Inclusive upper bounds (µg/m³) of the Good, Normal and Bad bands.
    ///
    /// | Pollutant | Good | Normal | Bad |
    /// |-----------|------|--------|-----|
    /// | PM10      | 30   | 80     | 150 |
    /// | PM2.5     | 15   | 35     | 75  |
    pub fn thresholds(self) -> [f64; 3] {
        match self {
            Pollutant::Pm10 => [30.0, 80.0, 150.0],
            Pollutant::Pm25 => [15.0, 35.0, 75.0],
        }
    }
}

/// Display palette selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// A grade together with the color tokens used to render it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeInfo {
    pub grade: Grade,
    pub label: &'static str,
    pub color: &'static str,
    pub bg_color: &'static str,
}

/// Places `value` into one of the four bands for `pollutant`.
///
/// Bands are contiguous and each upper bound is inclusive. A NaN never passes
/// a `<=` comparison and so lands in [`Grade::VeryBad`].
pub fn classify(value: f64, pollutant: Pollutant) -> Grade {
    let [good, normal, bad] = pollutant.thresholds();
    match value {
        v if v <= good => Grade::Good,
        v if v <= normal => Grade::Normal,
        v if v <= bad => Grade::Bad,
        _ => Grade::VeryBad,
    }
}

/// Foreground and background tokens for `grade` under `theme`.
pub fn palette(grade: Grade, theme: Theme) -> (&'static str, &'static str) {
    match (grade, theme) {
        (Grade::Good, Theme::Light) => ("#4caf50", "#e8f5e9"),
        (Grade::Good, Theme::Dark) => ("#4caf50", "#0a2a0a"),
        (Grade::Normal, Theme::Light) => ("#2196f3", "#e3f2fd"),
        (Grade::Normal, Theme::Dark) => ("#2196f3", "#061b3d"),
        (Grade::Bad, Theme::Light) => ("#ff9800", "#fff3e0"),
        (Grade::Bad, Theme::Dark) => ("#ff9800", "#261400"),
        (Grade::VeryBad, Theme::Light) => ("#f44336", "#ffebee"),
        (Grade::VeryBad, Theme::Dark) => ("#f44336", "#1f0a0a"),
    }
}

pub fn grade_info(value: f64, pollutant: Pollutant, theme: Theme) -> GradeInfo {
    let grade = classify(value, pollutant);
    let (color, bg_color) = palette(grade, theme);
    GradeInfo {
        grade,
        label: grade.label(),
        color,
        bg_color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pm10_boundaries() {
        assert_eq!(classify(0.0, Pollutant::Pm10), Grade::Good);
        assert_eq!(classify(30.0, Pollutant::Pm10), Grade::Good);
        assert_eq!(classify(30.1, Pollutant::Pm10), Grade::Normal);
        assert_eq!(classify(80.0, Pollutant::Pm10), Grade::Normal);
        assert_eq!(classify(80.5, Pollutant::Pm10), Grade::Bad);
        assert_eq!(classify(150.0, Pollutant::Pm10), Grade::Bad);
        assert_eq!(classify(151.0, Pollutant::Pm10), Grade::VeryBad);
    }

    #[test]
    fn test_pm25_boundaries() {
        assert_eq!(classify(15.0, Pollutant::Pm25), Grade::Good);
        assert_eq!(classify(15.5, Pollutant::Pm25), Grade::Normal);
        assert_eq!(classify(35.0, Pollutant::Pm25), Grade::Normal);
        assert_eq!(classify(36.0, Pollutant::Pm25), Grade::Bad);
        assert_eq!(classify(75.0, Pollutant::Pm25), Grade::Bad);
        assert_eq!(classify(75.1, Pollutant::Pm25), Grade::VeryBad);
    }

    #[test]
    fn test_bands_are_monotonic() {
        for pollutant in [Pollutant::Pm10, Pollutant::Pm25] {
            let mut previous = Grade::Good;
            for tenths in 0..2000 {
                let grade = classify(tenths as f64 / 10.0, pollutant);
                assert!(grade >= previous);
                previous = grade;
            }
            assert_eq!(previous, Grade::VeryBad);
        }
    }

    #[test]
    fn test_nan_is_very_bad() {
        assert_eq!(classify(f64::NAN, Pollutant::Pm10), Grade::VeryBad);
    }

    #[test]
    fn test_theme_changes_colors_only() {
        let light = grade_info(36.0, Pollutant::Pm25, Theme::Light);
        let dark = grade_info(36.0, Pollutant::Pm25, Theme::Dark);

        assert_eq!(light.grade, Grade::Bad);
        assert_eq!(light.grade, dark.grade);
        assert_eq!(light.label, "나쁨");
        assert_eq!(light.color, dark.color);
        assert_eq!(light.bg_color, "#fff3e0");
        assert_eq!(dark.bg_color, "#261400");
    }
}
