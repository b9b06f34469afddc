use pm_dashboard::compare::{compare, find_nearest};
use pm_dashboard::grade::{Grade, Pollutant, classify};
use pm_dashboard::parser::parse;
use pm_dashboard::reference::ReferenceSeries;
use pm_dashboard::series::comparison_chart;
use pm_dashboard::stats::{Field, StatsCache, compute_stats};
use pm_dashboard::time_codec::{decimal_hour_to_clock, to_decimal_hour};

#[test]
fn test_full_pipeline() {
    let text = include_str!("fixtures/particular-matter.csv");
    let readings = parse(text);

    // three malformed rows are dropped
    assert_eq!(readings.len(), 5);

    let reference = ReferenceSeries::hourly();
    let rows = compare(&readings, reference.as_slice());
    assert_eq!(rows.len(), readings.len());
    assert!(rows.iter().all(|r| r.nearest_time.is_some()));

    let nearest: Vec<&str> = rows
        .iter()
        .filter_map(|r| r.nearest_time.as_deref())
        .collect();
    assert_eq!(nearest, vec!["08:00", "10:00", "12:00", "18:00", "23:00"]);

    let mut cache = StatsCache::default();
    let stats = cache.compute(&readings, Field::Value).unwrap();
    assert_eq!(stats.count, 5);
    assert_eq!(stats.max, 44.0);
    assert_eq!(stats.min, 18.0);
    assert!(stats.min <= stats.average && stats.average <= stats.max);
    assert_eq!(stats.current_grade, classify(stats.average, Pollutant::Pm25));
    assert_eq!(Some(stats), compute_stats(&readings, Field::Value));
}

#[test]
fn test_nearest_hour_for_csv_time() {
    let reference = ReferenceSeries::hourly();
    let nearest = find_nearest("11.50", reference.as_slice()).unwrap();
    assert_eq!(nearest.time, "12:00");
    assert_eq!(nearest.diff_minutes, 10);
}

#[test]
fn test_decimal_hour_round_trip_at_quarter_hours() {
    assert_eq!(to_decimal_hour("22.45"), Some(22.75));
    assert_eq!(decimal_hour_to_clock(22.75), "22:45");
}

#[test]
fn test_chart_series_from_fixture() {
    let readings = parse(include_str!("fixtures/particular-matter.csv"));
    let reference = ReferenceSeries::hourly();
    let chart = comparison_chart(&readings, reference.as_slice(), "csv", "reference");

    let xs: Vec<f64> = chart.series[0].points.iter().map(|p| p.x).collect();
    assert_eq!(xs.first(), Some(&(8.0 + 10.0 / 60.0)));
    assert_eq!(xs.last(), Some(&22.75));
    assert_eq!(chart.labels.len(), 24);
}

#[test]
fn test_reference_grades() {
    let reference = ReferenceSeries::hourly();
    let worst_pm25 = reference
        .as_slice()
        .iter()
        .map(|r| classify(r.pm25 as f64, Pollutant::Pm25))
        .max();
    assert_eq!(worst_pm25, Some(Grade::Bad));
}
