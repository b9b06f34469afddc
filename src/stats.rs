use std::collections::{HashMap, VecDeque};

use serde::Serialize;
use tracing::debug;

use crate::grade::{Grade, Pollutant, classify};
use crate::parser::CsvReading;
use crate::reference::Reading;

/// Number of summaries a [`StatsCache`] keeps before evicting the oldest.
pub const DEFAULT_CACHE_CAPACITY: usize = 10;

/// Which numeric field of a reading to aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Field {
    /// The CSV concentration (PM2.5).
    Value,
    Pm10,
    Pm25,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Value => "value",
            Field::Pm10 => "pm10",
            Field::Pm25 => "pm25",
        }
    }

    /// Ladder used to grade the mean of this field.
    ///
    /// Only the CSV `value` field uses the PM2.5 ladder; every other field is
    /// graded on the PM10 ladder, `pm25` included.
    pub fn grading_pollutant(self) -> Pollutant {
        match self {
            Field::Value => Pollutant::Pm25,
            Field::Pm10 | Field::Pm25 => Pollutant::Pm10,
        }
    }
}

/// A record that exposes numeric fields for aggregation.
pub trait Measured {
    /// The value of `field`, or `None` when this record has no such field.
    fn field(&self, field: Field) -> Option<f64>;
}

impl Measured for CsvReading {
    fn field(&self, field: Field) -> Option<f64> {
        match field {
            Field::Value => Some(self.value),
            Field::Pm10 | Field::Pm25 => None,
        }
    }
}

impl Measured for Reading {
    fn field(&self, field: Field) -> Option<f64> {
        match field {
            Field::Pm10 => Some(self.pm10 as f64),
            Field::Pm25 => Some(self.pm25 as f64),
            Field::Value => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSummary {
    pub count: usize,
    pub average: f64,
    pub max: f64,
    pub min: f64,
    pub current_grade: Grade,
}

/// Aggregates `field` over `readings`.
///
/// Records where the field is missing or NaN are skipped. Returns `None` when
/// nothing is left to aggregate.
pub fn compute_stats<T: Measured>(readings: &[T], field: Field) -> Option<StatsSummary> {
    let values: Vec<f64> = readings
        .iter()
        .filter_map(|r| r.field(field))
        .filter(|v| !v.is_nan())
        .collect();

    if values.is_empty() {
        return None;
    }

    let average = values.iter().sum::<f64>() / values.len() as f64;
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);

    Some(StatsSummary {
        count: values.len(),
        average,
        max,
        min,
        current_grade: classify(average, field.grading_pollutant()),
    })
}

/// `(length, field, first value bits, last value bits)`
type CacheKey = (usize, Field, Option<u64>, Option<u64>);

/// Memoizes [`compute_stats`] results.
///
/// Entries are keyed by the collection length, the field and the field values
/// of the first and last records. Two different collections that agree on all
/// four share an entry. Eviction is first-in first-out once `capacity` is
/// exceeded; lookups do not refresh an entry.
#[derive(Debug)]
pub struct StatsCache {
    capacity: usize,
    entries: HashMap<CacheKey, StatsSummary>,
    order: VecDeque<CacheKey>,
}

impl Default for StatsCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl StatsCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached [`compute_stats`]. `None` results are never stored.
    pub fn compute<T: Measured>(&mut self, readings: &[T], field: Field) -> Option<StatsSummary> {
        let (first, last) = (readings.first()?, readings.last()?);
        let key: CacheKey = (
            readings.len(),
            field,
            first.field(field).map(f64::to_bits),
            last.field(field).map(f64::to_bits),
        );

        if let Some(hit) = self.entries.get(&key) {
            debug!(field = field.name(), len = readings.len(), "Stats cache hit");
            return Some(hit.clone());
        }

        let summary = compute_stats(readings, field)?;
        self.insert(key, summary.clone());
        Some(summary)
    }

    fn insert(&mut self, key: CacheKey, summary: StatsSummary) {
        if self.entries.insert(key, summary).is_none() {
            self.order.push_back(key);
        }
        while self.entries.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceSeries;

    fn csv(values: &[f64]) -> Vec<CsvReading> {
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| CsvReading {
                date: "25.12.28".to_string(),
                time: format!("{i}.00"),
                value,
            })
            .collect()
    }

    #[test]
    fn test_compute_stats_empty() {
        let empty: Vec<CsvReading> = Vec::new();
        assert_eq!(compute_stats(&empty, Field::Value), None);
    }

    #[test]
    fn test_compute_stats_missing_field() {
        assert_eq!(compute_stats(&csv(&[1.0, 2.0]), Field::Pm10), None);
    }

    #[test]
    fn test_compute_stats_values() {
        let stats = compute_stats(&csv(&[10.0, 20.0, 60.0]), Field::Value).unwrap();

        assert_eq!(stats.count, 3);
        assert_eq!(stats.average, 30.0);
        assert_eq!(stats.max, 60.0);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.current_grade, Grade::Normal);
    }

    #[test]
    fn test_compute_stats_skips_nan() {
        let stats = compute_stats(&csv(&[4.0, f64::NAN, 8.0]), Field::Value).unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.average, 6.0);
    }

    #[test]
    fn test_min_average_max_ordering() {
        let series = ReferenceSeries::hourly();
        for field in [Field::Pm10, Field::Pm25] {
            let stats = compute_stats(series.as_slice(), field).unwrap();
            assert_eq!(stats.count, 24);
            assert!(stats.min <= stats.average);
            assert!(stats.average <= stats.max);
        }
    }

    #[test]
    fn test_grading_ladder_follows_field() {
        // mean 20: Normal on PM2.5, Good on PM10
        let readings = csv(&[20.0]);
        assert_eq!(
            compute_stats(&readings, Field::Value).unwrap().current_grade,
            Grade::Normal
        );

        let series = ReferenceSeries::hourly();
        let pm25 = compute_stats(series.as_slice(), Field::Pm25).unwrap();
        assert_eq!(pm25.current_grade, classify(pm25.average, Pollutant::Pm10));
    }

    #[test]
    fn test_cache_hit_returns_same_summary() {
        let mut cache = StatsCache::default();
        let readings = csv(&[1.0, 2.0, 3.0]);

        let first = cache.compute(&readings, Field::Value);
        let second = cache.compute(&readings, Field::Value);

        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_key_collides_on_matching_endpoints() {
        let mut cache = StatsCache::default();
        let a = csv(&[1.0, 2.0, 3.0]);
        let b = csv(&[1.0, 50.0, 3.0]);

        let from_a = cache.compute(&a, Field::Value).unwrap();
        let from_b = cache.compute(&b, Field::Value).unwrap();

        // b differs only in the middle, so it is served a's summary
        assert_eq!(from_a, from_b);
        assert_ne!(from_b, compute_stats(&b, Field::Value).unwrap());
    }

    #[test]
    fn test_cache_does_not_store_none() {
        let mut cache = StatsCache::default();
        let empty: Vec<CsvReading> = Vec::new();

        assert_eq!(cache.compute(&empty, Field::Value), None);
        assert_eq!(cache.compute(&csv(&[1.0]), Field::Pm10), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_evicts_oldest_first() {
        let mut cache = StatsCache::new(2);
        let a = csv(&[1.0]);
        let b = csv(&[2.0]);
        let c = csv(&[3.0]);

        cache.compute(&a, Field::Value);
        cache.compute(&b, Field::Value);
        // a hit does not move a to the back
        cache.compute(&a, Field::Value);
        cache.compute(&c, Field::Value);

        assert_eq!(cache.len(), 2);
        let a_key = (1, Field::Value, Some(1.0f64.to_bits()), Some(1.0f64.to_bits()));
        let b_key = (1, Field::Value, Some(2.0f64.to_bits()), Some(2.0f64.to_bits()));
        assert!(!cache.entries.contains_key(&a_key));
        assert!(cache.entries.contains_key(&b_key));
    }
}
