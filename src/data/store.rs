//! Metric Store Module
//! Emulates a database of daily metric values that may have gaps.

use crate::data::Metric;
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;

/// Largest value the random store will emit for a single day.
pub const MAX_DAILY_VALUE: u64 = 100;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("invalid range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
}

/// A row as stored: the day and the value recorded for it.
pub type Row = (NaiveDate, u64);

/// Source of daily metric rows.
///
/// Rows are only returned for days that have data, in no particular order.
pub trait MetricStore: Send + Sync {
    fn get_data(
        &self,
        metric: Metric,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Row>, StoreError>;
}

fn check_range(start: NaiveDate, end: NaiveDate) -> Result<(), StoreError> {
    if start > end {
        Err(StoreError::InvalidRange { start, end })
    } else {
        Ok(())
    }
}

/// Store that invents sparse data on every query.
///
/// A random subset of the days in range gets a value in `0..=MAX_DAILY_VALUE`.
pub struct RandomStore {
    rng: Mutex<StdRng>,
}

impl Default for RandomStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomStore {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic store for repeatable runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl MetricStore for RandomStore {
    fn get_data(
        &self,
        _metric: Metric,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Row>, StoreError> {
        check_range(start, end)?;

        let days: Vec<NaiveDate> = start.iter_days().take_while(|d| *d <= end).collect();

        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let keep = rng.gen_range(0..=days.len());
        let picked: Vec<NaiveDate> = days.choose_multiple(&mut *rng, keep).copied().collect();

        Ok(picked
            .into_iter()
            .map(|day| (day, rng.gen_range(0..=MAX_DAILY_VALUE)))
            .collect())
    }
}

/// In-memory store holding known rows per metric.
#[derive(Default, Clone)]
pub struct FixedStore {
    rows: HashMap<Metric, Vec<Row>>,
}

impl FixedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value for a day, replacing any previous value.
    pub fn insert(&mut self, metric: Metric, day: NaiveDate, value: u64) {
        let rows = self.rows.entry(metric).or_default();
        rows.retain(|(d, _)| *d != day);
        rows.push((day, value));
    }

    /// Fill every day of a range with the same value, stopping at the last
    /// representable date.
    pub fn fill(&mut self, metric: Metric, start: NaiveDate, days: i64, value: u64) {
        for offset in 0..days {
            let Some(day) = start.checked_add_signed(Duration::days(offset)) else {
                break;
            };
            self.insert(metric, day, value);
        }
    }
}

impl MetricStore for FixedStore {
    fn get_data(
        &self,
        metric: Metric,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Row>, StoreError> {
        check_range(start, end)?;

        Ok(self
            .rows
            .get(&metric)
            .map(|rows| {
                rows.iter()
                    .filter(|(d, _)| *d >= start && *d <= end)
                    .copied()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn random_rows_stay_in_range() {
        let store = RandomStore::with_seed(7);
        let (start, end) = (date(2015, 1, 1), date(2015, 1, 15));

        for _ in 0..20 {
            let rows = store.get_data(Metric::Visits, start, end).unwrap();
            assert!(rows.len() <= 15);
            for (day, value) in rows {
                assert!(day >= start && day <= end);
                assert!(value <= MAX_DAILY_VALUE);
            }
        }
    }

    #[test]
    fn random_rows_have_unique_days() {
        let store = RandomStore::with_seed(11);
        let rows = store
            .get_data(Metric::PageViews, date(2015, 1, 1), date(2015, 3, 1))
            .unwrap();
        let mut days: Vec<_> = rows.iter().map(|(d, _)| *d).collect();
        days.sort();
        days.dedup();
        assert_eq!(days.len(), rows.len());
    }

    #[test]
    fn same_seed_same_rows() {
        let a = RandomStore::with_seed(3);
        let b = RandomStore::with_seed(3);
        let range = (date(2015, 1, 1), date(2015, 1, 31));
        assert_eq!(
            a.get_data(Metric::Visits, range.0, range.1).unwrap(),
            b.get_data(Metric::Visits, range.0, range.1).unwrap()
        );
    }

    #[test]
    fn single_day_range_is_valid() {
        let store = RandomStore::with_seed(1);
        let day = date(2015, 6, 1);
        let rows = store.get_data(Metric::Visits, day, day).unwrap();
        assert!(rows.len() <= 1);
    }

    #[test]
    fn reversed_range_is_rejected() {
        let store = RandomStore::with_seed(1);
        let err = store
            .get_data(Metric::Visits, date(2015, 1, 2), date(2015, 1, 1))
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidRange { .. }));

        let err = FixedStore::new()
            .get_data(Metric::Visits, date(2015, 1, 2), date(2015, 1, 1))
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidRange { .. }));
    }

    #[test]
    fn fixed_store_filters_by_range_and_metric() {
        let mut store = FixedStore::new();
        store.fill(Metric::Visits, date(2015, 1, 1), 10, 4);
        store.insert(Metric::PageViews, date(2015, 1, 3), 9);

        let rows = store
            .get_data(Metric::Visits, date(2015, 1, 5), date(2015, 1, 6))
            .unwrap();
        assert_eq!(rows, vec![(date(2015, 1, 5), 4), (date(2015, 1, 6), 4)]);

        let rows = store
            .get_data(Metric::UniqueVisitors, date(2015, 1, 1), date(2015, 1, 6))
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn fixed_store_insert_replaces() {
        let mut store = FixedStore::new();
        store.insert(Metric::Visits, date(2015, 1, 1), 1);
        store.insert(Metric::Visits, date(2015, 1, 1), 2);
        let rows = store
            .get_data(Metric::Visits, date(2015, 1, 1), date(2015, 1, 1))
            .unwrap();
        assert_eq!(rows, vec![(date(2015, 1, 1), 2)]);
    }

    #[test]
    fn fixed_store_fill_stops_at_last_date() {
        let mut store = FixedStore::new();
        let start = NaiveDate::MAX.pred_opt().unwrap();
        store.fill(Metric::Visits, start, 5, 1);

        let rows = store
            .get_data(Metric::Visits, start, NaiveDate::MAX)
            .unwrap();
        assert_eq!(rows.len(), 2);
    }
}
