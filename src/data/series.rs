//! Series Assembly Module
//! Builds the date index, fills gaps and packages series for the API.

use crate::data::store::{MetricStore, Row, StoreError};
use crate::data::{ApiResponse, Metric, Series};
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::debug;

/// Format used for index entries.
pub const INDEX_DATE_FORMAT: &str = "%Y-%m-%dT00:00:00Z";

/// Every date from `start` to `end`, both inclusive.
pub fn date_index(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

pub fn format_index_date(date: NaiveDate) -> String {
    date.format(INDEX_DATE_FORMAT).to_string()
}

/// One value per day of `[start, end]`, zero where the store had no row.
///
/// Rows outside the range are dropped. For duplicate days the last row wins.
pub fn fill_missing_dates(rows: &[Row], start: NaiveDate, end: NaiveDate) -> Vec<u64> {
    let by_day: HashMap<NaiveDate, u64> = rows.iter().copied().collect();

    date_index(start, end)
        .into_iter()
        .map(|day| by_day.get(&day).copied().unwrap_or(0))
        .collect()
}

pub fn to_series(metric: Metric, data: Vec<u64>) -> Series {
    Series {
        name: metric.display_name().to_string(),
        total: data.iter().sum(),
        data,
    }
}

/// Query the store for each metric and assemble the response document.
pub fn build_response(
    store: &dyn MetricStore,
    start: NaiveDate,
    end: NaiveDate,
    metrics: &[Metric],
) -> Result<ApiResponse, StoreError> {
    let mut response = ApiResponse {
        index: date_index(start, end)
            .into_iter()
            .map(format_index_date)
            .collect(),
        ..Default::default()
    };

    for &metric in metrics {
        if response.series.contains_key(metric.id()) {
            continue;
        }
        let rows = store.get_data(metric, start, end)?;
        debug!(metric = metric.id(), rows = rows.len(), "loaded rows");
        let data = fill_missing_dates(&rows, start, end);
        response
            .series
            .insert(metric.id().to_string(), to_series(metric, data));
    }

    Ok(response)
}
