//! Response Transform Module
//! Reshapes `{index, series}` API documents into line chart configs.

use crate::data::{ApiResponse, Metric};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Dataset colors, assigned by position.
pub const PALETTE: [&str; 3] = ["#f1595f", "#727272", "#79c36a"];

/// Fill used for point outlines and highlights.
pub const POINT_FILL: &str = "#fff";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    #[error("Unrecognised date: {0:?}")]
    BadDate(String),
    #[error("Series {metric} has {actual} points but the index has {expected}")]
    LengthMismatch {
        metric: String,
        expected: usize,
        actual: usize,
    },
}

/// One line of the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub stroke_color: String,
    pub point_color: String,
    pub point_highlight_stroke: String,
    pub point_stroke_color: String,
    pub point_highlight_fill: String,
}

impl Dataset {
    fn new(label: String, data: Vec<f64>, color: &str) -> Self {
        Self {
            label,
            data,
            stroke_color: color.to_string(),
            point_color: color.to_string(),
            point_highlight_stroke: color.to_string(),
            point_stroke_color: POINT_FILL.to_string(),
            point_highlight_fill: POINT_FILL.to_string(),
        }
    }
}

/// Line chart configuration: x-axis labels plus one dataset per metric.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartConfig {
    /// True when no dataset has any points.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() || self.datasets.iter().all(|d| d.data.is_empty())
    }

    /// Largest value across all datasets, 0 when empty.
    pub fn max_value(&self) -> f64 {
        self.datasets
            .iter()
            .flat_map(|d| d.data.iter().copied())
            .fold(0.0, f64::max)
    }
}

/// Date in query parameter form: `2015-01-01`.
pub fn date_to_json(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse an index entry (`2015-01-01T00:00:00Z` or `2015-01-01`) as a UTC day.
pub fn parse_index_date(value: &str) -> Result<NaiveDate, TransformError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc).date_naive());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| TransformError::BadDate(value.to_string()))
}

/// Human readable label for an index entry: `2015-01-01T00:00:00Z` -> `1 Jan`.
pub fn json_to_date_str(value: &str) -> Result<String, TransformError> {
    Ok(parse_index_date(value)?.format("%-d %b").to_string())
}

/// Build the chart config for an API response.
///
/// Datasets follow the series key order; every dataset must line up with the
/// index.
pub fn transform_response(response: &ApiResponse) -> Result<ChartConfig, TransformError> {
    let labels = response
        .index
        .iter()
        .map(|d| json_to_date_str(d))
        .collect::<Result<Vec<_>, _>>()?;

    let datasets = response
        .series
        .iter()
        .enumerate()
        .map(|(i, (key, series))| {
            if series.data.len() != labels.len() {
                return Err(TransformError::LengthMismatch {
                    metric: key.clone(),
                    expected: labels.len(),
                    actual: series.data.len(),
                });
            }

            let label = if series.name.is_empty() {
                key.parse::<Metric>()
                    .map(|m| m.display_name().to_string())
                    .unwrap_or_else(|_| key.clone())
            } else {
                series.name.clone()
            };

            let data = series.data.iter().map(|&v| v as f64).collect();
            Ok(Dataset::new(label, data, PALETTE[i % PALETTE.len()]))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ChartConfig { labels, datasets })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Series;

    fn response(index: &[&str], series: &[(&str, Vec<u64>)]) -> ApiResponse {
        ApiResponse {
            index: index.iter().map(|s| s.to_string()).collect(),
            series: series
                .iter()
                .map(|(k, data)| {
                    (
                        k.to_string(),
                        Series {
                            name: String::new(),
                            total: data.iter().sum(),
                            data: data.clone(),
                        },
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn label_formatting() {
        assert_eq!(json_to_date_str("2015-01-01T00:00:00Z").unwrap(), "1 Jan");
        assert_eq!(json_to_date_str("2015-12-25").unwrap(), "25 Dec");
        assert!(json_to_date_str("Jan 1st").is_err());
    }

    #[test]
    fn dates_round_trip() {
        let date = NaiveDate::from_ymd_opt(2015, 3, 9).unwrap();
        let json = date_to_json(date);
        assert_eq!(json, "2015-03-09");
        assert_eq!(parse_index_date(&json).unwrap(), date);
        assert_eq!(
            parse_index_date(&format!("{json}T00:00:00Z")).unwrap(),
            date
        );
    }

    #[test]
    fn labels_parallel_to_data() {
        let config = transform_response(&response(
            &["2015-01-01T00:00:00Z", "2015-01-02T00:00:00Z"],
            &[("page_views", vec![1, 2]), ("visits", vec![3, 4])],
        ))
        .unwrap();

        assert_eq!(config.labels, vec!["1 Jan", "2 Jan"]);
        assert_eq!(config.datasets.len(), 2);
        for dataset in &config.datasets {
            assert_eq!(dataset.data.len(), config.labels.len());
        }
        assert_eq!(config.max_value(), 4.0);
    }

    #[test]
    fn colors_follow_position_and_cycle() {
        let config = transform_response(&response(
            &["2015-01-01"],
            &[
                ("a", vec![1]),
                ("b", vec![1]),
                ("c", vec![1]),
                ("d", vec![1]),
            ],
        ))
        .unwrap();

        let colors: Vec<&str> = config
            .datasets
            .iter()
            .map(|d| d.stroke_color.as_str())
            .collect();
        assert_eq!(colors, vec!["#f1595f", "#727272", "#79c36a", "#f1595f"]);
        assert!(config
            .datasets
            .iter()
            .all(|d| d.point_stroke_color == POINT_FILL && d.point_color == d.stroke_color));
    }

    #[test]
    fn label_falls_back_to_metric_name_then_key() {
        let config = transform_response(&response(
            &["2015-01-01"],
            &[("custom", vec![1]), ("visits", vec![2])],
        ))
        .unwrap();
        assert_eq!(config.datasets[0].label, "custom");
        assert_eq!(config.datasets[1].label, "Visitors");
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = transform_response(&response(&["2015-01-01"], &[("visits", vec![1, 2])]))
            .unwrap_err();
        assert_eq!(
            err,
            TransformError::LengthMismatch {
                metric: "visits".into(),
                expected: 1,
                actual: 2
            }
        );
    }

    #[test]
    fn empty_response_gives_empty_config() {
        let config = transform_response(&ApiResponse::default()).unwrap();
        assert!(config.is_empty());
        assert_eq!(config.max_value(), 0.0);
    }

    #[test]
    fn serializes_with_chart_js_keys() {
        let config = transform_response(&response(&["2015-01-01"], &[("visits", vec![5])])).unwrap();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["datasets"][0]["strokeColor"], "#f1595f");
        assert_eq!(json["datasets"][0]["pointHighlightFill"], "#fff");
        assert_eq!(json["labels"][0], "1 Jan");
    }
}
