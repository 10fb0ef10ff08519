//! Statistics Calculator Module
//! Descriptive statistics for each plotted series.

use crate::client::ChartConfig;
use statrs::statistics::{Data, Median, Statistics};

/// Summary of one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub name: String,
    pub count: usize,
    pub total: f64,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub std: f64,
}

impl Default for SeriesSummary {
    fn default() -> Self {
        Self {
            name: String::new(),
            count: 0,
            total: 0.0,
            mean: f64::NAN,
            median: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
            std: f64::NAN,
        }
    }
}

pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    pub fn summarize(name: &str, values: &[f64]) -> SeriesSummary {
        if values.is_empty() {
            return SeriesSummary {
                name: name.to_string(),
                ..Default::default()
            };
        }

        // Sample std is undefined for a single point
        let std = if values.len() > 1 {
            Statistics::std_dev(values)
        } else {
            0.0
        };

        SeriesSummary {
            name: name.to_string(),
            count: values.len(),
            total: values.iter().sum(),
            mean: Statistics::mean(values),
            median: Data::new(values.to_vec()).median(),
            min: Statistics::min(values),
            max: Statistics::max(values),
            std,
        }
    }

    /// One summary per dataset, in dataset order.
    pub fn summarize_chart(config: &ChartConfig) -> Vec<SeriesSummary> {
        config
            .datasets
            .iter()
            .map(|d| Self::summarize(&d.label, &d.data))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_of_known_values() {
        let s = StatsCalculator::summarize("Visitors", &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(s.count, 8);
        assert_eq!(s.total, 40.0);
        assert!((s.mean - 5.0).abs() < 1e-12);
        assert!((s.median - 4.5).abs() < 1e-12);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 9.0);
        // sample standard deviation
        assert!((s.std - 2.138089935299395).abs() < 1e-9);
    }

    #[test]
    fn single_value_has_zero_spread() {
        let s = StatsCalculator::summarize("Page Views", &[3.0]);
        assert_eq!(s.count, 1);
        assert_eq!(s.median, 3.0);
        assert_eq!(s.std, 0.0);
    }

    #[test]
    fn empty_values_are_nan() {
        let s = StatsCalculator::summarize("Visitors", &[]);
        assert_eq!(s.count, 0);
        assert_eq!(s.total, 0.0);
        assert!(s.mean.is_nan() && s.median.is_nan() && s.std.is_nan());
    }

    #[test]
    fn summarizes_each_dataset() {
        let json = r##"{"labels":["1 Jan","2 Jan"],"datasets":[
            {"label":"A","data":[1.0,3.0],"strokeColor":"#f1595f","pointColor":"#f1595f",
             "pointHighlightStroke":"#f1595f","pointStrokeColor":"#fff","pointHighlightFill":"#fff"},
            {"label":"B","data":[0.0,0.0],"strokeColor":"#727272","pointColor":"#727272",
             "pointHighlightStroke":"#727272","pointStrokeColor":"#fff","pointHighlightFill":"#fff"}]}"##;
        let config: ChartConfig = serde_json::from_str(json).unwrap();

        let summaries = StatsCalculator::summarize_chart(&config);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].name, "A");
        assert_eq!(summaries[0].mean, 2.0);
        assert_eq!(summaries[1].total, 0.0);
    }
}
