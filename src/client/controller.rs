//! Dashboard Controller
//! View model holding the selected range and metrics plus the current chart.

use crate::client::{transform_response, ApiClient, ApiQuery, ChartConfig, ClientError, TransformError};
use crate::config::DateDefaults;
use crate::data::{ApiResponse, Metric};
use chrono::NaiveDate;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ControllerError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("Bad API response: {0}")]
    Transform(#[from] TransformError),
}

/// State behind the dashboard.
///
/// `chart_data` is `None` until a response with at least one non-empty series
/// has been applied. Failed refreshes keep the previous chart.
#[derive(Debug, Clone)]
pub struct DashboardController {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Toggle per metric, in `Metric::ALL` order.
    pub metrics: Vec<(Metric, bool)>,
    pub chart_data: Option<ChartConfig>,
    pub last_error: Option<String>,
}

impl DashboardController {
    pub fn new(defaults: &DateDefaults) -> Self {
        Self {
            start_date: defaults.start_date,
            end_date: defaults.end_date,
            metrics: Metric::ALL.iter().map(|&m| (m, true)).collect(),
            chart_data: None,
            last_error: None,
        }
    }

    pub fn set_metric(&mut self, metric: Metric, enabled: bool) {
        if let Some(entry) = self.metrics.iter_mut().find(|(m, _)| *m == metric) {
            entry.1 = enabled;
        }
    }

    pub fn is_enabled(&self, metric: Metric) -> bool {
        self.metrics.iter().any(|&(m, on)| m == metric && on)
    }

    /// Enabled metrics in declaration order.
    pub fn selected_metrics(&self) -> Vec<Metric> {
        self.metrics
            .iter()
            .filter(|(_, on)| *on)
            .map(|(m, _)| *m)
            .collect()
    }

    pub fn query(&self) -> ApiQuery {
        ApiQuery {
            start_date: self.start_date,
            end_date: self.end_date,
            metrics: self.selected_metrics(),
        }
    }

    /// Publish the chart for a response.
    ///
    /// Responses with no plottable data clear the chart.
    pub fn apply_response(&mut self, response: &ApiResponse) -> Result<(), TransformError> {
        self.last_error = None;

        if response.is_empty() {
            info!("response has no series data; clearing chart");
            self.chart_data = None;
            return Ok(());
        }

        let config = transform_response(response)?;
        self.chart_data = (!config.is_empty()).then_some(config);
        Ok(())
    }

    /// Apply the outcome of a fetch, logging and recording failures.
    pub fn apply_result(
        &mut self,
        result: Result<ApiResponse, ClientError>,
    ) -> Result<(), ControllerError> {
        let outcome = match result {
            Ok(response) => self.apply_response(&response).map_err(ControllerError::from),
            Err(e) => Err(ControllerError::from(e)),
        };

        if let Err(e) = &outcome {
            warn!(error = %e, "refresh failed");
            self.last_error = Some(e.to_string());
        }
        outcome
    }

    /// Fetch the current selection and publish it.
    pub fn update_data(&mut self, client: &ApiClient) -> Result<(), ControllerError> {
        let result = client.fetch(&self.query());
        self.apply_result(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Series;

    fn controller() -> DashboardController {
        DashboardController::new(&DateDefaults::default())
    }

    fn response_with(data: Vec<u64>) -> ApiResponse {
        let mut response = ApiResponse {
            index: (1..=data.len())
                .map(|d| format!("2015-01-{d:02}T00:00:00Z"))
                .collect(),
            ..Default::default()
        };
        response.series.insert(
            "visits".into(),
            Series {
                name: "Visitors".into(),
                total: data.iter().sum(),
                data,
            },
        );
        response
    }

    #[test]
    fn defaults_select_every_metric() {
        let c = controller();
        assert_eq!(c.selected_metrics(), Metric::ALL.to_vec());
        assert_eq!(c.query().start_date, DateDefaults::default().start_date);
        assert!(c.chart_data.is_none());
    }

    #[test]
    fn toggling_metrics_keeps_order_without_duplicates() {
        let mut c = controller();
        c.set_metric(Metric::PageViews, false);
        c.set_metric(Metric::Visits, true);
        c.set_metric(Metric::Visits, true);
        assert_eq!(
            c.selected_metrics(),
            vec![Metric::UniqueVisitors, Metric::Visits]
        );
        assert!(!c.is_enabled(Metric::PageViews));

        c.set_metric(Metric::PageViews, true);
        assert_eq!(c.selected_metrics(), Metric::ALL.to_vec());
    }

    #[test]
    fn response_publishes_chart() {
        let mut c = controller();
        c.apply_response(&response_with(vec![1, 2, 3])).unwrap();
        let chart = c.chart_data.as_ref().unwrap();
        assert_eq!(chart.labels, vec!["1 Jan", "2 Jan", "3 Jan"]);
        assert_eq!(chart.datasets[0].data, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn empty_series_clears_chart_without_error() {
        let mut c = controller();
        c.apply_response(&response_with(vec![1])).unwrap();
        assert!(c.chart_data.is_some());

        c.apply_response(&ApiResponse::default()).unwrap();
        assert!(c.chart_data.is_none());

        let mut no_series = response_with(vec![1]);
        no_series.series.clear();
        c.apply_response(&no_series).unwrap();
        assert!(c.chart_data.is_none());
    }

    #[test]
    fn failed_refresh_keeps_previous_chart() {
        let mut c = controller();
        c.apply_response(&response_with(vec![4, 5])).unwrap();

        let err = c
            .apply_result(Err(ClientError::Status {
                status: 400,
                message: "unknown metric: bounces".into(),
            }))
            .unwrap_err();
        assert!(matches!(err, ControllerError::Client(_)));
        assert!(c.chart_data.is_some());
        assert!(c.last_error.as_deref().unwrap().contains("bounces"));
    }

    #[test]
    fn malformed_response_is_recorded() {
        let mut c = controller();
        let mut bad = response_with(vec![1, 2]);
        bad.index.pop();
        let err = c.apply_result(Ok(bad)).unwrap_err();
        assert!(matches!(err, ControllerError::Transform(_)));
        assert!(c.last_error.is_some());
    }

    #[test]
    fn success_clears_last_error() {
        let mut c = controller();
        c.last_error = Some("old".into());
        c.apply_result(Ok(response_with(vec![1]))).unwrap();
        assert!(c.last_error.is_none());
    }

    #[test]
    fn series_without_index_is_an_error() {
        let mut c = controller();
        c.apply_response(&response_with(vec![7])).unwrap();

        let mut bad = response_with(vec![1, 2]);
        bad.index.clear();
        let err = c.apply_result(Ok(bad)).unwrap_err();
        assert!(matches!(
            err,
            ControllerError::Transform(TransformError::LengthMismatch { expected: 0, actual: 2, .. })
        ));
        assert!(c.last_error.is_some());
        assert!(c.chart_data.is_some());
    }
}
