//! Query parameter parsing for `/api`.

use crate::api::ApiError;
use crate::config::DateDefaults;
use crate::data::Metric;
use chrono::NaiveDate;

/// Format of the `start_date` / `end_date` parameters.
pub const PARAM_DATE_FORMAT: &str = "%Y-%m-%d";

/// Validated request for a date range and a set of metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiParams {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub metrics: Vec<Metric>,
}

fn parse_date(param: &'static str, value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, PARAM_DATE_FORMAT).map_err(|_| ApiError::InvalidDate {
        param,
        value: value.to_string(),
    })
}

impl ApiParams {
    /// Parse raw query pairs.
    ///
    /// `metrics` may repeat; empty values are skipped. Missing dates fall back
    /// to `defaults`, moved up to the given start or down to the given end
    /// when the default would invert the range. The range is inclusive and may span at most
    /// `max_range_days` days.
    pub fn from_pairs(
        pairs: &[(String, String)],
        defaults: &DateDefaults,
        max_range_days: i64,
    ) -> Result<Self, ApiError> {
        let mut start_date = None;
        let mut end_date = None;
        let mut metrics = Vec::new();

        for (key, value) in pairs {
            match key.as_str() {
                "start_date" => start_date = Some(parse_date("start_date", value)?),
                "end_date" => end_date = Some(parse_date("end_date", value)?),
                "metrics" if value.is_empty() => {}
                "metrics" => metrics.push(value.parse::<Metric>()?),
                _ => {}
            }
        }

        // A lone bound never lands on the wrong side of its default partner
        let start_date = start_date
            .unwrap_or_else(|| end_date.map_or(defaults.start_date, |end| defaults.start_date.min(end)));
        let end_date = end_date.unwrap_or_else(|| defaults.end_date.max(start_date));

        if start_date > end_date {
            return Err(ApiError::InvalidRange {
                start: start_date,
                end: end_date,
            });
        }

        let days = (end_date - start_date).num_days() + 1;
        if days > max_range_days {
            return Err(ApiError::RangeTooLong {
                days,
                max: max_range_days,
            });
        }

        Ok(Self {
            start_date,
            end_date,
            metrics,
        })
    }
}
