//! REST client for the metrics API.

use crate::client::date_to_json;
use crate::data::{ApiResponse, Metric};
use chrono::NaiveDate;
use reqwest::blocking::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API returned {status}: {message}")]
    Status { status: u16, message: String },
}

/// Parameters of one `/api` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub metrics: Vec<Metric>,
}

impl ApiQuery {
    /// Query pairs, with `metrics` repeated once per metric.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("start_date", date_to_json(self.start_date)),
            ("end_date", date_to_json(self.end_date)),
        ];
        pairs.extend(self.metrics.iter().map(|m| ("metrics", m.id().to_string())));
        pairs
    }
}

/// Blocking HTTP client; call it off the UI thread.
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` is the full endpoint, e.g. `http://127.0.0.1:5000/api`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn fetch(&self, query: &ApiQuery) -> Result<ApiResponse, ClientError> {
        debug!(url = %self.base_url, ?query, "fetching series");

        let response = self
            .http
            .get(&self.base_url)
            .query(&query.to_pairs())
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
                .unwrap_or(body);
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<ApiResponse>()?)
    }
}
