//! API errors and their HTTP mapping.

use crate::data::{StoreError, UnknownMetric};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid {param}: {value:?} (expected YYYY-mm-dd)")]
    InvalidDate { param: &'static str, value: String },
    #[error(transparent)]
    UnknownMetric(#[from] UnknownMetric),
    #[error("start_date {start} is after end_date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("range of {days} days exceeds the limit of {max}")]
    RangeTooLong { days: i64, max: i64 },
    #[error("store failure: {0}")]
    Store(#[from] StoreError),
    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Store(_) | ApiError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "api request failed");
        } else {
            warn!(error = %self, "rejected api request");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
