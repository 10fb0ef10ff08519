//! API document shapes shared by the server and the client.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One metric's values, aligned to the response index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    /// Friendly metric name.
    #[serde(default)]
    pub name: String,
    /// Sum of `data`.
    #[serde(default)]
    pub total: u64,
    pub data: Vec<u64>,
}

/// Body of `GET /api`.
///
/// `index` holds one `YYYY-mm-ddT00:00:00Z` string per day; every series in
/// `series` has exactly one value per index entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub index: Vec<String>,
    #[serde(default)]
    pub series: BTreeMap<String, Series>,
}

impl ApiResponse {
    /// True when no series carries any data.
    ///
    /// An empty `index` alone does not count: series data without dates is
    /// malformed, not empty.
    pub fn is_empty(&self) -> bool {
        self.series.values().all(|s| s.data.is_empty())
    }
}
