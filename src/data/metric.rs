//! Metric identifiers
//! The closed set of traffic metrics the store knows about.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown metric: {0}")]
pub struct UnknownMetric(pub String);

/// A named numeric time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    UniqueVisitors,
    PageViews,
    Visits,
}

impl Metric {
    /// All metrics in declaration order.
    pub const ALL: [Metric; 3] = [Metric::UniqueVisitors, Metric::PageViews, Metric::Visits];

    /// Identifier used on the wire and as the series key.
    pub fn id(self) -> &'static str {
        match self {
            Metric::UniqueVisitors => "unique_visitors",
            Metric::PageViews => "page_views",
            Metric::Visits => "visits",
        }
    }

    /// Friendly name shown in legends and tables.
    pub fn display_name(self) -> &'static str {
        match self {
            Metric::UniqueVisitors => "Unique Visitors",
            Metric::PageViews => "Page Views",
            Metric::Visits => "Visitors",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.id() == s)
            .ok_or_else(|| UnknownMetric(s.to_string()))
    }
}
