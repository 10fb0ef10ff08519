//! Data module - metric store and API response assembly

mod metric;
mod response;
pub mod series;
mod store;

pub use metric::{Metric, UnknownMetric};
pub use response::{ApiResponse, Series};
pub use store::{FixedStore, MetricStore, RandomStore, Row, StoreError, MAX_DAILY_VALUE};
