//! Client module - fetching, reshaping and view state

mod api_client;
mod controller;
mod transform;

pub use api_client::{ApiClient, ApiQuery, ClientError};
pub use controller::{ControllerError, DashboardController};
pub use transform::{
    date_to_json, json_to_date_str, parse_index_date, transform_response, ChartConfig, Dataset,
    TransformError, PALETTE, POINT_FILL,
};
