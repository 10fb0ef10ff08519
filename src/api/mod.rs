//! API module - HTTP endpoint serving metric series

mod error;
mod params;
mod server;

pub use error::ApiError;
pub use params::{ApiParams, PARAM_DATE_FORMAT};
pub use server::{build_router, serve, start_server, AppState, ServerError};
