//! SiteView - Site Traffic Analytics API & Line Chart Dashboard
//!
//! Serves daily unique visitors, page views and visits over HTTP, reshapes
//! the `{index, series}` documents into line chart configs, and renders them
//! in a desktop dashboard or to PNG/SVG files.

pub mod api;
pub mod charts;
pub mod client;
pub mod config;
pub mod data;
pub mod gui;
pub mod logging;
pub mod stats;
