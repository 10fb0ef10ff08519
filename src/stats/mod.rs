//! Stats module - per-series summaries

mod calculator;

pub use calculator::{SeriesSummary, StatsCalculator};
