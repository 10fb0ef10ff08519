//! Charts module - Chart rendering

mod color;
mod plotter;
mod renderer;

pub use color::{parse_hex_color, rgb_or_fallback};
pub use plotter::ChartPlotter;
pub use renderer::{RenderError, StaticChartRenderer};
