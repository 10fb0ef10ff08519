//! Static Chart Renderer
//! Writes the line chart to PNG or SVG with plotters.
//!
//! Layout:
//! 1. Caption: title and date span
//! 2. Line per dataset with point markers, x-axis labelled with index dates
//! 3. Legend in the upper right corner

use crate::charts::color::rgb_or_fallback;
use crate::charts::ChartPlotter;
use crate::client::ChartConfig;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Most x-axis labels drawn before thinning kicks in.
const MAX_X_LABELS: usize = 15;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Nothing to render: chart has no data")]
    NothingToRender,
    #[error("Drawing failed: {0}")]
    Draw(String),
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render to `path`; `.svg` selects the SVG backend, anything else PNG.
    pub fn render_to_file(
        config: &ChartConfig,
        path: &Path,
        title: &str,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        if config.is_empty() {
            return Err(RenderError::NothingToRender);
        }

        if Self::is_svg(path) {
            let root = SVGBackend::new(path, (width, height)).into_drawing_area();
            Self::draw(&root, config, title)?;
        } else {
            let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
            Self::draw(&root, config, title)?;
        }

        info!(
            path = %path.display(),
            datasets = config.datasets.len(),
            points = config.labels.len(),
            "chart written"
        );
        Ok(())
    }

    pub fn is_svg(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("svg"))
            .unwrap_or(false)
    }

    /// Top of the y axis: 10% headroom over the largest value, at least 1.
    pub fn y_upper(max_value: f64) -> f64 {
        if max_value.is_nan() || max_value <= 0.0 {
            1.0
        } else {
            (max_value * 11.0 / 10.0).ceil()
        }
    }

    /// `"1 Jan to 15 Jan"`, or the single label.
    pub fn date_span(config: &ChartConfig) -> String {
        match (config.labels.first(), config.labels.last()) {
            (Some(first), Some(last)) if first != last => format!("{} to {}", first, last),
            (Some(first), _) => first.clone(),
            _ => String::new(),
        }
    }

    fn draw<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        config: &ChartConfig,
        title: &str,
    ) -> Result<(), RenderError>
    where
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE).map_err(draw_err)?;

        let n = config.labels.len();
        let x_max = n.saturating_sub(1).max(1) as f64;
        let y_max = Self::y_upper(config.max_value());
        let caption = format!("{} ({})", title, Self::date_span(config));

        let mut chart = ChartBuilder::on(root)
            .caption(caption, ("sans-serif", 22))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0f64..x_max, 0f64..y_max)
            .map_err(draw_err)?;

        let labels = config.labels.clone();
        let x_formatter = move |x: &f64| ChartPlotter::x_label(&labels, *x);

        chart
            .configure_mesh()
            .x_labels(n.clamp(2, MAX_X_LABELS))
            .x_label_formatter(&x_formatter)
            .y_desc("Count")
            .draw()
            .map_err(draw_err)?;

        for dataset in &config.datasets {
            let (r, g, b) = rgb_or_fallback(&dataset.stroke_color);
            let stroke = RGBColor(r, g, b);
            let (r, g, b) = rgb_or_fallback(&dataset.point_color);
            let point = RGBColor(r, g, b);

            let points: Vec<(f64, f64)> = dataset
                .data
                .iter()
                .enumerate()
                .map(|(i, &v)| (i as f64, v))
                .collect();

            chart
                .draw_series(LineSeries::new(points.iter().copied(), stroke.stroke_width(2)))
                .map_err(draw_err)?
                .label(dataset.label.clone())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], stroke.stroke_width(2))
                });

            chart
                .draw_series(
                    points
                        .iter()
                        .map(|&(x, y)| Circle::new((x, y), 3, point.filled())),
                )
                .map_err(draw_err)?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::transform_response;
    use crate::data::ApiResponse;

    fn two_day_chart() -> ChartConfig {
        let json = r#"{"index":["2015-01-01T00:00:00Z","2015-01-02T00:00:00Z"],
            "series":{"page_views":{"name":"Page Views","total":9,"data":[4,5]},
                      "visits":{"name":"Visitors","total":3,"data":[1,2]}}}"#;
        let response: ApiResponse = serde_json::from_str(json).unwrap();
        transform_response(&response).unwrap()
    }

    #[test]
    fn writes_png_and_svg() {
        let dir = tempfile::tempdir().unwrap();
        let chart = two_day_chart();

        for name in ["chart.png", "chart.svg"] {
            let path = dir.path().join(name);
            StaticChartRenderer::render_to_file(&chart, &path, "Site Traffic", 640, 320).unwrap();
            let written = std::fs::metadata(&path).unwrap();
            assert!(written.len() > 0, "{name} is empty");
        }
    }

    #[test]
    fn empty_chart_is_not_rendered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        let err = StaticChartRenderer::render_to_file(
            &ChartConfig::default(),
            &path,
            "Site Traffic",
            800,
            400,
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::NothingToRender));
        assert!(!path.exists());
    }

    #[test]
    fn backend_follows_extension() {
        assert!(StaticChartRenderer::is_svg(Path::new("out/chart.SVG")));
        assert!(!StaticChartRenderer::is_svg(Path::new("chart.png")));
        assert!(!StaticChartRenderer::is_svg(Path::new("chart")));
    }

    #[test]
    fn y_axis_has_headroom() {
        assert_eq!(StaticChartRenderer::y_upper(0.0), 1.0);
        assert_eq!(StaticChartRenderer::y_upper(100.0), 110.0);
        assert_eq!(StaticChartRenderer::y_upper(7.0), 8.0);
        assert_eq!(StaticChartRenderer::y_upper(f64::NAN), 1.0);
    }

    #[test]
    fn date_span_uses_first_and_last_label() {
        let mut config = ChartConfig {
            labels: vec!["1 Jan".into(), "2 Jan".into(), "15 Jan".into()],
            datasets: vec![],
        };
        assert_eq!(StaticChartRenderer::date_span(&config), "1 Jan to 15 Jan");
        config.labels.truncate(1);
        assert_eq!(StaticChartRenderer::date_span(&config), "1 Jan");
        config.labels.clear();
        assert_eq!(StaticChartRenderer::date_span(&config), "");
    }
}
