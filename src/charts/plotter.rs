//! Chart Plotter Module
//! Interactive line chart and summary table using egui_plot.

use crate::charts::color::rgb_or_fallback;
use crate::client::ChartConfig;
use crate::stats::SeriesSummary;
use egui::{Color32, RichText};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

pub struct ChartPlotter;

impl ChartPlotter {
    /// egui color for a dataset's `#rrggbb` string.
    pub fn color32(hex: &str) -> Color32 {
        let (r, g, b) = rgb_or_fallback(hex);
        Color32::from_rgb(r, g, b)
    }

    /// Label for an x position, empty between or outside the index.
    pub fn x_label(labels: &[String], x: f64) -> String {
        if x < 0.0 || (x - x.round()).abs() > 1e-6 {
            return String::new();
        }
        labels.get(x.round() as usize).cloned().unwrap_or_default()
    }

    /// Draw a line per dataset, x = index position, y = value.
    pub fn draw_line_chart(ui: &mut egui::Ui, config: &ChartConfig, height: f32) {
        let labels = config.labels.clone();

        Plot::new("traffic_line_chart")
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .include_y(0.0)
            .y_axis_label("Count")
            .x_axis_formatter(move |mark, _range| Self::x_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                for dataset in &config.datasets {
                    let stroke = Self::color32(&dataset.stroke_color);
                    let point = Self::color32(&dataset.point_color);

                    let points: Vec<[f64; 2]> = dataset
                        .data
                        .iter()
                        .enumerate()
                        .map(|(i, &v)| [i as f64, v])
                        .collect();

                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(points.iter().copied()))
                            .color(stroke)
                            .width(2.0)
                            .name(&dataset.label),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::from_iter(points.iter().copied()))
                            .radius(3.5)
                            .color(point)
                            .name(&dataset.label),
                    );
                }
            });
    }

    /// Draw the per-series summary table.
    pub fn draw_summary_table(ui: &mut egui::Ui, summaries: &[SeriesSummary], colors: &[Color32]) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("series_summary_table")
                    .striped(true)
                    .min_col_width(60.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for header in ["Metric", "Days", "Total", "Mean", "Median", "Min", "Max", "Std"] {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.end_row();

                        let default_text_color = ui.visuals().text_color();
                        for (i, s) in summaries.iter().enumerate() {
                            let color = colors.get(i).copied().unwrap_or(default_text_color);
                            ui.label(RichText::new(&s.name).size(11.0).color(color));
                            ui.label(RichText::new(s.count.to_string()).size(11.0));
                            ui.label(RichText::new(format!("{:.0}", s.total)).size(11.0));
                            for value in [s.mean, s.median, s.min, s.max, s.std] {
                                let text = if value.is_nan() {
                                    "-".to_string()
                                } else {
                                    format!("{:.2}", value)
                                };
                                ui.label(RichText::new(text).size(11.0));
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}
