//! Chart Viewer Widget
//! Central panel showing the traffic line chart and the series summary.

use crate::charts::ChartPlotter;
use crate::client::ChartConfig;
use crate::stats::{SeriesSummary, StatsCalculator};
use egui::{Color32, RichText};

const CHART_HEIGHT: f32 = 420.0;

/// Displays the current chart, or a placeholder when there is none.
#[derive(Default)]
pub struct ChartViewer {
    pub chart: Option<ChartConfig>,
    summaries: Vec<SeriesSummary>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_chart(&mut self, chart: Option<ChartConfig>) {
        self.summaries = chart
            .as_ref()
            .map(StatsCalculator::summarize_chart)
            .unwrap_or_default();
        self.chart = chart;
    }

    pub fn summaries(&self) -> &[SeriesSummary] {
        &self.summaries
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(chart) = &self.chart else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ui.label(
            RichText::new("Site Traffic")
                .size(18.0)
                .strong(),
        );
        ui.add_space(8.0);

        ChartPlotter::draw_line_chart(ui, chart, CHART_HEIGHT);

        ui.add_space(10.0);

        let colors: Vec<Color32> = chart
            .datasets
            .iter()
            .map(|d| ChartPlotter::color32(&d.stroke_color))
            .collect();
        ChartPlotter::draw_summary_table(ui, &self.summaries, &colors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::transform_response;
    use crate::data::{ApiResponse, Series};

    #[test]
    fn summaries_follow_chart() {
        let mut response = ApiResponse {
            index: vec!["2015-01-01T00:00:00Z".into(), "2015-01-02T00:00:00Z".into()],
            ..Default::default()
        };
        response.series.insert(
            "visits".into(),
            Series {
                name: "Visitors".into(),
                total: 6,
                data: vec![2, 4],
            },
        );

        let mut viewer = ChartViewer::new();
        viewer.set_chart(Some(transform_response(&response).unwrap()));
        assert_eq!(viewer.summaries().len(), 1);
        assert_eq!(viewer.summaries()[0].total, 6.0);

        viewer.set_chart(None);
        assert!(viewer.summaries().is_empty());
        assert!(viewer.chart.is_none());
    }
}
