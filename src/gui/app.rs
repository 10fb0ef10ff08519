//! SiteView Main Application
//! Main window with control panel and chart viewer.

use crate::charts::StaticChartRenderer;
use crate::client::{ApiClient, ClientError, DashboardController};
use crate::config::Settings;
use crate::data::ApiResponse;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tracing::{error, info};

/// Main application window.
pub struct SiteviewApp {
    settings: Settings,
    controller: DashboardController,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async fetch, one at a time
    fetch_rx: Option<Receiver<Result<ApiResponse, ClientError>>>,
}

impl SiteviewApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        let controller = DashboardController::new(&settings.defaults);
        let control_panel = ControlPanel::new(&controller);

        let mut app = Self {
            settings,
            controller,
            control_panel,
            chart_viewer: ChartViewer::new(),
            fetch_rx: None,
        };

        // Generate the initial dataset
        app.start_fetch();
        app
    }

    fn is_fetching(&self) -> bool {
        self.fetch_rx.is_some()
    }

    /// Start a fetch in a background thread
    fn start_fetch(&mut self) {
        if self.is_fetching() {
            return;
        }

        if let Err(e) = self.control_panel.apply_dates(&mut self.controller) {
            self.control_panel.set_status(&format!("Error: {}", e));
            return;
        }

        let query = self.controller.query();
        let api_url = self.settings.client.api_url.clone();

        let (tx, rx) = channel();
        self.fetch_rx = Some(rx);
        self.control_panel.busy = true;
        self.control_panel.set_status("Fetching data...");

        thread::spawn(move || {
            let result = ApiClient::new(&api_url).and_then(|client| client.fetch(&query));
            let _ = tx.send(result);
        });
    }

    /// Check for fetch results
    fn check_fetch_results(&mut self) {
        let Some(rx) = self.fetch_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(result) => {
                self.control_panel.busy = false;
                match self.controller.apply_result(result) {
                    Ok(()) => {
                        let status = match &self.controller.chart_data {
                            Some(chart) => format!(
                                "Loaded {} series over {} days",
                                chart.datasets.len(),
                                chart.labels.len()
                            ),
                            None => "No data for the selected range".to_string(),
                        };
                        self.control_panel.set_status(&status);
                        self.chart_viewer.set_chart(self.controller.chart_data.clone());
                    }
                    Err(e) => {
                        self.control_panel.set_status(&format!("Error: {}", e));
                    }
                }
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => {
                // Put receiver back if still needed
                self.fetch_rx = Some(rx);
            }
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                self.control_panel.busy = false;
                self.control_panel.set_status("Error: fetch thread exited");
            }
        }
    }

    /// Save the current chart as an image
    fn handle_export_png(&mut self) {
        let Some(chart) = &self.chart_viewer.chart else {
            self.control_panel.set_status("No chart to export");
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .add_filter("SVG Image", &["svg"])
            .set_file_name("siteview.png")
            .save_file()
        else {
            return; // User cancelled
        };

        let size = self.settings.chart;
        match StaticChartRenderer::render_to_file(chart, &path, "Site Traffic", size.width, size.height)
        {
            Ok(()) => {
                info!(path = %path.display(), "chart exported");
                self.control_panel
                    .set_status(&format!("Exported {}", path.display()));
            }
            Err(e) => {
                error!(error = %e, "export failed");
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for SiteviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_fetch_results();

        // Request repaint while fetching
        if self.is_fetching() {
            ctx.request_repaint();
        }

        let can_export = self.chart_viewer.chart.is_some();

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self
                        .control_panel
                        .show(ui, &mut self.controller, can_export);

                    match action {
                        ControlPanelAction::Refresh => self.start_fetch(),
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.chart_viewer.show(ui);
            });
        });
    }
}
