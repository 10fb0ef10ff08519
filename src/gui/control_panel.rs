//! Control Panel Widget
//! Left side panel with the date range, metric toggles and actions.

use crate::client::{date_to_json, DashboardController};
use crate::data::Metric;
use chrono::NaiveDate;
use egui::{Color32, RichText};

/// Left side control panel bound to the dashboard controller.
pub struct ControlPanel {
    pub start_text: String,
    pub end_text: String,
    pub status: String,
    pub busy: bool,
}

impl ControlPanel {
    pub fn new(controller: &DashboardController) -> Self {
        Self {
            start_text: date_to_json(controller.start_date),
            end_text: date_to_json(controller.end_date),
            status: "Ready".to_string(),
            busy: false,
        }
    }

    /// Copy the typed dates into the controller.
    pub fn apply_dates(&self, controller: &mut DashboardController) -> Result<(), String> {
        let start = parse_input(&self.start_text, "Start date")?;
        let end = parse_input(&self.end_text, "End date")?;
        if start > end {
            return Err("Start date is after end date".to_string());
        }
        controller.start_date = start;
        controller.end_date = end;
        Ok(())
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the control panel
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        controller: &mut DashboardController,
        can_export: bool,
    ) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📈 SiteView")
                    .size(22.0)
                    .color(Color32::from_rgb(241, 89, 95)),
            );
            ui.label(
                RichText::new("Traffic Dashboard")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Date Range Section =====
        ui.label(RichText::new("📅 Date Range").size(14.0).strong());
        ui.add_space(5.0);

        let label_width = 80.0;
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Start:"));
            ui.text_edit_singleline(&mut self.start_text);
        });
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("End:"));
            ui.text_edit_singleline(&mut self.end_text);
        });
        ui.label(RichText::new("YYYY-mm-dd").size(10.0).color(Color32::GRAY));

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Metrics Section =====
        ui.label(RichText::new("📊 Metrics").size(14.0).strong());
        ui.add_space(5.0);

        for metric in Metric::ALL {
            let mut enabled = controller.is_enabled(metric);
            if ui.checkbox(&mut enabled, metric.display_name()).changed() {
                controller.set_metric(metric, enabled);
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(!self.busy, |ui| {
                let button = egui::Button::new(RichText::new("⟳ Refresh").size(16.0))
                    .min_size(egui::vec2(200.0, 35.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::Refresh;
                }
            });

            ui.add_space(8.0);

            ui.add_enabled_ui(can_export && !self.busy, |ui| {
                let export = egui::Button::new(RichText::new("🖼 Export PNG").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(export).clicked() {
                    action = ControlPanelAction::ExportPng;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        if self.busy {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new("Fetching...").size(11.0));
            });
        }

        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

fn parse_input(text: &str, what: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| format!("{} must be YYYY-mm-dd, got {:?}", what, text))
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    Refresh,
    ExportPng,
}
