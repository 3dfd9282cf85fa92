//! Control Panel Widget
//! Left side panel with series toggles, display switches, export and audit status.

use crate::charts::series_color;
use crate::data::Facility;
use crate::gui::state::{ViewAction, ViewState};
use crate::gui::theme::{self, SPACING_MEDIUM, SPACING_SMALL};
use crate::stats::ValidationReport;
use egui::{Color32, RichText, Stroke};

/// Severity of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// Left side control panel.
pub struct ControlPanel {
    pub status: String,
    pub status_kind: StatusKind,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            status: "Ready".to_string(),
            status_kind: StatusKind::Info,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, kind: StatusKind, status: impl Into<String>) {
        self.status_kind = kind;
        self.status = status.into();
    }

    /// Draw the control panel
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        state: &ViewState,
        report: &ValidationReport,
    ) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title + theme toggle
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("📊 관리소 추정치")
                    .size(20.0)
                    .color(theme::ACCENT_COLOR),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let icon = if state.dark_mode { "🌙" } else { "☀" };
                if ui
                    .button(RichText::new(icon).size(16.0))
                    .on_hover_text("다크모드 토글")
                    .clicked()
                {
                    action = ControlPanelAction::Update(ViewAction::ToggleTheme);
                }
            });
        });
        ui.add_space(SPACING_SMALL);
        ui.separator();
        ui.add_space(SPACING_SMALL);

        // ===== Audit Section =====
        let audit_color = theme::audit_color(report.pass, state.dark_mode);
        ui.label(
            RichText::new(format!("● {}", report.summary()))
                .size(13.0)
                .strong()
                .color(audit_color),
        );
        if !report.pass {
            ui.add_space(4.0);
            ui.label(RichText::new("합계 불일치 발견:").size(12.0).color(audit_color));
            for mismatch in &report.mismatches {
                ui.label(
                    RichText::new(mismatch.to_string())
                        .size(11.0)
                        .color(audit_color),
                );
            }
        }

        ui.add_space(SPACING_MEDIUM);
        ui.separator();
        ui.add_space(SPACING_SMALL);

        // ===== Series Section =====
        ui.label(RichText::new("관리소 선택").size(14.0).strong());
        ui.add_space(SPACING_SMALL);

        let inactive = if state.dark_mode {
            Color32::from_rgb(163, 163, 163)
        } else {
            Color32::from_rgb(107, 114, 128)
        };

        ui.horizontal_wrapped(|ui| {
            for facility in Facility::ALL {
                let color = series_color(facility);
                let active = state.is_active(facility);
                let (text_color, fill, border) = if active {
                    (color, color.gamma_multiply(0.15), color)
                } else {
                    (inactive, Color32::TRANSPARENT, inactive)
                };

                let pill = egui::Button::new(
                    RichText::new(format!("● {}", facility.label()))
                        .size(13.0)
                        .color(text_color),
                )
                .fill(fill)
                .stroke(Stroke::new(1.5, border))
                .rounding(14.0);

                if ui.add(pill).clicked() {
                    action = ControlPanelAction::Update(ViewAction::ToggleSeries(facility));
                }
            }
        });

        ui.add_space(SPACING_MEDIUM);
        ui.separator();
        ui.add_space(SPACING_SMALL);

        // ===== Display Section =====
        ui.label(RichText::new("표시 설정").size(14.0).strong());
        ui.add_space(SPACING_SMALL);

        let mut normalize = state.normalized();
        if ui.checkbox(&mut normalize, "정규화 모드").changed() {
            action = ControlPanelAction::Update(ViewAction::SetNormalize(normalize));
        }
        let mut grid = state.show_grid;
        if ui.checkbox(&mut grid, "격자선 표시").changed() {
            action = ControlPanelAction::Update(ViewAction::SetGrid(grid));
        }

        ui.add_space(SPACING_MEDIUM);
        ui.separator();
        ui.add_space(SPACING_SMALL);

        // ===== Export =====
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("⬇ CSV 다운로드").size(15.0))
                .min_size(egui::vec2(200.0, 34.0));
            if ui.add(button).clicked() {
                action = ControlPanelAction::ExportCsv;
            }
        });

        ui.add_space(SPACING_SMALL);

        let status_color = match self.status_kind {
            StatusKind::Error => Color32::from_rgb(220, 53, 69),
            StatusKind::Success => Color32::from_rgb(40, 167, 69),
            StatusKind::Info => Color32::GRAY,
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    Update(ViewAction),
    ExportCsv,
}
