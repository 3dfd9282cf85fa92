//! Dashboard Main Application
//! Main window with control panel, charts and data table.

use crate::config::AppConfig;
use crate::data::{DataMode, DataProcessor, Dataset, PeriodTotal, PreparedRow};
use crate::export::{dataset_records, ArtifactSink, CsvExporter, DialogSink, SaveOutcome};
use crate::gui::theme::{self, SPACING_MEDIUM};
use crate::gui::{
    ChartViewer, ControlPanel, ControlPanelAction, StatusKind, TableView, ThemeSignal, ViewAction,
    ViewState,
};
use crate::stats::{SumAuditor, ValidationReport};
use egui::{RichText, SidePanel};

/// Main application window.
pub struct DashboardApp {
    config: AppConfig,
    dataset: Dataset,
    // Derived once; the dataset never changes
    report: ValidationReport,
    raw_rows: Vec<PreparedRow>,
    normalized_rows: Vec<PreparedRow>,
    totals: Vec<PeriodTotal>,

    state: ViewState,
    theme_signal: ThemeSignal,
    applied_dark: Option<bool>,

    control_panel: ControlPanel,
    sink: Box<dyn ArtifactSink>,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig, dataset: Dataset) -> Self {
        let report = SumAuditor::audit(&dataset);
        let state = ViewState {
            show_grid: config.show_grid,
            ..ViewState::default()
        };

        Self {
            report,
            raw_rows: DataProcessor::prepare(&dataset, DataMode::Raw),
            normalized_rows: DataProcessor::prepare(&dataset, DataMode::Normalized),
            totals: DataProcessor::period_totals(&dataset),
            config,
            dataset,
            state,
            theme_signal: ThemeSignal::default(),
            applied_dark: None,
            control_panel: ControlPanel::new(),
            sink: Box::new(DialogSink),
        }
    }

    fn dispatch(&mut self, action: ViewAction) {
        log::debug!("View action: {:?}", action);
        self.state = self.state.clone().reduce(action);
    }

    fn rows(&self) -> &[PreparedRow] {
        match self.state.mode {
            DataMode::Raw => &self.raw_rows,
            DataMode::Normalized => &self.normalized_rows,
        }
    }

    /// Follow the platform theme and apply visuals when the flag changes.
    fn sync_theme(&mut self, ctx: &egui::Context) {
        if let Some(action) = self.theme_signal.observe(theme::system_dark_mode(ctx)) {
            self.dispatch(action);
        }
        if self.applied_dark != Some(self.state.dark_mode) {
            let name = if self.state.dark_mode { "dark" } else { "light" };
            log::debug!("Applying {} theme", name);
            theme::apply_theme(ctx, self.state.dark_mode);
            self.applied_dark = Some(self.state.dark_mode);
        }
    }

    /// Handle CSV export of the full dataset
    fn handle_export_csv(&mut self) {
        let records = dataset_records(&self.dataset);
        match CsvExporter::export(&records, &self.config.export_file_name, self.sink.as_mut()) {
            Ok(SaveOutcome::Saved(path)) => {
                self.control_panel.set_status(
                    StatusKind::Success,
                    format!("Exported {} rows to {}", records.len(), path.display()),
                );
            }
            Ok(SaveOutcome::Cancelled) => {
                self.control_panel
                    .set_status(StatusKind::Info, "Export cancelled");
            }
            Err(e) => {
                self.control_panel
                    .set_status(StatusKind::Error, format!("Error: {}", e));
            }
        }
    }

    fn period_range(&self) -> String {
        match (self.dataset.records().first(), self.dataset.records().last()) {
            (Some(first), Some(last)) => format!("{} ~ {}", first.period(), last.period()),
            _ => String::new(),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_theme(ctx);

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(360.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui, &self.state, &self.report);

                    match action {
                        ControlPanelAction::Update(view_action) => self.dispatch(view_action),
                        ControlPanelAction::ExportCsv => self.handle_export_csv(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Charts and table
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.label(
                            RichText::new(&self.config.title)
                                .size(28.0)
                                .strong()
                                .color(theme::ACCENT_COLOR),
                        );
                        ui.label(RichText::new(self.period_range()).size(16.0));
                        ui.label(RichText::new("출처: 사용자 제공 표").size(12.0).weak());
                    });
                    ui.add_space(SPACING_MEDIUM);

                    ChartViewer::show(ui, self.rows(), &self.totals, &self.state);
                    ui.add_space(SPACING_MEDIUM);
                    TableView::show(ui, self.rows(), &self.dataset, &self.state);
                });
        });
    }
}
