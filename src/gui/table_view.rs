//! Data Table Widget
//! Per-period values for the active series, with stated totals in raw mode.

use crate::charts::series_color;
use crate::data::{DataProcessor, Dataset, PreparedRow};
use crate::gui::state::ViewState;
use crate::gui::theme::{self, SPACING_MEDIUM};
use egui::RichText;

pub struct TableView;

impl TableView {
    pub fn show(ui: &mut egui::Ui, rows: &[PreparedRow], dataset: &Dataset, state: &ViewState) {
        let series = state.active_series();

        theme::card_frame(ui).show(ui, |ui| {
            ui.label(RichText::new("데이터 표").size(20.0).strong());
            ui.label(RichText::new("상세 수치 데이터").size(13.0).weak());
            ui.add_space(SPACING_MEDIUM);

            egui::Grid::new("data_table")
                .striped(true)
                .min_col_width(90.0)
                .spacing([16.0, 8.0])
                .show(ui, |ui| {
                    // Headers
                    ui.label(RichText::new("연도").strong());
                    for &facility in &series {
                        ui.label(
                            RichText::new(facility.label())
                                .strong()
                                .color(series_color(facility)),
                        );
                    }
                    if !state.normalized() {
                        ui.label(RichText::new("합계").strong());
                    }
                    ui.end_row();

                    for row in rows {
                        ui.label(RichText::new(&row.period).size(14.0));
                        for &facility in &series {
                            let text = DataProcessor::format_cell(row.value(facility), state.mode);
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                ui.label(
                                    RichText::new(text)
                                        .size(14.0)
                                        .monospace()
                                        .color(series_color(facility)),
                                );
                            });
                        }
                        if !state.normalized() {
                            let total = dataset.find(&row.period).map(|r| r.stated_total());
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                ui.label(
                                    RichText::new(DataProcessor::format_count(total))
                                        .size(14.0)
                                        .monospace()
                                        .strong(),
                                );
                            });
                        }
                        ui.end_row();
                    }
                });
        });
    }
}
