//! Chart Viewer Widget
//! Series trend card and period totals card.

use crate::charts::{ChartPlotter, Trend};
use crate::data::{PeriodTotal, PreparedRow};
use crate::gui::state::ViewState;
use crate::gui::theme::{self, SPACING_MEDIUM};
use egui::RichText;

pub struct ChartViewer;

impl ChartViewer {
    pub fn show(
        ui: &mut egui::Ui,
        rows: &[PreparedRow],
        totals: &[PeriodTotal],
        state: &ViewState,
    ) {
        let series = state.active_series();

        theme::card_frame(ui).show(ui, |ui| {
            ui.label(RichText::new("관리소별 추이").size(20.0).strong());
            let subtitle = if state.normalized() {
                let base = rows.first().map(|r| r.period.as_str()).unwrap_or("-");
                format!("{} 기준 정규화 (%)", base)
            } else {
                "수감 인원 (명)".to_string()
            };
            ui.label(RichText::new(subtitle).size(13.0).weak());
            ui.add_space(SPACING_MEDIUM);

            if series.is_empty() {
                ui.label("선택된 관리소가 없습니다");
            } else {
                ChartPlotter::draw_series_chart(
                    ui,
                    rows,
                    &series,
                    state.mode,
                    state.show_grid,
                    state.dark_mode,
                );
            }
        });

        ui.add_space(SPACING_MEDIUM);

        theme::card_frame(ui).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new("연도별 합계").size(20.0).strong());
                    ui.label(
                        RichText::new("전체 수감 인원 합계 및 전년대비 증감률")
                            .size(13.0)
                            .weak(),
                    );
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new("■ 증가").color(Trend::Up.color(state.dark_mode)),
                    );
                    ui.label(
                        RichText::new("■ 감소").color(Trend::Down.color(state.dark_mode)),
                    );
                });
            });
            ui.add_space(SPACING_MEDIUM);

            ChartPlotter::draw_totals_chart(ui, totals, state.show_grid, state.dark_mode);
        });
    }
}
