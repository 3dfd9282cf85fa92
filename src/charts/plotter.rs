//! Chart Plotter Module
//! Series line chart and period-totals bar chart using egui_plot.

use crate::data::{DataMode, DataProcessor, Facility, PeriodTotal, PreparedRow};
use egui::{Align2, Color32, RichText};
use egui_plot::{
    Bar, BarChart, GridMark, HLine, Legend, Line, LineStyle, Plot, PlotPoint, PlotPoints, Points,
    Text,
};
use std::ops::RangeInclusive;

/// Okabe–Ito colorblind-safe palette, one color per facility.
pub fn series_color(facility: Facility) -> Color32 {
    match facility {
        Facility::Camp14 => Color32::from_rgb(0, 114, 178),   // Blue
        Facility::Camp15 => Color32::from_rgb(230, 159, 0),   // Orange
        Facility::Camp16 => Color32::from_rgb(0, 158, 115),   // Bluish green
        Facility::Camp17 => Color32::from_rgb(213, 94, 0),    // Vermillion
        Facility::Camp18 => Color32::from_rgb(204, 121, 167), // Reddish purple
        Facility::Camp25 => Color32::from_rgb(86, 180, 233),  // Sky blue
    }
}

/// Direction of a period-over-period change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Flat,
    Up,
    Down,
}

impl Trend {
    /// First period (no change available) and zero change are both flat.
    pub fn from_yoy(yoy: Option<f64>) -> Trend {
        match yoy {
            Some(v) if v > 0.0 => Trend::Up,
            Some(v) if v < 0.0 => Trend::Down,
            _ => Trend::Flat,
        }
    }

    pub fn color(self, dark: bool) -> Color32 {
        match (self, dark) {
            (Trend::Flat, false) => Color32::from_rgb(156, 163, 175),
            (Trend::Flat, true) => Color32::from_rgb(107, 114, 128),
            (Trend::Up, false) => Color32::from_rgb(239, 68, 68),
            (Trend::Up, true) => Color32::from_rgb(220, 38, 38),
            (Trend::Down, false) => Color32::from_rgb(34, 197, 94),
            (Trend::Down, true) => Color32::from_rgb(22, 163, 74),
        }
    }
}

fn reference_color(dark: bool) -> Color32 {
    if dark {
        Color32::from_rgb(239, 68, 68)
    } else {
        Color32::from_rgb(220, 38, 38)
    }
}

/// Period at an exact integer position on the x axis.
fn period_at(periods: &[String], x: f64) -> Option<&str> {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return None;
    }
    periods.get(idx as usize).map(String::as_str)
}

/// Period closest to a hovered x position.
fn nearest_period(periods: &[String], x: f64) -> Option<&str> {
    let idx = x.round();
    if idx < 0.0 {
        return None;
    }
    periods.get(idx as usize).map(String::as_str)
}

/// X axis labels: period names at integer positions only.
fn period_formatter(periods: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark, _range| period_at(&periods, mark.value).unwrap_or_default().to_string()
}

/// Y axis tick label for the series chart.
fn y_axis_label(value: f64, mode: DataMode) -> String {
    match mode {
        DataMode::Raw if value >= 0.0 => DataProcessor::format_count(Some(value.round() as u64)),
        DataMode::Raw => String::new(),
        DataMode::Normalized => DataProcessor::format_percent(Some(value)),
    }
}

/// Hover text for the series chart: series name, period and formatted value.
fn series_hover_label(periods: &[String], name: &str, x: f64, y: f64, mode: DataMode) -> String {
    let period = nearest_period(periods, x).unwrap_or("-");
    let value = DataProcessor::format_cell(Some(y.max(0.0)), mode);
    if name.is_empty() {
        format!("{}\n{}", period, value)
    } else {
        format!("{}\n{}: {}", name, period, value)
    }
}

/// Hover text for a totals bar: period, total and change from the previous period.
fn total_hover_label(total: &PeriodTotal) -> String {
    let count = DataProcessor::format_count(Some(total.total));
    match total.yoy {
        Some(yoy) => format!(
            "{}\n합계: {}\n전년대비: {}",
            total.period,
            count,
            DataProcessor::format_yoy(Some(yoy))
        ),
        None => format!("{}\n합계: {}", total.period, count),
    }
}

/// Draws the dashboard charts.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Line chart of the active series. X axis: period index, Y axis: count or %.
    pub fn draw_series_chart(
        ui: &mut egui::Ui,
        rows: &[PreparedRow],
        series: &[Facility],
        mode: DataMode,
        show_grid: bool,
        dark: bool,
    ) {
        let periods: Vec<String> = rows.iter().map(|r| r.period.clone()).collect();
        let hover_periods = periods.clone();

        Plot::new("series_chart")
            .height(400.0)
            .legend(Legend::default())
            .show_grid(show_grid)
            .allow_scroll(false)
            .include_y(0.0)
            .x_axis_formatter(period_formatter(periods))
            .y_axis_formatter(move |mark, _range| y_axis_label(mark.value, mode))
            .label_formatter(move |name, value| {
                series_hover_label(&hover_periods, name, value.x, value.y, mode)
            })
            .show(ui, |plot_ui| {
                if mode == DataMode::Normalized {
                    plot_ui.hline(
                        HLine::new(100.0)
                            .color(reference_color(dark))
                            .style(LineStyle::Dashed { length: 8.0 })
                            .width(1.5),
                    );
                }

                for &facility in series {
                    let color = series_color(facility);
                    // Unavailable cells are skipped, not plotted as zero
                    let points: Vec<[f64; 2]> = rows
                        .iter()
                        .enumerate()
                        .filter_map(|(i, row)| row.value(facility).map(|v| [i as f64, v]))
                        .collect();

                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(points.iter().copied()))
                            .color(color)
                            .width(2.0)
                            .name(facility.label()),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::from_iter(points.iter().copied()))
                            .radius(4.0)
                            .color(color),
                    );
                }
            });
    }

    /// Bar chart of stated totals, colored by trend and labelled with the change.
    pub fn draw_totals_chart(
        ui: &mut egui::Ui,
        totals: &[PeriodTotal],
        show_grid: bool,
        dark: bool,
    ) {
        let periods: Vec<String> = totals.iter().map(|t| t.period.clone()).collect();
        let hover_periods = periods.clone();
        let label_color = ui.visuals().strong_text_color();

        Plot::new("totals_chart")
            .height(300.0)
            .show_grid(show_grid)
            .allow_scroll(false)
            .allow_drag(false)
            .include_y(0.0)
            .x_axis_formatter(period_formatter(periods))
            .y_axis_formatter(|mark, _range| y_axis_label(mark.value, DataMode::Raw))
            .label_formatter(move |_name, value| {
                let period = nearest_period(&hover_periods, value.x).unwrap_or("-");
                let count = DataProcessor::format_count(Some(value.y.max(0.0).round() as u64));
                format!("{}\n{}", period, count)
            })
            .show(ui, |plot_ui| {
                let bars: Vec<Bar> = totals
                    .iter()
                    .enumerate()
                    .map(|(i, t)| {
                        Bar::new(i as f64, t.total as f64)
                            .width(0.6)
                            .fill(Trend::from_yoy(t.yoy).color(dark))
                            .name(&t.period)
                    })
                    .collect();
                let hover_totals = totals.to_vec();
                plot_ui.bar_chart(BarChart::new(bars).name("합계").element_formatter(Box::new(
                    move |bar: &Bar, _chart: &BarChart| {
                        let idx = bar.argument.round().max(0.0) as usize;
                        hover_totals
                            .get(idx)
                            .map(total_hover_label)
                            .unwrap_or_default()
                    },
                )));

                for (i, t) in totals.iter().enumerate() {
                    let label = DataProcessor::format_yoy(t.yoy);
                    if label.is_empty() {
                        continue;
                    }
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(i as f64, t.total as f64),
                            RichText::new(label).strong().size(13.0).color(label_color),
                        )
                        .anchor(Align2::CENTER_BOTTOM),
                    );
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_from_yoy() {
        assert_eq!(Trend::from_yoy(None), Trend::Flat);
        assert_eq!(Trend::from_yoy(Some(0.0)), Trend::Flat);
        assert_eq!(Trend::from_yoy(Some(1.1)), Trend::Up);
        assert_eq!(Trend::from_yoy(Some(-2.6)), Trend::Down);
    }

    #[test]
    fn test_series_colors_distinct() {
        let mut colors: Vec<[u8; 4]> = Facility::ALL
            .iter()
            .map(|&f| series_color(f).to_array())
            .collect();
        colors.sort();
        colors.dedup();
        assert_eq!(colors.len(), Facility::ALL.len());
    }

    fn periods() -> Vec<String> {
        ["2020-03", "2021-07", "2022-06"]
            .iter()
            .map(|p| p.to_string())
            .collect()
    }

    #[test]
    fn test_period_at_integer_positions_only() {
        let periods = periods();
        assert_eq!(period_at(&periods, 1.0), Some("2021-07"));
        assert_eq!(period_at(&periods, 1.5), None);
        assert_eq!(period_at(&periods, -1.0), None);
        assert_eq!(period_at(&periods, 3.0), None);
    }

    #[test]
    fn test_normalized_axis_labels_are_rounded() {
        assert_eq!(y_axis_label(120.00000000000001, DataMode::Normalized), "120.0%");
        assert_eq!(y_axis_label(41200.0, DataMode::Raw), "41,200");
        assert_eq!(y_axis_label(-5.0, DataMode::Raw), "");
    }

    #[test]
    fn test_series_hover_shows_period_and_value() {
        let periods = periods();
        assert_eq!(
            series_hover_label(&periods, "17호 관리소", 2.0, 41200.0, DataMode::Raw),
            "17호 관리소\n2022-06: 41,200"
        );
        assert_eq!(
            series_hover_label(&periods, "17호 관리소", 1.9, 196.19, DataMode::Normalized),
            "17호 관리소\n2022-06: 196.2%"
        );
        assert_eq!(
            series_hover_label(&periods, "", 0.2, 100.0, DataMode::Normalized),
            "2020-03\n100.0%"
        );
    }

    #[test]
    fn test_total_hover_label() {
        let first = PeriodTotal {
            period: "2020-03".to_string(),
            total: 209000,
            yoy: None,
        };
        let second = PeriodTotal {
            period: "2021-07".to_string(),
            total: 211400,
            yoy: Some(1.148),
        };
        assert_eq!(total_hover_label(&first), "2020-03\n합계: 209,000");
        assert_eq!(
            total_hover_label(&second),
            "2021-07\n합계: 211,400\n전년대비: +1.1%"
        );
    }

    #[test]
    fn test_trend_colors_differ_by_theme() {
        for trend in [Trend::Flat, Trend::Up, Trend::Down] {
            assert_ne!(trend.color(false), trend.color(true));
        }
    }
}
