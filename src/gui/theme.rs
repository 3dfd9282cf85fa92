//! Theme helpers
//! Light/dark visuals and shared card styling.

use egui::{Color32, Stroke};

pub const ACCENT_COLOR: Color32 = Color32::from_rgb(37, 99, 235);

// Spacing constants
pub const SPACING_SMALL: f32 = 8.0;
pub const SPACING_MEDIUM: f32 = 12.0;
pub const SPACING_LARGE: f32 = 20.0;

/// Switch egui between light and dark visuals.
pub fn apply_theme(ctx: &egui::Context, dark: bool) {
    let theme = if dark {
        egui::Theme::Dark
    } else {
        egui::Theme::Light
    };
    ctx.set_theme(theme);
    ctx.style_mut(|style| {
        style.visuals.selection.bg_fill = ACCENT_COLOR.gamma_multiply(0.6);
        style.visuals.hyperlink_color = ACCENT_COLOR;
    });
}

/// Platform theme as a boolean, when the platform reports one.
pub fn system_dark_mode(ctx: &egui::Context) -> Option<bool> {
    ctx.system_theme().map(|theme| theme == egui::Theme::Dark)
}

pub fn card_frame(ui: &egui::Ui) -> egui::Frame {
    egui::Frame::none()
        .fill(ui.visuals().faint_bg_color)
        .rounding(12.0)
        .inner_margin(SPACING_LARGE)
        .stroke(Stroke::new(
            1.0,
            ui.visuals().widgets.noninteractive.bg_stroke.color,
        ))
}

/// Foreground color for the audit badge.
pub fn audit_color(pass: bool, dark: bool) -> Color32 {
    match (pass, dark) {
        (true, false) => Color32::from_rgb(4, 120, 87),
        (true, true) => Color32::from_rgb(52, 211, 153),
        (false, false) => Color32::from_rgb(185, 28, 28),
        (false, true) => Color32::from_rgb(248, 113, 113),
    }
}
