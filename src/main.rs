//! NK Camp Viewer - Interactive Chart & Table Viewer
//!
//! Renders population estimates for six facilities with toggleable series,
//! normalization, CSV export and a row-sum audit.

use anyhow::Context;
use eframe::egui;
use nk_camp_viewer::config::AppConfig;
use nk_camp_viewer::data::DataLoader;
use nk_camp_viewer::gui::DashboardApp;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::default();
    let dataset = DataLoader::load_embedded().context("Failed to load embedded dataset")?;
    log::info!("Loaded {} periods", dataset.len());

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size)
            .with_title(&config.title),
        ..Default::default()
    };

    let title = config.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config, dataset)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start viewer: {e}"))
}
