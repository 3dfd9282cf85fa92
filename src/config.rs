//! Application configuration
//! Window geometry, titles and export defaults.

/// Startup configuration for the viewer.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Suggested file name for CSV exports.
    pub export_file_name: String,
    pub show_grid: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "북한 주요 관리소 수감 인원 추정치".to_string(),
            window_size: [1400.0, 900.0],
            min_window_size: [1000.0, 700.0],
            export_file_name: "nk-camp-population.csv".to_string(),
            show_grid: true,
        }
    }
}
