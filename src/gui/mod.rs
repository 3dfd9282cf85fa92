//! GUI module - User interface components

mod app;
mod chart_viewer;
mod control_panel;
pub mod state;
mod table_view;
pub mod theme;

pub use app::DashboardApp;
pub use chart_viewer::ChartViewer;
pub use control_panel::{ControlPanel, ControlPanelAction, StatusKind};
pub use state::{ThemeSignal, ViewAction, ViewState};
pub use table_view::TableView;
