//! Charts module - Chart rendering

mod plotter;

pub use plotter::{series_color, ChartPlotter, Trend};
