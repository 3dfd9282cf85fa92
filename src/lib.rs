//! NK Camp Viewer - interactive chart and table viewer for facility population estimates.
//!
//! The `data`, `stats` and `export` modules are pure and free of GUI types;
//! `charts` and `gui` render them with egui.

pub mod charts;
pub mod config;
pub mod data;
pub mod export;
pub mod gui;
pub mod stats;
