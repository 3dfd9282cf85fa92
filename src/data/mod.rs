//! Data module - dataset model, embedded loading and derived views

mod dataset;
mod loader;
mod processor;

pub use dataset::{Dataset, DatasetError, Facility, Record};
pub use loader::DataLoader;
pub use processor::{DataMode, DataProcessor, PeriodTotal, PreparedRow, UNAVAILABLE};
