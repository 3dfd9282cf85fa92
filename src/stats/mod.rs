//! Stats module - data quality audit

mod audit;

pub use audit::{Mismatch, SumAuditor, ValidationReport};
