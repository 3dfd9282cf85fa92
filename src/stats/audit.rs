//! Sum Audit Module
//! Recomputes each record's cross-series sum and compares it to the stated total.

use crate::data::{DataProcessor, Dataset, Facility, Record};
use std::fmt;

/// A record whose series sum differs from its stated total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub period: String,
    pub stated: u64,
    /// Summed in `u128` so any number of `u64` counts fits without wrapping.
    pub computed: u128,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: 제공값 {} ≠ 계산값 {}",
            self.period,
            DataProcessor::format_count(Some(self.stated)),
            DataProcessor::group_thousands(self.computed),
        )
    }
}

/// Outcome of a sum audit. Mismatches keep dataset order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub pass: bool,
    pub mismatches: Vec<Mismatch>,
}

impl ValidationReport {
    /// One-line badge text.
    pub fn summary(&self) -> String {
        if self.pass {
            "데이터 검증 통과".to_string()
        } else {
            format!("데이터 불일치 {}건", self.mismatches.len())
        }
    }
}

/// Checks the row-sum invariant. Mismatches are reported, never corrected.
pub struct SumAuditor;

impl SumAuditor {
    /// Validate `records` summing exactly the given series.
    ///
    /// A series absent from a record contributes zero.
    pub fn validate(records: &[Record], series: &[Facility]) -> ValidationReport {
        let mismatches: Vec<Mismatch> = records
            .iter()
            .filter_map(|record| {
                let computed: u128 = series
                    .iter()
                    .map(|&f| u128::from(record.count(f)))
                    .sum();
                (computed != u128::from(record.stated_total())).then(|| Mismatch {
                    period: record.period().to_string(),
                    stated: record.stated_total(),
                    computed,
                })
            })
            .collect();

        ValidationReport {
            pass: mismatches.is_empty(),
            mismatches,
        }
    }

    /// Validate a dataset across every facility and log the outcome.
    pub fn audit(dataset: &Dataset) -> ValidationReport {
        let report = Self::validate(dataset.records(), &Facility::ALL);
        if report.pass {
            log::info!("Sum audit passed for {} records", dataset.len());
        } else {
            for mismatch in &report.mismatches {
                log::warn!("Sum audit mismatch: {}", mismatch);
            }
        }
        report
    }
}
