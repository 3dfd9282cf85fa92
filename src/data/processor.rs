//! Data Processor Module
//! Derives chart and table rows (raw, normalized, period totals) from the dataset.

use super::dataset::{Dataset, Facility};
use std::collections::BTreeMap;

/// Placeholder shown for unavailable values.
pub const UNAVAILABLE: &str = "–";

/// Data display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMode {
    /// Counts as recorded
    Raw,
    /// Each series as a percentage of its first-period value
    Normalized,
}

impl Default for DataMode {
    fn default() -> Self {
        DataMode::Raw
    }
}

/// One period of chart/table data.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRow {
    pub period: String,
    /// `None` marks a value that cannot be computed (zero or absent base).
    pub values: BTreeMap<Facility, Option<f64>>,
}

impl PreparedRow {
    pub fn value(&self, facility: Facility) -> Option<f64> {
        self.values.get(&facility).copied().flatten()
    }
}

/// Stated total of a period with its change against the previous period.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodTotal {
    pub period: String,
    pub total: u64,
    /// Percent change from the previous period; `None` for the first period.
    pub yoy: Option<f64>,
}

/// Derives display data from the immutable dataset.
pub struct DataProcessor;

impl DataProcessor {
    /// Prepare one row per record in the requested mode.
    pub fn prepare(dataset: &Dataset, mode: DataMode) -> Vec<PreparedRow> {
        match mode {
            DataMode::Raw => dataset
                .records()
                .iter()
                .map(|record| PreparedRow {
                    period: record.period().to_string(),
                    values: Facility::ALL
                        .iter()
                        .map(|&f| (f, Some(record.count(f) as f64)))
                        .collect(),
                })
                .collect(),
            DataMode::Normalized => Self::normalize(dataset),
        }
    }

    /// Express every series relative to the first record (base = 100).
    ///
    /// A zero or absent base value yields `None` for that series in every row.
    pub fn normalize(dataset: &Dataset) -> Vec<PreparedRow> {
        let Some(base) = dataset.base() else {
            return Vec::new();
        };

        dataset
            .records()
            .iter()
            .map(|record| PreparedRow {
                period: record.period().to_string(),
                values: Facility::ALL
                    .iter()
                    .map(|&f| {
                        let ratio = match base.get(f) {
                            Some(base_val) if base_val > 0 => {
                                Some(record.count(f) as f64 / base_val as f64 * 100.0)
                            }
                            _ => None,
                        };
                        (f, ratio)
                    })
                    .collect(),
            })
            .collect()
    }

    /// Stated totals with the percent change from the previous period.
    pub fn period_totals(dataset: &Dataset) -> Vec<PeriodTotal> {
        let records = dataset.records();
        records
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                let total = record.stated_total();
                let yoy = if idx == 0 {
                    None
                } else {
                    Self::percent_change(records[idx - 1].stated_total(), total)
                };
                PeriodTotal {
                    period: record.period().to_string(),
                    total,
                    yoy,
                }
            })
            .collect()
    }

    fn percent_change(previous: u64, current: u64) -> Option<f64> {
        if previous == 0 {
            return None;
        }
        Some((current as f64 - previous as f64) / previous as f64 * 100.0)
    }

    /// Format a count with `,` thousands separators.
    pub fn format_count(value: Option<u64>) -> String {
        match value {
            Some(value) => Self::group_thousands(u128::from(value)),
            None => UNAVAILABLE.to_string(),
        }
    }

    /// Comma-grouped digits, wide enough for any sum of `u64` counts.
    pub fn group_thousands(value: u128) -> String {
        let digits = value.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }

    /// Format a percentage with one decimal, e.g. `196.2%`.
    pub fn format_percent(value: Option<f64>) -> String {
        match value {
            Some(v) if v.is_finite() => format!("{:.1}%", v),
            _ => UNAVAILABLE.to_string(),
        }
    }

    /// Signed change label for the totals chart, e.g. `+1.1%`.
    pub fn format_yoy(value: Option<f64>) -> String {
        match value {
            Some(v) if v.is_finite() => {
                let sign = if v >= 0.0 { "+" } else { "" };
                format!("{}{:.1}%", sign, v)
            }
            _ => String::new(),
        }
    }

    /// Format a prepared cell for the table in the given mode.
    pub fn format_cell(value: Option<f64>, mode: DataMode) -> String {
        match mode {
            DataMode::Raw => Self::format_count(value.map(|v| v.round() as u64)),
            DataMode::Normalized => Self::format_percent(value),
        }
    }
}
