//! Dataset Module
//! Typed facility series, period records and the immutable dataset.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DatasetError {
    #[error("Failed to parse dataset: {0}")]
    Parse(String),
    #[error("Unknown series '{label}' in period {period}")]
    UnknownSeries { period: String, label: String },
    #[error("Series '{label}' appears more than once in period {period}")]
    DuplicateSeries { period: String, label: String },
    #[error("Negative value {value} for '{field}' in period {period}")]
    NegativeValue {
        period: String,
        field: String,
        value: i64,
    },
    #[error("Record {0} has an empty period label")]
    EmptyPeriod(usize),
    #[error("Duplicate period '{0}'")]
    DuplicatePeriod(String),
}

/// The six facilities tracked by the dataset, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Facility {
    Camp14,
    Camp15,
    Camp16,
    Camp17,
    Camp18,
    Camp25,
}

impl Facility {
    pub const ALL: [Facility; 6] = [
        Facility::Camp14,
        Facility::Camp15,
        Facility::Camp16,
        Facility::Camp17,
        Facility::Camp18,
        Facility::Camp25,
    ];

    /// Display label, also used as the CSV column name.
    pub fn label(self) -> &'static str {
        match self {
            Facility::Camp14 => "14호 관리소",
            Facility::Camp15 => "15호 관리소",
            Facility::Camp16 => "16호 관리소",
            Facility::Camp17 => "17호 관리소",
            Facility::Camp18 => "18호 관리소",
            Facility::Camp25 => "25호 관리소",
        }
    }

    pub fn from_label(label: &str) -> Option<Facility> {
        Self::ALL.into_iter().find(|f| f.label() == label)
    }
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One observation period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    period: String,
    counts: BTreeMap<Facility, u64>,
    stated_total: u64,
}

impl Record {
    pub fn new(
        period: impl Into<String>,
        counts: impl IntoIterator<Item = (Facility, u64)>,
        stated_total: u64,
    ) -> Self {
        Self {
            period: period.into(),
            counts: counts.into_iter().collect(),
            stated_total,
        }
    }

    pub fn period(&self) -> &str {
        &self.period
    }

    /// Count for a facility; a facility missing from the record counts as zero.
    pub fn count(&self, facility: Facility) -> u64 {
        self.counts.get(&facility).copied().unwrap_or(0)
    }

    /// Count only when the facility is present on the record.
    pub fn get(&self, facility: Facility) -> Option<u64> {
        self.counts.get(&facility).copied()
    }

    pub fn stated_total(&self) -> u64 {
        self.stated_total
    }
}

/// Ordered, immutable sequence of records with unique period labels.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Result<Self, DatasetError> {
        let mut seen = HashSet::new();
        for (idx, record) in records.iter().enumerate() {
            if record.period.trim().is_empty() {
                return Err(DatasetError::EmptyPeriod(idx));
            }
            if !seen.insert(record.period.as_str()) {
                return Err(DatasetError::DuplicatePeriod(record.period.clone()));
            }
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record, used as the normalization base.
    pub fn base(&self) -> Option<&Record> {
        self.records.first()
    }

    pub fn find(&self, period: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.period == period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty(period: &str) -> Record {
        Record::new(period, Vec::new(), 0)
    }

    #[test]
    fn test_label_round_trip() {
        for facility in Facility::ALL {
            assert_eq!(Facility::from_label(facility.label()), Some(facility));
        }
        assert_eq!(Facility::from_label("99호 관리소"), None);
    }

    #[test]
    fn test_missing_facility_counts_as_zero() {
        let record = Record::new("2020-03", [(Facility::Camp14, 10)], 10);
        assert_eq!(record.count(Facility::Camp14), 10);
        assert_eq!(record.count(Facility::Camp25), 0);
        assert_eq!(record.get(Facility::Camp25), None);
    }

    #[test]
    fn test_rejects_duplicate_period() {
        let records = vec![empty("2020-03"), empty("2020-03")];
        assert_eq!(
            Dataset::new(records),
            Err(DatasetError::DuplicatePeriod("2020-03".to_string()))
        );
    }

    #[test]
    fn test_rejects_empty_period() {
        let records = vec![empty("2020-03"), empty("  ")];
        assert_eq!(Dataset::new(records), Err(DatasetError::EmptyPeriod(1)));
    }

    #[test]
    fn test_empty_dataset_is_valid() {
        let dataset = Dataset::new(Vec::new()).unwrap();
        assert!(dataset.is_empty());
        assert!(dataset.base().is_none());
    }
}
