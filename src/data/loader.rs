//! Dataset Loader Module
//! Parses the embedded JSON dataset into a typed `Dataset`.

use super::dataset::{Dataset, DatasetError, Facility, Record};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;

const EMBEDDED_DATASET: &str = include_str!("nk_camps.json");

#[derive(Deserialize)]
struct RawDataset {
    records: Vec<RawRecord>,
}

#[derive(Deserialize)]
struct RawRecord {
    period: String,
    #[serde(default, deserialize_with = "count_entries")]
    counts: Vec<(String, i64)>,
    total: i64,
}

/// Reads the `counts` object in source order, keeping repeated labels so they
/// can be rejected instead of silently overwritten.
fn count_entries<'de, D>(deserializer: D) -> Result<Vec<(String, i64)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = Vec<(String, i64)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of series label to count")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, i64>()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor)
}

/// Loads the dataset compiled into the binary.
pub struct DataLoader;

impl DataLoader {
    /// Load the built-in dataset.
    pub fn load_embedded() -> Result<Dataset, DatasetError> {
        Self::from_json(EMBEDDED_DATASET)
    }

    /// Parse and validate a dataset from JSON text.
    ///
    /// Series labels are resolved to `Facility` here, so unknown labels and
    /// negative values never reach the rest of the program.
    pub fn from_json(text: &str) -> Result<Dataset, DatasetError> {
        let raw: RawDataset =
            serde_json::from_str(text).map_err(|e| DatasetError::Parse(e.to_string()))?;

        let records = raw
            .records
            .into_iter()
            .map(Self::convert_record)
            .collect::<Result<Vec<_>, _>>()?;

        let dataset = Dataset::new(records)?;
        log::debug!("Parsed dataset with {} records", dataset.len());
        Ok(dataset)
    }

    fn convert_record(raw: RawRecord) -> Result<Record, DatasetError> {
        let mut counts = Vec::with_capacity(raw.counts.len());
        let mut seen = BTreeSet::new();
        for (label, value) in raw.counts {
            let facility =
                Facility::from_label(&label).ok_or_else(|| DatasetError::UnknownSeries {
                    period: raw.period.clone(),
                    label: label.clone(),
                })?;
            if !seen.insert(facility) {
                return Err(DatasetError::DuplicateSeries {
                    period: raw.period,
                    label,
                });
            }
            let value = u64::try_from(value).map_err(|_| DatasetError::NegativeValue {
                period: raw.period.clone(),
                field: label,
                value,
            })?;
            counts.push((facility, value));
        }

        let total = u64::try_from(raw.total).map_err(|_| DatasetError::NegativeValue {
            period: raw.period.clone(),
            field: "total".to_string(),
            value: raw.total,
        })?;

        Ok(Record::new(raw.period, counts, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_dataset_loads() {
        let dataset = DataLoader::load_embedded().unwrap();
        assert_eq!(dataset.len(), 6);

        let first = &dataset.records()[0];
        assert_eq!(first.period(), "2020-03");
        assert_eq!(first.count(Facility::Camp15), 55000);
        assert_eq!(first.stated_total(), 209000);

        let last = &dataset.records()[5];
        assert_eq!(last.period(), "2025-06");
        assert_eq!(last.count(Facility::Camp25), 31900);
    }

    #[test]
    fn test_embedded_periods_in_order() {
        let dataset = DataLoader::load_embedded().unwrap();
        let periods: Vec<&str> = dataset.records().iter().map(|r| r.period()).collect();
        assert_eq!(
            periods,
            ["2020-03", "2021-07", "2022-06", "2023-06", "2024-06", "2025-06"]
        );
    }

    #[test]
    fn test_unknown_series_rejected() {
        let text = r#"{"records":[{"period":"2020-03","counts":{"99호 관리소":1},"total":1}]}"#;
        assert_eq!(
            DataLoader::from_json(text),
            Err(DatasetError::UnknownSeries {
                period: "2020-03".to_string(),
                label: "99호 관리소".to_string(),
            })
        );
    }

    #[test]
    fn test_repeated_series_rejected() {
        let text = r#"{"records":[{"period":"2020-03","counts":{"14호 관리소":5,"14호 관리소":7},"total":7}]}"#;
        assert_eq!(
            DataLoader::from_json(text),
            Err(DatasetError::DuplicateSeries {
                period: "2020-03".to_string(),
                label: "14호 관리소".to_string(),
            })
        );
    }

    #[test]
    fn test_counts_must_be_an_object() {
        let text = r#"{"records":[{"period":"2020-03","counts":[1,2],"total":3}]}"#;
        assert!(matches!(
            DataLoader::from_json(text),
            Err(DatasetError::Parse(_))
        ));
    }

    #[test]
    fn test_negative_count_rejected() {
        let text = r#"{"records":[{"period":"2020-03","counts":{"14호 관리소":-5},"total":0}]}"#;
        let err = DataLoader::from_json(text).unwrap_err();
        assert!(matches!(err, DatasetError::NegativeValue { value: -5, .. }));
    }

    #[test]
    fn test_negative_total_rejected() {
        let text = r#"{"records":[{"period":"2020-03","counts":{},"total":-1}]}"#;
        let err = DataLoader::from_json(text).unwrap_err();
        assert!(matches!(err, DatasetError::NegativeValue { ref field, .. } if field == "total"));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            DataLoader::from_json("{not json"),
            Err(DatasetError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_counts_allowed() {
        let text = r#"{"records":[{"period":"2020-03","total":0}]}"#;
        let dataset = DataLoader::from_json(text).unwrap();
        assert_eq!(dataset.records()[0].count(Facility::Camp14), 0);
    }
}
