//! CSV Writer Module
//! Field escaping and header-consistent CSV text generation.

use crate::data::{Dataset, Facility};
use std::fmt;
use thiserror::Error;

/// UTF-8 byte-order marker prepended for spreadsheet applications.
pub const UTF8_BOM: &str = "\u{FEFF}";

/// Column name of the period label in exported files.
pub const PERIOD_COLUMN: &str = "year";
/// Column name of the stated total in exported files.
pub const TOTAL_COLUMN: &str = "합계";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExportError {
    #[error("No records to export")]
    EmptyInput,
    #[error("Record {row} has columns [{found}], expected [{expected}]")]
    InconsistentColumns {
        row: usize,
        expected: String,
        found: String,
    },
    #[error("Failed to write {path}: {message}")]
    Io { path: String, message: String },
}

/// A single CSV cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CsvValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Missing,
}

impl fmt::Display for CsvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsvValue::Text(s) => f.write_str(s),
            CsvValue::Integer(n) => write!(f, "{}", n),
            CsvValue::Decimal(x) => write!(f, "{}", x),
            CsvValue::Missing => Ok(()),
        }
    }
}

impl From<&str> for CsvValue {
    fn from(value: &str) -> Self {
        CsvValue::Text(value.to_string())
    }
}

impl From<String> for CsvValue {
    fn from(value: String) -> Self {
        CsvValue::Text(value)
    }
}

impl From<u64> for CsvValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(n) => CsvValue::Integer(n),
            Err(_) => CsvValue::Text(value.to_string()),
        }
    }
}

impl From<i64> for CsvValue {
    fn from(value: i64) -> Self {
        CsvValue::Integer(value)
    }
}

impl From<f64> for CsvValue {
    fn from(value: f64) -> Self {
        CsvValue::Decimal(value)
    }
}

impl<T: Into<CsvValue>> From<Option<T>> for CsvValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CsvValue::Missing)
    }
}

/// Ordered field-name to value mapping for one output line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvRecord {
    fields: Vec<(String, CsvValue)>,
}

impl CsvRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, replacing the value if the name already exists.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<CsvValue>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&CsvValue> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Quote a field when it contains a comma, a double quote or a newline.
///
/// Interior quotes are doubled. Apply exactly once per value.
///
/// Only `\n` counts as a newline: a lone `\r` is left unquoted, and most CSV
/// readers split the row there. Strip carriage returns before exporting text
/// that may contain them.
pub fn escape_field<T: fmt::Display + ?Sized>(value: &T) -> String {
    let text = value.to_string();
    if text.contains(',') || text.contains('"') || text.contains('\n') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text
    }
}

/// Serialize records into CSV text.
///
/// The header is the key order of the first record. Every later record must
/// carry exactly the same key set; order may differ. Lines are joined with
/// `\n` and there is no trailing newline.
pub fn to_csv(records: &[CsvRecord]) -> Result<String, ExportError> {
    let first = records.first().ok_or(ExportError::EmptyInput)?;
    let header: Vec<&str> = first.keys().collect();

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(
        header
            .iter()
            .map(|k| escape_field(*k))
            .collect::<Vec<_>>()
            .join(","),
    );

    for (row, record) in records.iter().enumerate() {
        let consistent =
            record.len() == header.len() && header.iter().all(|k| record.get(k).is_some());
        if !consistent {
            return Err(ExportError::InconsistentColumns {
                row,
                expected: header.join(", "),
                found: record.keys().collect::<Vec<_>>().join(", "),
            });
        }

        let line = header
            .iter()
            .filter_map(|k| record.get(k))
            .map(escape_field)
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }

    Ok(lines.join("\n"))
}

/// Prefix the UTF-8 BOM and return the bytes handed to the output boundary.
pub fn encode_with_bom(csv: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(UTF8_BOM.len() + csv.len());
    bytes.extend_from_slice(UTF8_BOM.as_bytes());
    bytes.extend_from_slice(csv.as_bytes());
    bytes
}

/// Export rows for the dataset: period, every facility, stated total.
pub fn dataset_records(dataset: &Dataset) -> Vec<CsvRecord> {
    dataset
        .records()
        .iter()
        .map(|record| {
            let row = CsvRecord::new().field(PERIOD_COLUMN, record.period());
            Facility::ALL
                .iter()
                .fold(row, |row, &f| row.field(f.label(), record.count(f)))
                .field(TOTAL_COLUMN, record.stated_total())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataLoader;

    #[test]
    fn test_escape_fixed_cases() {
        let cases = [
            ("hello", "hello"),
            ("hello,world", "\"hello,world\""),
            ("say \"hello\"", "\"say \"\"hello\"\"\""),
            ("line\nbreak", "\"line\nbreak\""),
        ];
        for (input, expected) in cases {
            assert_eq!(escape_field(input), expected, "input={:?}", input);
        }
    }

    #[test]
    fn test_escape_scalars() {
        assert_eq!(escape_field(&209000u64), "209000");
        assert_eq!(escape_field(&CsvValue::Decimal(1.5)), "1.5");
        assert_eq!(escape_field(&CsvValue::Missing), "");
        assert_eq!(escape_field("14호 관리소"), "14호 관리소");
    }

    #[test]
    fn test_lone_carriage_return_is_not_quoted() {
        assert_eq!(escape_field("a\rb"), "a\rb");
        assert_eq!(escape_field("a\r\nb"), "\"a\r\nb\"");
    }

    #[test]
    fn test_escape_is_not_idempotent() {
        let once = escape_field("a,b");
        let twice = escape_field(&once);
        assert_ne!(once, twice);
    }

    #[test]
    fn test_to_csv_empty_input() {
        assert_eq!(to_csv(&[]), Err(ExportError::EmptyInput));
    }

    #[test]
    fn test_to_csv_basic() {
        let records = vec![
            CsvRecord::new().field("name", "a,b").field("n", 1i64),
            CsvRecord::new().field("name", "plain").field("n", 2i64),
        ];
        let csv = to_csv(&records).unwrap();
        assert_eq!(csv, "name,n\n\"a,b\",1\nplain,2");
    }

    #[test]
    fn test_to_csv_reordered_keys_follow_header() {
        let records = vec![
            CsvRecord::new().field("a", 1i64).field("b", 2i64),
            CsvRecord::new().field("b", 4i64).field("a", 3i64),
        ];
        assert_eq!(to_csv(&records).unwrap(), "a,b\n1,2\n3,4");
    }

    #[test]
    fn test_to_csv_rejects_divergent_keys() {
        let records = vec![
            CsvRecord::new().field("a", 1i64).field("b", 2i64),
            CsvRecord::new().field("a", 3i64).field("c", 4i64),
        ];
        let err = to_csv(&records).unwrap_err();
        assert!(matches!(err, ExportError::InconsistentColumns { row: 1, .. }));

        let records = vec![
            CsvRecord::new().field("a", 1i64),
            CsvRecord::new().field("a", 3i64).field("extra", 4i64),
        ];
        assert!(to_csv(&records).is_err());
    }

    #[test]
    fn test_field_replaces_duplicate_name() {
        let record = CsvRecord::new().field("a", 1i64).field("a", 2i64);
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("a"), Some(&CsvValue::Integer(2)));
    }

    #[test]
    fn test_missing_value_is_empty_field() {
        let records = vec![CsvRecord::new()
            .field("a", None::<i64>)
            .field("b", Some(5i64))];
        assert_eq!(to_csv(&records).unwrap(), "a,b\n,5");
    }

    #[test]
    fn test_dataset_export_layout() {
        let dataset = DataLoader::load_embedded().unwrap();
        let csv = to_csv(&dataset_records(&dataset)).unwrap();
        let lines: Vec<&str> = csv.split('\n').collect();

        assert_eq!(lines.len(), 1 + dataset.len());
        assert_eq!(
            lines[0],
            "year,14호 관리소,15호 관리소,16호 관리소,17호 관리소,18호 관리소,25호 관리소,합계"
        );
        assert_eq!(
            lines[1],
            "2020-03,43000,55000,24000,21000,26000,40000,209000"
        );
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_to_csv_is_deterministic() {
        let dataset = DataLoader::load_embedded().unwrap();
        let records = dataset_records(&dataset);
        assert_eq!(to_csv(&records).unwrap(), to_csv(&records).unwrap());
    }

    #[test]
    fn test_encode_with_bom() {
        let bytes = encode_with_bom("a,b");
        assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
        assert_eq!(&bytes[3..], b"a,b");
    }
}
