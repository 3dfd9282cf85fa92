//! Export module - CSV generation and the file-save boundary

mod writer;
mod sink;

pub use writer::{
    dataset_records, encode_with_bom, escape_field, to_csv, CsvRecord, CsvValue, ExportError,
    PERIOD_COLUMN, TOTAL_COLUMN, UTF8_BOM,
};
pub use sink::{ArtifactSink, DialogSink, DirectorySink, SaveOutcome};

/// Builds CSV text and hands it to a sink.
pub struct CsvExporter;

impl CsvExporter {
    /// Serialize `records`, prefix the BOM and save under `file_name`.
    pub fn export(
        records: &[CsvRecord],
        file_name: &str,
        sink: &mut dyn ArtifactSink,
    ) -> Result<SaveOutcome, ExportError> {
        let text = to_csv(records)?;
        let bytes = encode_with_bom(&text);

        match sink.save(file_name, &bytes) {
            Ok(SaveOutcome::Saved(path)) => {
                log::info!(
                    "Exported {} rows ({} bytes) to {}",
                    records.len(),
                    bytes.len(),
                    path.display()
                );
                Ok(SaveOutcome::Saved(path))
            }
            Ok(SaveOutcome::Cancelled) => {
                log::info!("CSV export cancelled");
                Ok(SaveOutcome::Cancelled)
            }
            Err(e) => {
                log::error!("CSV export failed: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataLoader;

    /// Records what it was handed without touching the filesystem.
    #[derive(Default)]
    struct MemorySink {
        saved: Vec<(String, Vec<u8>)>,
        cancel: bool,
    }

    impl ArtifactSink for MemorySink {
        fn save(&mut self, file_name: &str, bytes: &[u8]) -> Result<SaveOutcome, ExportError> {
            if self.cancel {
                return Ok(SaveOutcome::Cancelled);
            }
            self.saved.push((file_name.to_string(), bytes.to_vec()));
            Ok(SaveOutcome::Saved(file_name.into()))
        }
    }

    #[test]
    fn test_export_hands_bom_prefixed_csv_to_sink() {
        let dataset = DataLoader::load_embedded().unwrap();
        let records = dataset_records(&dataset);
        let mut sink = MemorySink::default();

        let outcome = CsvExporter::export(&records, "nk-camp-population.csv", &mut sink).unwrap();
        assert_eq!(outcome, SaveOutcome::Saved("nk-camp-population.csv".into()));

        let (name, bytes) = &sink.saved[0];
        assert_eq!(name, "nk-camp-population.csv");
        assert!(bytes.starts_with(UTF8_BOM.as_bytes()));
        let text = std::str::from_utf8(&bytes[UTF8_BOM.len()..]).unwrap();
        assert_eq!(text, to_csv(&records).unwrap());
    }

    #[test]
    fn test_export_empty_fails_before_sink() {
        let mut sink = MemorySink::default();
        let err = CsvExporter::export(&[], "x.csv", &mut sink).unwrap_err();
        assert_eq!(err, ExportError::EmptyInput);
        assert!(sink.saved.is_empty());
    }

    #[test]
    fn test_export_cancelled() {
        let dataset = DataLoader::load_embedded().unwrap();
        let mut sink = MemorySink {
            cancel: true,
            ..Default::default()
        };
        let outcome =
            CsvExporter::export(&dataset_records(&dataset), "x.csv", &mut sink).unwrap();
        assert_eq!(outcome, SaveOutcome::Cancelled);
    }
}
