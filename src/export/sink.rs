//! Artifact Sinks
//! The "save bytes as named file" boundary used by the CSV exporter.

use super::writer::ExportError;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of handing bytes to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    /// The user dismissed the save dialog.
    Cancelled,
}

/// Saves an exported artifact under a file name.
pub trait ArtifactSink {
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> Result<SaveOutcome, ExportError>;
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    fs::write(path, bytes).map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Native save dialog, pre-filled with the suggested file name.
#[derive(Debug, Default)]
pub struct DialogSink;

impl ArtifactSink for DialogSink {
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> Result<SaveOutcome, ExportError> {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(file_name)
            .save_file()
        else {
            return Ok(SaveOutcome::Cancelled);
        };

        write_file(&path, bytes)?;
        Ok(SaveOutcome::Saved(path))
    }
}

/// Writes every artifact into a fixed directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ArtifactSink for DirectorySink {
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> Result<SaveOutcome, ExportError> {
        let path = self.dir.join(file_name);
        write_file(&path, bytes)?;
        Ok(SaveOutcome::Saved(path))
    }
}
