//! CSV log I/O with header-once semantics

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// Failure to write a log row. Callers on the chat path report it and move on.
#[derive(Debug, thiserror::Error)]
pub enum LogWriteError {
    #[error("could not open log {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not write log {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl LogWriteError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A row type with a fixed column header
pub trait CsvRecord: Serialize {
    const HEADER: &'static [&'static str];
}

/// Append one record. The header is written first when the file is new or empty.
pub fn append_record<R: CsvRecord>(path: &Path, record: &R) -> Result<(), LogWriteError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| LogWriteError::io(path, e))?;
    }

    let is_new = std::fs::metadata(path)
        .map(|meta| meta.len() == 0)
        .unwrap_or(true);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LogWriteError::io(path, e))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    if is_new {
        writer
            .write_record(R::HEADER)
            .map_err(|e| LogWriteError::csv(path, e))?;
    }
    writer
        .serialize(record)
        .map_err(|e| LogWriteError::csv(path, e))?;
    writer.flush().map_err(|e| LogWriteError::io(path, e))?;
    Ok(())
}

/// Create (or truncate) a log and write only its header
pub fn start_log<R: CsvRecord>(path: &Path) -> Result<(), LogWriteError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| LogWriteError::io(path, e))?;
    }

    let file = File::create(path).map_err(|e| LogWriteError::io(path, e))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer
        .write_record(R::HEADER)
        .map_err(|e| LogWriteError::csv(path, e))?;
    writer.flush().map_err(|e| LogWriteError::io(path, e))?;
    Ok(())
}

/// Read every row of a headered CSV log
pub fn read_records<R: DeserializeOwned>(path: &Path) -> csv::Result<Vec<R>> {
    let mut reader = csv::Reader::from_path(path)?;
    reader.deserialize().collect()
}
