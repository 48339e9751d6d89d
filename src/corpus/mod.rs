//! Corpus loading.
//!
//! Reads the historical message/response CSV into flattened text records,
//! one per data row. Each record renders its columns as `header: value`
//! lines in column order.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to open corpus {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed corpus {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("corpus {path} contains no data rows")]
    Empty { path: PathBuf },
}

/// One row of the source dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusRecord {
    /// The row flattened to `header: value` lines.
    pub text: String,
    /// Path of the file the row was read from.
    pub source: String,
    /// 0-based data row index (the header is not counted).
    pub row: usize,
}

/// Loads every data row of the CSV at `path`.
///
/// Rows with a different number of fields than the header are rejected.
pub fn load_corpus(path: &Path) -> Result<Vec<CorpusRecord>, DataLoadError> {
    let file = File::open(path).map_err(|source| DataLoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let records = read_records(file, &path.to_string_lossy()).map_err(|source| {
        DataLoadError::Malformed {
            path: path.to_path_buf(),
            source,
        }
    })?;

    if records.is_empty() {
        return Err(DataLoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    Ok(records)
}

fn read_records<R: std::io::Read>(reader: R, source: &str) -> Result<Vec<CorpusRecord>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let fields = result?;
        let text = headers
            .iter()
            .zip(fields.iter())
            .map(|(header, value)| format!("{}: {}", header, value.trim()))
            .collect::<Vec<_>>()
            .join("\n");

        records.push(CorpusRecord {
            text,
            source: source.to_string(),
            row,
        });
    }

    Ok(records)
}
