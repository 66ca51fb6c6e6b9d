// Copyright 2025 the likeviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CSV loading into [`Record`]s.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use likeviz_transforms::Record;
use tracing::debug;

/// Failure to load one chart's input file.
#[derive(Debug, thiserror::Error)]
pub(crate) enum LoadError {
    #[error("cannot open {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV in {}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{} has no `{column}` column", .path.display())]
    MissingColumn { path: PathBuf, column: String },
}

/// Reads a CSV file with a header row, checking that every `required` column is present.
pub(crate) fn load_csv(path: &Path, required: &[&str]) -> Result<Vec<Record>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = read_csv(file, path, required)?;
    debug!(path = %path.display(), rows = records.len(), "loaded CSV");
    Ok(records)
}

/// Reads CSV from any reader; `path` only labels errors.
pub(crate) fn read_csv(
    reader: impl Read,
    path: &Path,
    required: &[&str],
) -> Result<Vec<Record>, LoadError> {
    let csv_error = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let headers = reader.headers().map_err(csv_error)?.clone();

    if let Some(column) = required
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        return Err(LoadError::MissingColumn {
            path: path.to_path_buf(),
            column: (*column).to_string(),
        });
    }

    reader
        .records()
        .map(|row| -> Result<Record, LoadError> {
            let row = row.map_err(csv_error)?;
            Ok(headers.iter().zip(row.iter()).collect())
        })
        .collect()
}
