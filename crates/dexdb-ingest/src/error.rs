//! Error types for source ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating or reading source files.
///
/// All of these are fatal for the file (or directory) concerned.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to open or read a file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid UTF-8.
    #[error("{path} is not valid UTF-8 (record {record}, field {field})")]
    InvalidEncoding {
        path: PathBuf,
        record: u64,
        field: usize,
    },

    /// File contains no rows at all, not even a header.
    #[error("CSV file is empty: {path}")]
    EmptySource { path: PathBuf },

    /// Malformed CSV.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// File name cannot be turned into a table name.
    #[error("cannot derive a table name from {path}")]
    InvalidTableName { path: PathBuf },
}

impl IngestError {
    pub(crate) fn from_csv(path: impl Into<PathBuf>, error: csv::Error) -> Self {
        let path = path.into();
        let position_record = error.position().map(csv::Position::record);
        match error.into_kind() {
            csv::ErrorKind::Io(source) => Self::FileRead { path, source },
            csv::ErrorKind::Utf8 { pos, err } => Self::InvalidEncoding {
                path,
                record: pos
                    .map(|p| p.record())
                    .or(position_record)
                    .unwrap_or_default(),
                field: err.field(),
            },
            other => Self::CsvParse {
                path,
                message: format!("{other:?}"),
            },
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::EmptySource {
            path: PathBuf::from("/data/types.csv"),
        };
        assert_eq!(err.to_string(), "CSV file is empty: /data/types.csv");
    }

    #[test]
    fn test_encoding_error_display() {
        let err = IngestError::InvalidEncoding {
            path: PathBuf::from("moves.csv"),
            record: 3,
            field: 1,
        };
        assert_eq!(
            err.to_string(),
            "moves.csv is not valid UTF-8 (record 3, field 1)"
        );
    }
}
