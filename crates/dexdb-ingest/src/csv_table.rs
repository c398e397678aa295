use std::io;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::{IngestError, Result};

/// A fully materialized source file.
///
/// The first row of the file is the header; `rows` holds every remaining row
/// verbatim. Rows may be ragged: their length is not checked here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTable {
    pub path: PathBuf,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SourceTable {
    /// Expected number of fields per row.
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Cell at `row`/`column`, or `None` when the row is shorter than `column`.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|values| values.get(column))
            .map(String::as_str)
    }
}

/// Read a UTF-8 CSV file. The first record is taken as the header row.
///
/// # Errors
///
/// Fails when the file cannot be read, is not valid UTF-8, is malformed, or
/// contains no records at all.
pub fn read_source_table(path: &Path) -> Result<SourceTable> {
    let file = std::fs::File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    read_source_table_from_reader(path, file)
}

/// Read CSV records from any reader; `path` is used for diagnostics only.
///
/// A blank line after the header is kept as a row with no fields, so it is
/// later padded to the header width like any other short row.
pub fn read_source_table_from_reader<R: io::Read>(path: &Path, mut reader: R) -> Result<SourceTable> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes.as_slice());

    let mut record = StringRecord::new();
    let has_header = reader
        .read_record(&mut record)
        .map_err(|error| IngestError::from_csv(path, error))?;
    if !has_header {
        return Err(IngestError::EmptySource {
            path: path.to_path_buf(),
        });
    }
    let headers: Vec<String> = record.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    let mut blank = 0usize;
    loop {
        // The reader skips blank lines silently; they sit between the end of
        // the previous record and the start of the next one.
        let offset = reader.position().byte();
        let more = reader
            .read_record(&mut record)
            .map_err(|error| IngestError::from_csv(path, error))?;
        let skipped = blank_lines_at(&bytes, offset);
        blank += skipped;
        rows.extend(std::iter::repeat_with(Vec::new).take(skipped));
        if !more {
            break;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }
    debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        blank,
        "read source table"
    );

    Ok(SourceTable {
        path: path.to_path_buf(),
        headers,
        rows,
    })
}

/// Number of consecutive empty lines starting at `offset`.
fn blank_lines_at(bytes: &[u8], offset: u64) -> usize {
    let Ok(mut at) = usize::try_from(offset) else {
        return 0;
    };
    // A record ending in `\r` leaves the `\n` of its CRLF unread.
    if at > 0 && bytes.get(at - 1) == Some(&b'\r') && bytes.get(at) == Some(&b'\n') {
        at += 1;
    }
    let mut count = 0;
    loop {
        match bytes.get(at) {
            Some(b'\n') => at += 1,
            Some(b'\r') => {
                at += 1;
                if bytes.get(at) == Some(&b'\n') {
                    at += 1;
                }
            }
            _ => return count,
        }
        count += 1;
    }
}
