//! Source table → target table.

use std::borrow::Cow;

use dexdb_ingest::SourceTable;
use dexdb_model::{ColumnSchema, ImportOptions, StorageType, TargetTable};
use tracing::{debug, warn};

use crate::classify::tally_column;
use crate::normalize::normalize_row;
use crate::resolve::resolve_column;
use crate::scrub::scrub_text;

/// Infer the schema of `source` and produce normalized, scrubbed rows.
///
/// Every column is classified over all rows before any row is rewritten.
/// Rows of the wrong width are logged and coerced; this never fails.
pub fn build_target_table(
    name: impl Into<String>,
    source: SourceTable,
    options: &ImportOptions,
) -> TargetTable {
    let name = name.into();
    let width = source.width();

    let columns: Vec<ColumnSchema> = source
        .headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            let tally = tally_column(&source.rows, index);
            let column = resolve_column(header, &tally, &source.rows, index);
            debug!(
                table = %name,
                column = %column.name,
                storage_type = %column.storage_type,
                nullable = column.nullable,
                primary_key = column.is_primary_key,
                nulls = tally.null,
                integers = tally.integer,
                reals = tally.real,
                texts = tally.text,
                "resolved column"
            );
            column
        })
        .collect();

    let scrubbed: Vec<usize> = if options.scrub_text {
        columns
            .iter()
            .enumerate()
            .filter(|(_, column)| column.storage_type == StorageType::Text)
            .map(|(index, _)| index)
            .collect()
    } else {
        Vec::new()
    };

    let mut table = TargetTable::new(name, columns);
    table.rows.reserve(source.rows.len());
    for (index, row) in source.rows.into_iter().enumerate() {
        if row.len() != width {
            warn!(
                table = %table.name,
                row = index + 1,
                expected = width,
                actual = row.len(),
                values = ?row,
                "row has wrong number of columns"
            );
            table.reshaped_rows += 1;
        }
        let (mut fields, _shape) = normalize_row(row, width);
        for &column in &scrubbed {
            if let Some(value) = fields[column].as_mut() {
                let cleaned = match scrub_text(value) {
                    Cow::Borrowed(_) => None,
                    Cow::Owned(text) => Some(text),
                };
                if let Some(text) = cleaned {
                    *value = text;
                }
            }
        }
        table.rows.push(fields);
    }
    table
}
