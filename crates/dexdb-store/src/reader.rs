//! Read-only store access.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dexdb_model::METADATA_TABLE;
use dexdb_model::schema::quote_identifier;
use rusqlite::{Connection, OpenFlags, Params};

use crate::error::{Result, StoreError};
use crate::row::{NamedRow, RowColumns};
use crate::sql;
use crate::value::CellValue;

/// Read-only handle on an existing store.
#[derive(Debug)]
pub struct StoreReader {
    path: PathBuf,
    conn: Connection,
}

impl StoreReader {
    /// Open `path` read-only. A missing or unreadable store is reported as
    /// [`StoreError::Unavailable`].
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(StoreError::Unavailable {
                path: path.to_path_buf(),
                reason: "file not found".to_string(),
            });
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| StoreError::Unavailable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            conn,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `query` and collect every row with its column names.
    pub fn query<P: Params>(&self, query: &str, params: P) -> Result<Vec<NamedRow>> {
        let mut stmt = self
            .conn
            .prepare(query)
            .map_err(|e| StoreError::sql("prepare query", e))?;
        let names: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        let width = names.len();
        let columns = Arc::new(RowColumns::new(names));

        let mut rows = stmt
            .query(params)
            .map_err(|e| StoreError::sql("run query", e))?;
        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(|e| StoreError::sql("read row", e))? {
            let mut values = Vec::with_capacity(width);
            for index in 0..width {
                let value = row
                    .get_ref(index)
                    .map_err(|e| StoreError::sql("read column", e))?;
                values.push(CellValue::from(value));
            }
            out.push(NamedRow::new(Arc::clone(&columns), values));
        }
        Ok(out)
    }

    /// Imported table names, sorted. The metadata table is excluded.
    pub fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT name FROM sqlite_master \
                 WHERE type = 'table' AND name != ?1 AND name NOT LIKE 'sqlite_%' \
                 ORDER BY name",
            )
            .map_err(|e| StoreError::sql("prepare table listing", e))?;
        let names = stmt
            .query_map([METADATA_TABLE], |row| row.get::<_, String>(0))
            .map_err(|e| StoreError::sql("list tables", e))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| StoreError::sql("list tables", e))?;
        Ok(names)
    }

    pub fn row_count(&self, table: &str) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row(&sql::count_rows_sql(table), [], |row| row.get(0))
            .map_err(|e| StoreError::sql(format!("count rows of {table}"), e))?;
        Ok(count.max(0) as u64)
    }

    /// Run metadata as recorded by the import.
    pub fn metadata(&self) -> Result<BTreeMap<String, String>> {
        let query = format!(
            "SELECT key, value FROM {}",
            quote_identifier(METADATA_TABLE)
        );
        let mut stmt = self
            .conn
            .prepare(&query)
            .map_err(|e| StoreError::sql("prepare metadata query", e))?;
        let entries = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
            })
            .map_err(|e| StoreError::sql("read metadata", e))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| StoreError::sql("read metadata", e))?;
        Ok(entries
            .into_iter()
            .map(|(key, value)| (key, value.unwrap_or_default()))
            .collect())
    }
}
