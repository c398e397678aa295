//! Store creation and table import.

use std::fs;
use std::path::{Path, PathBuf};

use dexdb_model::{RunMetadata, TargetTable};
use rusqlite::{Connection, OpenFlags, params, params_from_iter};
use tracing::{debug, info, warn};

use crate::error::{Result, StoreError};
use crate::sql;

/// Fails with [`StoreError::AlreadyExists`] when `path` exists and
/// `overwrite` is off.
pub fn ensure_store_absent(path: &Path, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        return Err(StoreError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Read-write handle on a freshly created store.
#[derive(Debug)]
pub struct StoreWriter {
    path: PathBuf,
    conn: Connection,
}

impl StoreWriter {
    /// Create an empty store at `path`, removing an existing one when
    /// `overwrite` is set.
    pub fn create(path: &Path, overwrite: bool) -> Result<Self> {
        ensure_store_absent(path, overwrite)?;
        if path.exists() {
            warn!(path = %path.display(), "removing existing store");
            fs::remove_file(path).map_err(|source| StoreError::Remove {
                path: path.to_path_buf(),
                source,
            })?;
        }
        let conn = open_read_write(path)?;
        info!(path = %path.display(), "created store");
        Ok(Self {
            path: path.to_path_buf(),
            conn,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the metadata table and record the run's key/value pairs.
    pub fn write_metadata(&mut self, metadata: &RunMetadata) -> Result<()> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| StoreError::sql("begin metadata transaction", e))?;
        tx.execute(&sql::create_metadata_sql(), [])
            .map_err(|e| StoreError::sql("create metadata table", e))?;
        {
            let mut stmt = tx
                .prepare(&sql::insert_metadata_sql())
                .map_err(|e| StoreError::sql("prepare metadata insert", e))?;
            for (key, value) in metadata.entries() {
                stmt.execute(params![key, value])
                    .map_err(|e| StoreError::sql(format!("insert metadata {key}"), e))?;
            }
        }
        tx.commit()
            .map_err(|e| StoreError::sql("commit metadata", e))?;
        debug!(
            dataset = %metadata.dataset_revision,
            importer = %metadata.importer_revision,
            "wrote run metadata"
        );
        Ok(())
    }

    /// Close and reopen the connection so the change counter starts from zero.
    pub fn reopen(self) -> Result<Self> {
        let Self { path, conn } = self;
        conn.close()
            .map_err(|(_, e)| StoreError::sql("close store", e))?;
        let conn = open_read_write(&path)?;
        Ok(Self { path, conn })
    }

    /// Create `table` and insert all its rows in one transaction.
    ///
    /// Returns the number of rows inserted. Nothing from `table` remains in
    /// the store when this fails.
    pub fn import_table(&mut self, table: &TargetTable) -> Result<usize> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| StoreError::sql(format!("begin import of {}", table.name), e))?;
        tx.execute(&sql::create_table_sql(table), [])
            .map_err(|e| StoreError::sql(format!("create table {}", table.name), e))?;
        let mut inserted = 0usize;
        {
            let mut stmt = tx
                .prepare(&sql::insert_sql(&table.name, table.width()))
                .map_err(|e| StoreError::sql(format!("prepare insert into {}", table.name), e))?;
            for (index, row) in table.rows.iter().enumerate() {
                inserted += stmt.execute(params_from_iter(row.iter())).map_err(|e| {
                    StoreError::sql(format!("insert row {} into {}", index + 1, table.name), e)
                })?;
            }
        }
        tx.commit()
            .map_err(|e| StoreError::sql(format!("commit {}", table.name), e))?;
        debug!(table = %table.name, rows = inserted, "imported table");
        Ok(inserted)
    }

    /// Rows changed since this connection was opened.
    pub fn total_changes(&self) -> Result<u64> {
        let changes: i64 = self
            .conn
            .query_row("SELECT total_changes()", [], |row| row.get(0))
            .map_err(|e| StoreError::sql("read total changes", e))?;
        Ok(changes.max(0) as u64)
    }

    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, e)| StoreError::sql("close store", e))
    }
}

fn open_read_write(path: &Path) -> Result<Connection> {
    Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
    )
    .map_err(|source| StoreError::Open {
        path: path.to_path_buf(),
        source,
    })
}
