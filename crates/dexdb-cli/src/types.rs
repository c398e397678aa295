use std::path::PathBuf;

use dexdb_model::RunMetadata;

#[derive(Debug)]
pub struct BuildResult {
    pub store_path: PathBuf,
    pub metadata: RunMetadata,
    pub tables: Vec<TableSummary>,
    /// Insert counter of the reopened store; metadata writes are excluded.
    pub total_rows: u64,
    pub file_size_bytes: u64,
}

impl BuildResult {
    pub fn file_size_mb(&self) -> f64 {
        self.file_size_bytes as f64 / 1024.0 / 1024.0
    }

    pub fn reshaped_rows(&self) -> usize {
        self.tables.iter().map(|table| table.reshaped_rows).sum()
    }
}

#[derive(Debug, Clone)]
pub struct TableSummary {
    pub name: String,
    pub columns: usize,
    pub rows: usize,
    pub primary_key: Option<String>,
    pub reshaped_rows: usize,
}
