//! Store build pipeline.
//!
//! 1. **Preflight**: refuse to touch an existing store without overwrite, then
//!    make sure the dataset checkout exists
//! 2. **Bootstrap**: create the store and record run metadata, then reopen so
//!    the insert counter starts from zero
//! 3. **Import**: one table per CSV file, each committed on its own. A
//!    failure here removes the incomplete store
//! 4. **Report**: table count, insert counter, file size

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dexdb_infer::build_target_table;
use dexdb_ingest::{list_csv_files, read_source_table, table_name_for};
use dexdb_model::{ImportOptions, RunMetadata};
use dexdb_store::{StoreWriter, ensure_store_absent};
use tracing::{info, info_span, warn};

use crate::source::{ensure_dataset, revision_of};
use crate::types::{BuildResult, TableSummary};

pub const DEFAULT_STORE_PATH: &str = "pokeapi.sqlite";
pub const DEFAULT_DATASET_DIR: &str = "pokeapi";
pub const DEFAULT_CSV_DIR: &str = "data/v2/csv";
pub const DEFAULT_REPO_URL: &str = "https://github.com/PokeAPI/pokeapi.git";

/// Everything one `dexdb build` run needs.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub store_path: PathBuf,
    pub dataset_dir: PathBuf,
    /// Relative to `dataset_dir`.
    pub csv_dir: PathBuf,
    pub repo_url: String,
    pub overwrite: bool,
    pub allow_clone: bool,
    /// Directory whose git revision identifies the importer.
    pub importer_dir: PathBuf,
    pub options: ImportOptions,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            dataset_dir: PathBuf::from(DEFAULT_DATASET_DIR),
            csv_dir: PathBuf::from(DEFAULT_CSV_DIR),
            repo_url: DEFAULT_REPO_URL.to_string(),
            overwrite: false,
            allow_clone: true,
            importer_dir: PathBuf::from("."),
            options: ImportOptions::default(),
        }
    }
}

impl BuildConfig {
    pub fn csv_path(&self) -> PathBuf {
        self.dataset_dir.join(&self.csv_dir)
    }
}

pub fn run_build(config: &BuildConfig) -> Result<BuildResult> {
    let span = info_span!("build", store = %config.store_path.display());
    let _guard = span.enter();

    // Stage 1: preflight. Nothing is written before both checks pass.
    ensure_store_absent(&config.store_path, config.overwrite)?;
    ensure_dataset(&config.dataset_dir, &config.repo_url, config.allow_clone)?;
    let csv_path = config.csv_path();
    let files = list_csv_files(&csv_path)
        .with_context(|| format!("list source files in {}", csv_path.display()))?;

    // Stage 2: bootstrap.
    let metadata = RunMetadata::now(
        revision_of(&config.dataset_dir),
        revision_of(&config.importer_dir),
    );
    info!(
        created_at = %metadata.created_at,
        dataset = %metadata.dataset_revision,
        importer = %metadata.importer_revision,
        "run metadata"
    );
    let writer = StoreWriter::create(&config.store_path, config.overwrite)?;
    let (tables, total_rows) = match populate(writer, &metadata, &files, &config.options) {
        Ok(outcome) => outcome,
        Err(error) => {
            discard_store(&config.store_path);
            return Err(error);
        }
    };

    // Stage 4: report.
    let file_size_bytes = fs::metadata(&config.store_path)
        .with_context(|| format!("stat {}", config.store_path.display()))?
        .len();
    info!(tables = tables.len(), rows = total_rows, "build complete");

    Ok(BuildResult {
        store_path: config.store_path.clone(),
        metadata,
        tables,
        total_rows,
        file_size_bytes,
    })
}

/// Stages 2 and 3 on a freshly created store. Returns the table summaries and
/// the insert counter.
fn populate(
    mut writer: StoreWriter,
    metadata: &RunMetadata,
    files: &[PathBuf],
    options: &ImportOptions,
) -> Result<(Vec<TableSummary>, u64)> {
    writer.write_metadata(metadata)?;
    let mut writer = writer.reopen()?;

    let mut tables: Vec<TableSummary> = Vec::with_capacity(files.len());
    for path in files {
        match import_file(&mut writer, path, options) {
            Ok(summary) => tables.push(summary),
            Err(error) => {
                let committed: Vec<&str> = tables.iter().map(|t| t.name.as_str()).collect();
                warn!(
                    failed = %path.display(),
                    committed = ?committed,
                    "import aborted"
                );
                return Err(error);
            }
        }
    }

    let total_rows = writer.total_changes()?;
    writer.close()?;
    Ok((tables, total_rows))
}

/// Remove a store left incomplete by a failed run.
fn discard_store(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => warn!(path = %path.display(), "removed incomplete store"),
        Err(error) => warn!(
            path = %path.display(),
            %error,
            "could not remove incomplete store"
        ),
    }
}

fn import_file(
    writer: &mut StoreWriter,
    path: &Path,
    options: &ImportOptions,
) -> Result<TableSummary> {
    let name = table_name_for(path)?;
    let span = info_span!("table", table = %name);
    let _guard = span.enter();
    info!("importing");

    let source = read_source_table(path)?;
    let table = build_target_table(name.as_str(), source, options);
    let rows = writer
        .import_table(&table)
        .with_context(|| format!("import {}", path.display()))?;

    Ok(TableSummary {
        name,
        columns: table.width(),
        rows,
        primary_key: table.primary_key().map(str::to_string),
        reshaped_rows: table.reshaped_rows,
    })
}
