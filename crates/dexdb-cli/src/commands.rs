use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dexdb_cli::pipeline::{BuildConfig, run_build};
use dexdb_cli::summary::{print_build_summary, render_store_listing};
use dexdb_model::ImportOptions;
use dexdb_report::{
    ChartStyle, export_items, export_moves, export_pokedex, export_table, export_types,
    load_type_chart, render_type_chart, to_json_string,
};
use dexdb_store::StoreReader;
use tracing::debug;

use crate::cli::{BuildArgs, ExportCommand, TypeChartArgs};

pub fn run_build_command(args: &BuildArgs, store: &Path, color: bool) -> Result<()> {
    let config = BuildConfig {
        store_path: store.to_path_buf(),
        dataset_dir: args.dataset_dir.clone(),
        csv_dir: args.csv_dir.clone(),
        repo_url: args.repo_url.clone(),
        overwrite: args.overwrite,
        allow_clone: !args.no_clone,
        importer_dir: PathBuf::from("."),
        options: ImportOptions::new().with_scrub_text(!args.no_scrub),
    };
    debug!(?config, "build configuration");
    let result = run_build(&config)?;
    print_build_summary(&result, color);
    Ok(())
}

pub fn run_tables(store: &Path, color: bool) -> Result<()> {
    let reader = StoreReader::open(store)?;
    let mut counts = Vec::new();
    for name in reader.table_names()? {
        let rows = reader.row_count(&name)?;
        counts.push((name, rows));
    }
    let metadata = reader.metadata().context("read run metadata")?;
    println!("{}", render_store_listing(&counts, &metadata, color));
    Ok(())
}

pub fn run_export(command: &ExportCommand, store: &Path) -> Result<()> {
    let reader = StoreReader::open(store)?;
    let json = match command {
        ExportCommand::Items => to_json_string(&export_items(&reader)?)?,
        ExportCommand::Moves => to_json_string(&export_moves(&reader)?)?,
        ExportCommand::Pokedex => to_json_string(&export_pokedex(&reader)?)?,
        ExportCommand::Types => to_json_string(&export_types(&reader)?)?,
        ExportCommand::Table { name } => to_json_string(&export_table(&reader, name)?)?,
    };
    println!("{json}");
    Ok(())
}

pub fn run_type_chart(args: &TypeChartArgs, store: &Path, color: bool) -> Result<()> {
    let reader = StoreReader::open(store)?;
    let chart = load_type_chart(&reader, args.generation, args.language_id)?;
    let style = ChartStyle {
        color,
        ascii: args.ascii,
    };
    println!("{}", render_type_chart(&chart, &style));
    Ok(())
}
