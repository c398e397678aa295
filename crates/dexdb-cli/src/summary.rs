use std::collections::BTreeMap;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{BuildResult, TableSummary};

pub fn print_build_summary(result: &BuildResult, color: bool) {
    println!("{}", render_build_summary(result, color));
}

pub fn render_build_summary(result: &BuildResult, color: bool) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Columns"),
        header_cell("Rows"),
        header_cell("Primary Key"),
        header_cell("Reshaped"),
    ]);
    apply_summary_table_style(&mut table, color);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);

    let mut total_rows = 0usize;
    for summary in &result.tables {
        total_rows += summary.rows;
        table.add_row(summary_row(summary));
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        dim_cell("-"),
        count_cell(result.reshaped_rows(), Color::Yellow).add_attribute(Attribute::Bold),
    ]);

    format!(
        "Store: {store}\n\
         Created at: {created_at}\n\
         Dataset revision: {dataset}\n\
         Importer revision: {importer}\n\
         {table}\n\
         Database Metadata:\n   \
         Tables: {tables}\n   \
         Rows: {rows}\n   \
         File Size: {size_mb:.2} MB ({size_bytes} bytes)",
        store = result.store_path.display(),
        created_at = result.metadata.created_at,
        dataset = result.metadata.dataset_revision,
        importer = result.metadata.importer_revision,
        tables = result.tables.len(),
        rows = result.total_rows,
        size_mb = result.file_size_mb(),
        size_bytes = result.file_size_bytes,
    )
}

/// Table names with row counts, followed by the recorded run metadata.
pub fn render_store_listing(
    counts: &[(String, u64)],
    metadata: &BTreeMap<String, String>,
    color: bool,
) -> String {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Table"), header_cell("Rows")]);
    apply_table_style(&mut table, color);
    align_column(&mut table, 1, CellAlignment::Right);
    for (name, rows) in counts {
        table.add_row(vec![Cell::new(name), Cell::new(rows)]);
    }

    let mut meta = Table::new();
    meta.set_header(vec![header_cell("Key"), header_cell("Value")]);
    apply_table_style(&mut meta, color);
    for (key, value) in metadata {
        meta.add_row(vec![Cell::new(key), Cell::new(value)]);
    }
    format!("{table}\n{meta}")
}

fn summary_row(summary: &TableSummary) -> Vec<Cell> {
    vec![
        Cell::new(&summary.name)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.columns),
        Cell::new(summary.rows),
        match &summary.primary_key {
            Some(column) => Cell::new(column).fg(Color::Green),
            None => dim_cell("-"),
        },
        count_cell(summary.reshaped_rows, Color::Yellow),
    ]
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn apply_table_style(table: &mut Table, color: bool) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    set_styling(table, color);
}

fn apply_summary_table_style(table: &mut Table, color: bool) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    set_styling(table, color);
}

fn set_styling(table: &mut Table, color: bool) {
    if color {
        table.enforce_styling();
    } else {
        table.force_no_tty();
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use dexdb_model::RunMetadata;

    use super::*;

    fn result() -> BuildResult {
        BuildResult {
            store_path: PathBuf::from("pokeapi.sqlite"),
            metadata: RunMetadata::now("abc", "unknown"),
            tables: vec![
                TableSummary {
                    name: "types".to_string(),
                    columns: 4,
                    rows: 20,
                    primary_key: Some("id".to_string()),
                    reshaped_rows: 0,
                },
                TableSummary {
                    name: "type_efficacy".to_string(),
                    columns: 3,
                    rows: 324,
                    primary_key: None,
                    reshaped_rows: 2,
                },
            ],
            total_rows: 344,
            file_size_bytes: 3 * 1024 * 1024 / 2,
        }
    }

    #[test]
    fn summary_reports_totals_and_size() {
        let rendered = render_build_summary(&result(), false);
        assert!(rendered.contains("Tables: 2"));
        assert!(rendered.contains("Rows: 344"));
        assert!(rendered.ends_with("File Size: 1.50 MB (1572864 bytes)"));
        assert!(rendered.contains("type_efficacy"));
        assert!(!rendered.contains('\u{1b}'));
    }

    #[test]
    fn listing_shows_counts_and_metadata() {
        let mut metadata = BTreeMap::new();
        metadata.insert("pokeapi_git_sha".to_string(), "abc".to_string());
        let rendered = render_store_listing(&[("types".to_string(), 20)], &metadata, false);
        assert!(rendered.contains("types"));
        assert!(rendered.contains("20"));
        assert!(rendered.contains("pokeapi_git_sha"));
    }
}
