//! Column inference over whole source tables.

use std::path::PathBuf;

use dexdb_infer::{build_target_table, classify_value, resolve_column, tally_column};
use dexdb_ingest::SourceTable;
use dexdb_model::{ImportOptions, StorageType, ValueKind};

fn source(headers: &[&str], rows: &[&[&str]]) -> SourceTable {
    SourceTable {
        path: PathBuf::from("fixture.csv"),
        headers: headers.iter().map(|h| (*h).to_string()).collect(),
        rows: rows
            .iter()
            .map(|row| row.iter().map(|v| (*v).to_string()).collect())
            .collect(),
    }
}

fn column(values: &[&str]) -> Vec<Vec<String>> {
    values.iter().map(|v| vec![(*v).to_string()]).collect()
}

#[test]
fn classifies_reference_values() {
    assert_eq!(classify_value(""), ValueKind::Null);
    assert_eq!(classify_value("-123"), ValueKind::Integer);
    assert_eq!(classify_value("123."), ValueKind::Real);
    assert_eq!(classify_value(".5"), ValueKind::Real);
    assert_eq!(classify_value("abc"), ValueKind::Text);
    assert_eq!(classify_value("1e5"), ValueKind::Text);
}

#[test]
fn one_text_value_widens_the_column() {
    let rows = column(&["1", "2.5", "x"]);
    let tally = tally_column(&rows, 0);
    let schema = resolve_column("value", &tally, &rows, 0);
    assert_eq!(schema.storage_type, StorageType::Text);
    assert!(!schema.nullable);
}

#[test]
fn empty_cell_makes_integer_column_nullable() {
    let rows = column(&["1", "", "3"]);
    let tally = tally_column(&rows, 0);
    let schema = resolve_column("value", &tally, &rows, 0);
    assert_eq!(schema.storage_type, StorageType::Integer);
    assert!(schema.nullable);
}

#[test]
fn primary_key_requires_unique_id_column() {
    let unique = column(&["1", "2", "3"]);
    let schema = resolve_column("id", &tally_column(&unique, 0), &unique, 0);
    assert!(schema.is_primary_key);

    let duplicated = column(&["1", "1", "2"]);
    let schema = resolve_column("id", &tally_column(&duplicated, 0), &duplicated, 0);
    assert!(!schema.is_primary_key);

    let schema = resolve_column("ID", &tally_column(&unique, 0), &unique, 0);
    assert!(!schema.is_primary_key, "name must be exactly `id`");

    let with_null = column(&["1", "", "3"]);
    let schema = resolve_column("id", &tally_column(&with_null, 0), &with_null, 0);
    assert!(!schema.is_primary_key);

    let reals = column(&["1.0", "2.0"]);
    let schema = resolve_column("id", &tally_column(&reals, 0), &reals, 0);
    assert!(!schema.is_primary_key);
}

#[test]
fn builds_reference_table() {
    let src = source(
        &["id", "name", "score"],
        &[&["1", "Alice", "10.5"], &["2", "Bob", ""]],
    );
    let table = build_target_table("people", src, &ImportOptions::default());

    let declarations: Vec<String> = table.columns.iter().map(|c| c.declaration()).collect();
    assert_eq!(
        declarations,
        vec![
            "\"id\" INTEGER NOT NULL PRIMARY KEY",
            "\"name\" TEXT NOT NULL",
            "\"score\" REAL",
        ]
    );
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[1][2], None);
    assert_eq!(table.reshaped_rows, 0);
}

#[test]
fn header_only_table_resolves_to_blob() {
    let src = source(&["id", "identifier"], &[]);
    let table = build_target_table("empty", src, &ImportOptions::default());
    for column in &table.columns {
        assert_eq!(column.storage_type, StorageType::Blob);
        assert!(!column.nullable);
        assert!(!column.is_primary_key);
    }
    assert!(table.rows.is_empty());
}

#[test]
fn ragged_rows_are_normalized_and_inferred_as_null() {
    let src = source(
        &["a", "b", "c", "d", "e"],
        &[
            &["1", "2", "3"],
            &["1", "2", "3", "4", "5", "6", "7"],
            &["1", "2", "3", "4", "5"],
        ],
    );
    let table = build_target_table("ragged", src, &ImportOptions::default());
    assert_eq!(table.reshaped_rows, 2);
    assert_eq!(table.rows[0][3], None);
    assert_eq!(table.rows[0][4], None);
    assert_eq!(table.rows[1][4].as_deref(), Some("5"));
    assert!(table.column("d").unwrap().nullable);
    assert!(!table.column("a").unwrap().nullable);
}

#[test]
fn only_text_columns_are_scrubbed() {
    let src = source(
        &["id", "effect", "code"],
        &[
            &["1", "Lowers [Speed]{mechanic:speed}.", "[]{x:y}"],
            &["2", "[]{move:dragon-tail} hits.", "7"],
        ],
    );
    let table = build_target_table("prose", src, &ImportOptions::default());
    assert_eq!(table.rows[0][1].as_deref(), Some("Lowers Speed."));
    assert_eq!(table.rows[1][1].as_deref(), Some("dragon tail hits."));
    // `code` is TEXT because of the markup cell, so it is scrubbed too.
    assert_eq!(table.rows[0][2].as_deref(), Some("y"));
}
