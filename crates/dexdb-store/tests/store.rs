//! Store writer/reader behavior against real SQLite files.

use dexdb_model::{ColumnSchema, RunMetadata, StorageType, TargetTable};
use dexdb_store::{CellValue, StoreError, StoreReader, StoreWriter, ensure_store_absent};
use tempfile::TempDir;

fn column(name: &str, storage_type: StorageType, nullable: bool, pk: bool) -> ColumnSchema {
    ColumnSchema {
        name: name.to_string(),
        storage_type,
        nullable,
        is_primary_key: pk,
    }
}

fn cell(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn moves_table() -> TargetTable {
    let mut table = TargetTable::new(
        "moves",
        vec![
            column("id", StorageType::Integer, false, true),
            column("identifier", StorageType::Text, false, false),
            column("power", StorageType::Integer, true, false),
            column("accuracy_ratio", StorageType::Real, true, false),
        ],
    );
    table.rows = vec![
        vec![cell("1"), cell("pound"), cell("40"), cell("1.0")],
        vec![cell("2"), cell("karate-chop"), None, cell("0.5")],
        vec![cell("3"), cell("double-slap"), cell("15"), None],
    ];
    table
}

fn metadata() -> RunMetadata {
    RunMetadata::now("abc123", "def456")
}

#[test]
fn metadata_writes_are_not_counted_after_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dex.sqlite");

    let mut writer = StoreWriter::create(&path, false).unwrap();
    writer.write_metadata(&metadata()).unwrap();
    let mut writer = writer.reopen().unwrap();
    assert_eq!(writer.total_changes().unwrap(), 0);

    let inserted = writer.import_table(&moves_table()).unwrap();
    assert_eq!(inserted, 3);
    assert_eq!(writer.total_changes().unwrap(), 3);
    writer.close().unwrap();

    let reader = StoreReader::open(&path).unwrap();
    let recorded = reader.metadata().unwrap();
    assert_eq!(recorded.get("pokeapi_git_sha").map(String::as_str), Some("abc123"));
    assert_eq!(recorded.get("pokeapi_sqlite_git_sha").map(String::as_str), Some("def456"));
    assert!(recorded.contains_key("created_at"));
}

#[test]
fn declared_types_coerce_text_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dex.sqlite");
    let mut writer = StoreWriter::create(&path, false).unwrap();
    writer.import_table(&moves_table()).unwrap();
    writer.close().unwrap();

    let reader = StoreReader::open(&path).unwrap();
    let rows = reader
        .query("SELECT * FROM moves ORDER BY id", [])
        .unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["id"], CellValue::Integer(1));
    assert_eq!(rows[0]["power"], CellValue::Integer(40));
    assert_eq!(rows[0]["accuracy_ratio"], CellValue::Real(1.0));
    assert_eq!(rows[1]["identifier"], CellValue::Text("karate-chop".to_string()));
    assert!(rows[1]["power"].is_null());
    assert!(rows[2]["accuracy_ratio"].is_null());
}

#[test]
fn table_listing_hides_metadata() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dex.sqlite");
    let mut writer = StoreWriter::create(&path, false).unwrap();
    writer.write_metadata(&metadata()).unwrap();
    writer.import_table(&moves_table()).unwrap();
    writer.close().unwrap();

    let reader = StoreReader::open(&path).unwrap();
    assert_eq!(reader.table_names().unwrap(), vec!["moves".to_string()]);
    assert_eq!(reader.row_count("moves").unwrap(), 3);
}

#[test]
fn failed_import_leaves_no_partial_table() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dex.sqlite");
    let mut writer = StoreWriter::create(&path, false).unwrap();

    let mut table = moves_table();
    // Duplicate primary key fails on the second row.
    table.rows[1][0] = cell("1");
    let err = writer.import_table(&table).unwrap_err();
    assert!(matches!(err, StoreError::Sql { .. }));
    writer.close().unwrap();

    let reader = StoreReader::open(&path).unwrap();
    assert!(reader.table_names().unwrap().is_empty());
}

#[test]
fn odd_identifiers_are_quoted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dex.sqlite");
    let mut writer = StoreWriter::create(&path, false).unwrap();
    let mut table = TargetTable::new(
        "order",
        vec![
            column("select", StorageType::Text, false, false),
            column("has \"quote\"", StorageType::Blob, true, false),
        ],
    );
    table.rows = vec![vec![cell("x"), None]];
    assert_eq!(writer.import_table(&table).unwrap(), 1);
    writer.close().unwrap();

    let reader = StoreReader::open(&path).unwrap();
    let rows = reader.query("SELECT * FROM \"order\"", []).unwrap();
    assert_eq!(rows[0].column_names()[1], "has \"quote\"");
    assert_eq!(rows[0].to_string(), "Row(select='x', has \"quote\"=NULL)");
}

#[test]
fn existing_store_requires_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dex.sqlite");
    StoreWriter::create(&path, false).unwrap().close().unwrap();

    assert!(matches!(
        ensure_store_absent(&path, false),
        Err(StoreError::AlreadyExists { .. })
    ));
    assert!(matches!(
        StoreWriter::create(&path, false),
        Err(StoreError::AlreadyExists { .. })
    ));

    let mut writer = StoreWriter::create(&path, true).unwrap();
    writer.import_table(&moves_table()).unwrap();
    writer.close().unwrap();
    assert_eq!(StoreReader::open(&path).unwrap().row_count("moves").unwrap(), 3);
}

#[test]
fn missing_store_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let err = StoreReader::open(&dir.path().join("absent.sqlite")).unwrap_err();
    assert!(matches!(err, StoreError::Unavailable { .. }));
    assert!(err.to_string().contains("dexdb build"));
}

#[test]
fn rows_serialize_as_objects() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dex.sqlite");
    let mut writer = StoreWriter::create(&path, false).unwrap();
    writer.import_table(&moves_table()).unwrap();
    writer.close().unwrap();

    let reader = StoreReader::open(&path).unwrap();
    let rows = reader
        .query("SELECT id, identifier, power FROM moves WHERE id = ?1", [2])
        .unwrap();
    let json = serde_json::to_string(&rows[0]).unwrap();
    assert_eq!(json, r#"{"id":2,"identifier":"karate-chop","power":null}"#);
}
