//! Tests for dexdb-model types.

use chrono::{TimeZone, Utc};
use dexdb_model::{
    ClassificationTally, ColumnSchema, ImportOptions, MetadataKey, RunMetadata, StorageType,
    TargetTable, ValueKind,
};

#[test]
fn storage_type_parses_case_insensitively() {
    assert_eq!("text".parse::<StorageType>(), Ok(StorageType::Text));
    assert_eq!(" Integer ".parse::<StorageType>(), Ok(StorageType::Integer));
    assert!("NUMERIC".parse::<StorageType>().is_err());
}

#[test]
fn declaration_quotes_reserved_and_odd_names() {
    let column = ColumnSchema {
        name: "order \"x\"".to_string(),
        storage_type: StorageType::Text,
        nullable: false,
        is_primary_key: false,
    };
    assert_eq!(column.declaration(), "\"order \"\"x\"\"\" TEXT NOT NULL");
}

#[test]
fn run_metadata_entries_are_ordered() {
    let created = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
    let metadata = RunMetadata::new(created, "abc123", "def456");
    assert_eq!(metadata.created_at, "2024-03-01T12:30:00.000000Z");
    assert_eq!(
        metadata.entries(),
        vec![
            ("created_at", "2024-03-01T12:30:00.000000Z"),
            ("pokeapi_git_sha", "abc123"),
            ("pokeapi_sqlite_git_sha", "def456"),
        ]
    );
    assert_eq!(metadata.get(MetadataKey::DatasetRevision), "abc123");
}

#[test]
fn run_metadata_serializes() {
    let metadata = RunMetadata::new(Utc::now(), "a", "b");
    let json = serde_json::to_string(&metadata).expect("serialize metadata");
    let round: RunMetadata = serde_json::from_str(&json).expect("deserialize metadata");
    assert_eq!(round, metadata);
}

#[test]
fn target_table_reports_primary_key() {
    let mut table = TargetTable::new(
        "pokemon",
        vec![
            ColumnSchema {
                name: "id".to_string(),
                storage_type: StorageType::Integer,
                nullable: false,
                is_primary_key: true,
            },
            ColumnSchema {
                name: "identifier".to_string(),
                storage_type: StorageType::Text,
                nullable: false,
                is_primary_key: false,
            },
        ],
    );
    table.rows.push(vec![Some("1".to_string()), Some("bulbasaur".to_string())]);
    assert_eq!(table.width(), 2);
    assert_eq!(table.row_count(), 1);
    assert_eq!(table.primary_key(), Some("id"));
    assert!(table.column("identifier").is_some());
    assert!(table.column("missing").is_none());
}

#[test]
fn empty_tally_has_no_observations() {
    let tally = ClassificationTally::new();
    for kind in ValueKind::ALL {
        assert_eq!(tally.count(kind), 0);
    }
    assert_eq!(tally.total(), 0);
}

#[test]
fn import_options_default_scrubs() {
    assert!(ImportOptions::default().scrub_text);
    assert!(!ImportOptions::raw().scrub_text);
    assert!(!ImportOptions::new().with_scrub_text(false).scrub_text);
}
