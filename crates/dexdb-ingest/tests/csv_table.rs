use std::fs;

use dexdb_ingest::{IngestError, read_source_table};
use tempfile::TempDir;

#[test]
fn reads_header_and_rows_from_disk() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("pokemon.csv");
    fs::write(&path, "id,identifier,height\n1,bulbasaur,7\n2,ivysaur,\n").expect("write file");

    let table = read_source_table(&path).expect("read csv");
    assert_eq!(table.headers, vec!["id", "identifier", "height"]);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[1], vec!["2", "ivysaur", ""]);
    assert_eq!(table.path, path);
}

#[test]
fn quoted_fields_keep_commas_and_newlines() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("prose.csv");
    fs::write(&path, "id,effect\n1,\"Hits, then\nflinches.\"\n").expect("write file");

    let table = read_source_table(&path).expect("read csv");
    assert_eq!(table.rows, vec![vec!["1", "Hits, then\nflinches."]]);
}

#[test]
fn non_utf8_file_is_rejected() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("latin1.csv");
    fs::write(&path, b"id,name\n1,Pok\xe9mon\n").expect("write file");

    let err = read_source_table(&path).expect_err("latin-1 must fail");
    assert!(matches!(err, IngestError::InvalidEncoding { .. }), "{err}");
}

#[test]
fn missing_file_is_reported() {
    let dir = TempDir::new().expect("create temp dir");
    let err = read_source_table(&dir.path().join("nope.csv")).expect_err("missing file");
    assert!(matches!(err, IngestError::FileRead { .. }));
}
