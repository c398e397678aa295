//! SQL statement text.
//!
//! Table and column names come from file names and CSV headers, so every
//! identifier is quoted.

pub use dexdb_model::schema::quote_identifier;
use dexdb_model::{METADATA_TABLE, TargetTable};

/// `CREATE TABLE "name" (<declarations in header order>)`.
pub fn create_table_sql(table: &TargetTable) -> String {
    let declarations: Vec<String> = table
        .columns
        .iter()
        .map(dexdb_model::ColumnSchema::declaration)
        .collect();
    format!(
        "CREATE TABLE {} ({})",
        quote_identifier(&table.name),
        declarations.join(", ")
    )
}

/// `INSERT INTO "name" VALUES (?1, ..., ?width)`.
pub fn insert_sql(table_name: &str, width: usize) -> String {
    let placeholders: Vec<String> = (1..=width).map(|i| format!("?{i}")).collect();
    format!(
        "INSERT INTO {} VALUES ({})",
        quote_identifier(table_name),
        placeholders.join(", ")
    )
}

pub fn create_metadata_sql() -> String {
    format!(
        "CREATE TABLE {} (key TEXT PRIMARY KEY, value TEXT)",
        quote_identifier(METADATA_TABLE)
    )
}

pub fn insert_metadata_sql() -> String {
    insert_sql(METADATA_TABLE, 2)
}

/// `SELECT COUNT(*) FROM "name"`.
pub fn count_rows_sql(table_name: &str) -> String {
    format!("SELECT COUNT(*) FROM {}", quote_identifier(table_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dexdb_model::{ColumnSchema, StorageType};

    #[test]
    fn create_statement_lists_columns_in_order() {
        let table = TargetTable::new(
            "order",
            vec![
                ColumnSchema {
                    name: "id".to_string(),
                    storage_type: StorageType::Integer,
                    nullable: false,
                    is_primary_key: true,
                },
                ColumnSchema {
                    name: "group".to_string(),
                    storage_type: StorageType::Blob,
                    nullable: true,
                    is_primary_key: false,
                },
            ],
        );
        assert_eq!(
            create_table_sql(&table),
            "CREATE TABLE \"order\" (\"id\" INTEGER NOT NULL PRIMARY KEY, \"group\" BLOB)"
        );
    }

    #[test]
    fn insert_statement_has_one_placeholder_per_column() {
        assert_eq!(
            insert_sql("types", 3),
            "INSERT INTO \"types\" VALUES (?1, ?2, ?3)"
        );
        assert_eq!(
            insert_metadata_sql(),
            "INSERT INTO \"__metadata\" VALUES (?1, ?2)"
        );
    }
}
