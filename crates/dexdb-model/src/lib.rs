//! Data model shared by the dexdb import engine and its read-side tools.
//!
//! - **value**: per-cell classification kinds and per-column tallies
//! - **schema**: resolved column schemas and storage types
//! - **table**: the target table handed to the store
//! - **metadata**: process-wide run metadata written before any import
//! - **options**: import behavior switches

pub mod metadata;
pub mod options;
pub mod schema;
pub mod table;
pub mod value;

pub use metadata::{METADATA_TABLE, MetadataKey, RunMetadata, UNKNOWN_REVISION};
pub use options::ImportOptions;
pub use schema::{ColumnSchema, PRIMARY_KEY_COLUMN, StorageType};
pub use table::TargetTable;
pub use value::{ClassificationTally, ValueKind};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_counts_each_kind() {
        let tally = ClassificationTally::from_kinds([
            ValueKind::Null,
            ValueKind::Integer,
            ValueKind::Integer,
            ValueKind::Text,
        ]);
        assert_eq!(tally.count(ValueKind::Null), 1);
        assert_eq!(tally.count(ValueKind::Integer), 2);
        assert_eq!(tally.count(ValueKind::Real), 0);
        assert_eq!(tally.count(ValueKind::Text), 1);
        assert_eq!(tally.total(), 4);
    }

    #[test]
    fn column_declaration_follows_flags() {
        let id = ColumnSchema {
            name: "id".to_string(),
            storage_type: StorageType::Integer,
            nullable: false,
            is_primary_key: true,
        };
        assert_eq!(id.declaration(), "\"id\" INTEGER NOT NULL PRIMARY KEY");

        let score = ColumnSchema {
            name: "score".to_string(),
            storage_type: StorageType::Real,
            nullable: true,
            is_primary_key: false,
        };
        assert_eq!(score.declaration(), "\"score\" REAL");
    }
}
