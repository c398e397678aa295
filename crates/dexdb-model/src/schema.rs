//! Resolved column schemas.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Only a column with this exact name may become the primary key.
pub const PRIMARY_KEY_COLUMN: &str = "id";

/// Declared SQL storage type of a column.
///
/// Resolution precedence is TEXT > REAL > INTEGER > BLOB: the widest kind
/// observed in a column wins, and BLOB is used when no typed value was seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageType {
    Text,
    Real,
    Integer,
    /// No typed value observed; stored without coercion.
    Blob,
}

impl StorageType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            StorageType::Text => "TEXT",
            StorageType::Real => "REAL",
            StorageType::Integer => "INTEGER",
            StorageType::Blob => "BLOB",
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for StorageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TEXT" => Ok(StorageType::Text),
            "REAL" => Ok(StorageType::Real),
            "INTEGER" => Ok(StorageType::Integer),
            "BLOB" => Ok(StorageType::Blob),
            other => Err(format!("unknown storage type: {other}")),
        }
    }
}

/// The resolved schema of one column.
///
/// Invariant: `is_primary_key` implies `name == "id"`, `storage_type ==
/// Integer`, `!nullable`, and that every value in the column is distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    pub storage_type: StorageType,
    pub nullable: bool,
    pub is_primary_key: bool,
}

impl ColumnSchema {
    /// Column declaration for a `CREATE TABLE` statement:
    /// `"name" TYPE [NOT NULL] [PRIMARY KEY]`.
    pub fn declaration(&self) -> String {
        let mut decl = format!(
            "{} {}",
            quote_identifier(&self.name),
            self.storage_type.as_sql()
        );
        if !self.nullable {
            decl.push_str(" NOT NULL");
        }
        if self.is_primary_key {
            decl.push_str(" PRIMARY KEY");
        }
        decl
    }
}

/// Quote an SQL identifier with double quotes, doubling any embedded quote.
///
/// ```
/// use dexdb_model::schema::quote_identifier;
///
/// assert_eq!(quote_identifier("order"), "\"order\"");
/// assert_eq!(quote_identifier("a\"b"), "\"a\"\"b\"");
/// ```
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
