//! SQLite store for imported tables.
//!
//! - **writer**: creates a fresh store, bootstraps run metadata, and imports
//!   one target table per transaction
//! - **reader**: read-only access for reporting tools, returning rows that can
//!   be addressed by column name
//! - **sql**: statement text generation with identifier quoting

pub mod error;
mod reader;
mod row;
pub mod sql;
mod value;
mod writer;

pub use error::{Result, StoreError};
pub use reader::StoreReader;
pub use rusqlite::Params;
pub use row::NamedRow;
pub use value::CellValue;
pub use writer::{StoreWriter, ensure_store_absent};
