//! Source discovery and CSV materialization.
//!
//! Input files are read completely into memory before any type inference runs:
//! classification needs a whole-column view.

pub mod csv_table;
pub mod discovery;
pub mod error;

pub use csv_table::{SourceTable, read_source_table, read_source_table_from_reader};
pub use discovery::{list_csv_files, table_name_for};
pub use error::{IngestError, Result};
