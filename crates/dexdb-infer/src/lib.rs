//! Schema inference for raw tabular data.
//!
//! This crate decides, per column, what a table should look like:
//!
//! - **classify**: one raw cell → NULL / INTEGER / REAL / TEXT
//! - **resolve**: a column's tally → storage type, nullability, primary key
//! - **scrub**: `[display]{ns:ref}` markup → plain text (TEXT columns only)
//! - **normalize**: ragged rows → rows of exactly the header width
//! - **table**: all of the above applied to one source table

pub mod classify;
pub mod normalize;
pub mod resolve;
pub mod scrub;
pub mod table;

pub use classify::{classify_cell, classify_value, tally_column};
pub use normalize::{RowShape, normalize_row};
pub use resolve::{all_distinct, is_nullable, resolve_column, storage_type_for};
pub use scrub::scrub_text;
pub use table::build_target_table;
