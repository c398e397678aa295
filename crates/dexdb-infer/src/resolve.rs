//! Column schema resolution from classification tallies.
//!
//! The storage type is the widest kind observed in the column: a single TEXT
//! cell makes the whole column TEXT even when every other cell is numeric.

use std::collections::HashSet;

use dexdb_model::{ClassificationTally, ColumnSchema, PRIMARY_KEY_COLUMN, StorageType};

/// Storage type by fixed precedence TEXT > REAL > INTEGER > BLOB.
pub fn storage_type_for(tally: &ClassificationTally) -> StorageType {
    if tally.text > 0 {
        StorageType::Text
    } else if tally.real > 0 {
        StorageType::Real
    } else if tally.integer > 0 {
        StorageType::Integer
    } else {
        // Nothing typed observed; do not guess a coercion.
        StorageType::Blob
    }
}

/// A column is nullable iff at least one of its cells was NULL.
pub fn is_nullable(tally: &ClassificationTally) -> bool {
    tally.null > 0
}

/// True when every row has a value at `index` and no two values are equal.
///
/// Values that parse as `i64` are compared numerically so that `1` and `01`
/// count as the same key, as they would once stored in an INTEGER column.
pub fn all_distinct(rows: &[Vec<String>], index: usize) -> bool {
    let mut seen_numbers = HashSet::with_capacity(rows.len());
    let mut seen_text = HashSet::new();
    for row in rows {
        let Some(value) = row.get(index) else {
            return false;
        };
        let fresh = match value.parse::<i64>() {
            Ok(number) => seen_numbers.insert(number),
            Err(_) => seen_text.insert(value.as_str()),
        };
        if !fresh {
            return false;
        }
    }
    true
}

/// Resolve the schema of the column at `index` named `name`.
///
/// `rows` is the full row set of the table; it is only scanned for
/// distinctness when every other primary-key condition already holds.
pub fn resolve_column(
    name: &str,
    tally: &ClassificationTally,
    rows: &[Vec<String>],
    index: usize,
) -> ColumnSchema {
    let storage_type = storage_type_for(tally);
    let nullable = is_nullable(tally);
    let is_primary_key = name == PRIMARY_KEY_COLUMN
        && storage_type == StorageType::Integer
        && !nullable
        && all_distinct(rows, index);
    ColumnSchema {
        name: name.to_string(),
        storage_type,
        nullable,
        is_primary_key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(null: usize, integer: usize, real: usize, text: usize) -> ClassificationTally {
        ClassificationTally {
            null,
            integer,
            real,
            text,
        }
    }

    #[test]
    fn precedence_is_text_real_integer_blob() {
        assert_eq!(storage_type_for(&tally(0, 9, 9, 1)), StorageType::Text);
        assert_eq!(storage_type_for(&tally(3, 9, 1, 0)), StorageType::Real);
        assert_eq!(storage_type_for(&tally(3, 1, 0, 0)), StorageType::Integer);
        assert_eq!(storage_type_for(&tally(3, 0, 0, 0)), StorageType::Blob);
        assert_eq!(storage_type_for(&tally(0, 0, 0, 0)), StorageType::Blob);
    }

    #[test]
    fn nullable_needs_one_null() {
        assert!(is_nullable(&tally(1, 5, 0, 0)));
        assert!(!is_nullable(&tally(0, 5, 0, 0)));
    }

    #[test]
    fn distinctness_compares_integers_numerically() {
        let rows = |values: &[&str]| -> Vec<Vec<String>> {
            values.iter().map(|v| vec![(*v).to_string()]).collect()
        };
        assert!(all_distinct(&rows(&["1", "2", "3"]), 0));
        assert!(!all_distinct(&rows(&["1", "1", "2"]), 0));
        assert!(!all_distinct(&rows(&["1", "01"]), 0));
        assert!(all_distinct(&rows(&[]), 0));
        assert!(!all_distinct(&[vec![]], 0));
    }
}
