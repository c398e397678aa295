use crate::schema::ColumnSchema;

/// One table produced from one source file, ready to be written to the store.
///
/// Every row has exactly `columns.len()` fields. `None` is bound as SQL NULL;
/// `Some` values are bound as text and coerced by the column's declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetTable {
    pub name: String,
    pub columns: Vec<ColumnSchema>,
    pub rows: Vec<Vec<Option<String>>>,
    /// Rows that had to be truncated or padded to the header width.
    pub reshaped_rows: usize,
}

impl TargetTable {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnSchema>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
            reshaped_rows: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Name of the primary key column, if one was resolved.
    pub fn primary_key(&self) -> Option<&str> {
        self.columns
            .iter()
            .find(|column| column.is_primary_key)
            .map(|column| column.name.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|column| column.name == name)
    }
}
