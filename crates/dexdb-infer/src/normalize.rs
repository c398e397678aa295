//! Row-shape normalization.

/// How a row compared to the expected width before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowShape {
    Exact,
    /// Row was short; this many NULL fields were appended.
    Padded { missing: usize },
    /// Row was long; this many trailing fields were dropped.
    Truncated { extra: usize },
}

impl RowShape {
    pub fn is_exact(&self) -> bool {
        matches!(self, RowShape::Exact)
    }
}

/// Coerce a raw row to exactly `width` fields.
///
/// Empty strings become `None` (SQL NULL), as do padded fields. Never fails.
pub fn normalize_row(row: Vec<String>, width: usize) -> (Vec<Option<String>>, RowShape) {
    let actual = row.len();
    let shape = match actual.cmp(&width) {
        std::cmp::Ordering::Equal => RowShape::Exact,
        std::cmp::Ordering::Less => RowShape::Padded {
            missing: width - actual,
        },
        std::cmp::Ordering::Greater => RowShape::Truncated {
            extra: actual - width,
        },
    };
    let mut fields: Vec<Option<String>> = row
        .into_iter()
        .take(width)
        .map(|value| if value.is_empty() { None } else { Some(value) })
        .collect();
    fields.resize(width, None);
    (fields, shape)
}
