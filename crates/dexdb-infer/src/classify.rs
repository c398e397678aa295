//! Per-cell value classification.
//!
//! Only ASCII digits count as digits, matching what SQLite will coerce on
//! insert. Exponents (`1e10`), `inf` and `nan` are TEXT.

use dexdb_model::{ClassificationTally, ValueKind};

/// Classify a present cell.
///
/// # Examples
///
/// ```
/// use dexdb_infer::classify_value;
/// use dexdb_model::ValueKind;
///
/// assert_eq!(classify_value(""), ValueKind::Null);
/// assert_eq!(classify_value("-123"), ValueKind::Integer);
/// assert_eq!(classify_value("123."), ValueKind::Real);
/// assert_eq!(classify_value(".5"), ValueKind::Real);
/// assert_eq!(classify_value("1e5"), ValueKind::Text);
/// ```
pub fn classify_value(value: &str) -> ValueKind {
    if value.is_empty() {
        ValueKind::Null
    } else if is_integer(value) {
        ValueKind::Integer
    } else if is_real(value) {
        ValueKind::Real
    } else {
        ValueKind::Text
    }
}

/// Classify a cell that may be absent (row shorter than the header).
pub fn classify_cell(value: Option<&str>) -> ValueKind {
    value.map_or(ValueKind::Null, classify_value)
}

/// Tally the kinds of every row's value at `index`.
pub fn tally_column(rows: &[Vec<String>], index: usize) -> ClassificationTally {
    ClassificationTally::from_kinds(
        rows.iter()
            .map(|row| classify_cell(row.get(index).map(String::as_str))),
    )
}

fn all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// `-?\d+`
fn is_integer(value: &str) -> bool {
    all_digits(value.strip_prefix('-').unwrap_or(value))
}

/// `-?\d+\.\d*` or `\.\d+`
fn is_real(value: &str) -> bool {
    if let Some(fraction) = value.strip_prefix('.') {
        return all_digits(fraction);
    }
    let unsigned = value.strip_prefix('-').unwrap_or(value);
    match unsigned.split_once('.') {
        Some((whole, fraction)) => {
            all_digits(whole) && (fraction.is_empty() || all_digits(fraction))
        }
        None => false,
    }
}
