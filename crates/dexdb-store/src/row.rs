//! Rows addressable by position or by column name.

use std::collections::HashMap;
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Result, StoreError};
use crate::value::CellValue;

/// Column names of one query result, shared by all of its rows.
#[derive(Debug, PartialEq)]
pub(crate) struct RowColumns {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl RowColumns {
    pub(crate) fn new(names: Vec<String>) -> Self {
        let mut positions = HashMap::with_capacity(names.len());
        for (index, name) in names.iter().enumerate() {
            // First occurrence wins for duplicated result names.
            positions.entry(name.clone()).or_insert(index);
        }
        Self { names, positions }
    }
}

/// One result row with name-indexed access.
///
/// ```ignore
/// let row = &rows[0];
/// assert_eq!(row[0], row["type_id"]);
/// for (name, value) in row { println!("{name} = {value}"); }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NamedRow {
    columns: Arc<RowColumns>,
    values: Vec<CellValue>,
}

impl NamedRow {
    pub(crate) fn new(columns: Arc<RowColumns>, values: Vec<CellValue>) -> Self {
        debug_assert_eq!(columns.names.len(), values.len());
        Self { columns, values }
    }

    /// Build a standalone row; `names` and `values` must have equal length.
    pub fn from_parts(names: Vec<String>, values: Vec<CellValue>) -> Self {
        Self::new(Arc::new(RowColumns::new(names)), values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns.names
    }

    pub fn values(&self) -> &[CellValue] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.values.get(index)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&CellValue> {
        self.columns
            .positions
            .get(name)
            .and_then(|index| self.values.get(*index))
    }

    /// Like [`NamedRow::get_by_name`] but reports the missing column.
    pub fn try_get(&self, name: &str) -> Result<&CellValue> {
        self.get_by_name(name)
            .ok_or_else(|| StoreError::UnknownColumn {
                name: name.to_string(),
            })
    }

    /// Integer value of `name`, or `None` when absent or not an integer.
    pub fn i64(&self, name: &str) -> Option<i64> {
        self.get_by_name(name).and_then(CellValue::as_i64)
    }

    /// Text value of `name`, or `None` when absent or not text.
    pub fn str(&self, name: &str) -> Option<&str> {
        self.get_by_name(name).and_then(CellValue::as_str)
    }

    /// `(name, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.columns
            .names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

impl Index<usize> for NamedRow {
    type Output = CellValue;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl Index<&str> for NamedRow {
    type Output = CellValue;

    fn index(&self, name: &str) -> &Self::Output {
        match self.get_by_name(name) {
            Some(value) => value,
            None => panic!("row has no column named {name}"),
        }
    }
}

impl<'a> IntoIterator for &'a NamedRow {
    type Item = (&'a str, &'a CellValue);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a CellValue)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// `Row(id=1, identifier='normal', damage_class_id=NULL)`
impl fmt::Display for NamedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Row(")?;
        for (position, (name, value)) in self.iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            match value {
                CellValue::Null => write!(f, "{name}=NULL")?,
                CellValue::Text(text) => write!(f, "{name}='{text}'")?,
                other => write!(f, "{name}={other}")?,
            }
        }
        f.write_str(")")
    }
}

/// Serializes as a map from column name to value.
impl Serialize for NamedRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NamedRow {
        NamedRow::from_parts(
            vec!["id".to_string(), "identifier".to_string(), "power".to_string()],
            vec![
                CellValue::Integer(33),
                CellValue::Text("tackle".to_string()),
                CellValue::Null,
            ],
        )
    }

    #[test]
    fn index_and_name_access_agree() {
        let row = sample();
        assert_eq!(row[0], row["id"]);
        assert_eq!(row.i64("id"), Some(33));
        assert_eq!(row.str("identifier"), Some("tackle"));
        assert!(row["power"].is_null());
        assert!(row.get_by_name("accuracy").is_none());
        assert!(matches!(
            row.try_get("accuracy"),
            Err(StoreError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn iterates_as_name_value_pairs() {
        let row = sample();
        let names: Vec<&str> = row.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["id", "identifier", "power"]);
        assert_eq!((&row).into_iter().count(), 3);
    }

    #[test]
    fn displays_like_a_record() {
        assert_eq!(
            sample().to_string(),
            "Row(id=33, identifier='tackle', power=NULL)"
        );
    }

    #[test]
    #[should_panic(expected = "row has no column named nope")]
    fn unknown_name_index_panics() {
        let _ = &sample()["nope"];
    }
}
