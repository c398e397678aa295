use anyhow::{Result, bail};
use dexdb_store::{NamedRow, StoreReader};

/// All rows of `table`, in storage order.
pub fn export_table(store: &StoreReader, table: &str) -> Result<Vec<NamedRow>> {
    let tables = store.table_names()?;
    if !tables.iter().any(|name| name == table) {
        bail!("no table named {table} in {}", store.path().display());
    }
    let query = format!(
        "SELECT * FROM {}",
        dexdb_store::sql::quote_identifier(table)
    );
    Ok(store.query(&query, [])?)
}

/// Non-null value of `column` rendered as text.
pub(crate) fn text_of(row: &NamedRow, column: &str) -> Option<String> {
    row.get_by_name(column)
        .filter(|value| !value.is_null())
        .map(ToString::to_string)
}
