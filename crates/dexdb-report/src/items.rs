//! Items keyed by identifier.

use std::collections::{BTreeMap, HashMap};

use anyhow::Result;
use dexdb_store::StoreReader;
use serde::Serialize;

use crate::export::text_of;

const NAMES_SQL: &str = "
    SELECT item_names.item_id, items.identifier, languages.iso3166, item_names.name
    FROM items
    JOIN item_names ON items.id = item_names.item_id
    JOIN languages ON item_names.local_language_id = languages.id
    ORDER BY item_names.item_id";

const CATEGORIES_SQL: &str = "
    SELECT items.id, item_categories.identifier
    FROM items
    JOIN item_categories ON items.category_id = item_categories.id";

// Only the flavor text from the latest version group per item and language.
const FLAVOR_TEXT_SQL: &str = "
    SELECT t1.item_id, languages.iso3166, t1.flavor_text
    FROM item_flavor_text AS t1
    JOIN languages ON t1.language_id = languages.id
    LEFT JOIN item_flavor_text AS t2
        ON t1.item_id = t2.item_id
        AND t1.language_id = t2.language_id
        AND t1.version_group_id < t2.version_group_id
    WHERE t2.version_group_id IS NULL";

const EFFECTS_SQL: &str = "
    SELECT item_prose.item_id, languages.iso3166, item_prose.short_effect
    FROM item_prose
    JOIN languages ON item_prose.local_language_id = languages.id";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ItemEntry {
    pub category: Option<String>,
    pub name: BTreeMap<String, String>,
    pub flavor_text: BTreeMap<String, String>,
    pub effect: BTreeMap<String, String>,
}

/// Every item with at least one localized name, keyed by identifier.
pub fn export_items(store: &StoreReader) -> Result<BTreeMap<String, ItemEntry>> {
    let mut items: HashMap<i64, (String, ItemEntry)> = HashMap::new();

    for row in store.query(NAMES_SQL, [])? {
        let (Some(id), Some(identifier)) = (row.i64("item_id"), text_of(&row, "identifier"))
        else {
            continue;
        };
        let (_, entry) = items
            .entry(id)
            .or_insert_with(|| (identifier, ItemEntry::default()));
        if let (Some(lang), Some(name)) = (text_of(&row, "iso3166"), text_of(&row, "name")) {
            entry.name.insert(lang, name);
        }
    }

    for row in store.query(CATEGORIES_SQL, [])? {
        if let Some((_, entry)) = row.i64("id").and_then(|id| items.get_mut(&id)) {
            entry.category = text_of(&row, "identifier");
        }
    }

    for row in store.query(FLAVOR_TEXT_SQL, [])? {
        let Some((_, entry)) = row.i64("item_id").and_then(|id| items.get_mut(&id)) else {
            continue;
        };
        if let (Some(lang), Some(text)) = (text_of(&row, "iso3166"), text_of(&row, "flavor_text"))
        {
            entry.flavor_text.insert(lang, text);
        }
    }

    for row in store.query(EFFECTS_SQL, [])? {
        let Some((_, entry)) = row.i64("item_id").and_then(|id| items.get_mut(&id)) else {
            continue;
        };
        if let (Some(lang), Some(text)) = (text_of(&row, "iso3166"), text_of(&row, "short_effect"))
        {
            entry.effect.insert(lang, text);
        }
    }

    tracing::debug!(items = items.len(), "collected items");
    Ok(items.into_values().collect())
}
