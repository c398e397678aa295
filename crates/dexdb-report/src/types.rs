//! Standard types keyed by identifier, with their offensive matchups.

use std::collections::{BTreeMap, HashMap};

use anyhow::Result;
use dexdb_store::StoreReader;
use serde::Serialize;

use crate::export::text_of;

const NAMES_SQL: &str = "
    SELECT type_names.type_id, types.identifier, languages.iso3166, type_names.name
    FROM types
    JOIN type_names ON types.id = type_names.type_id
    JOIN languages ON type_names.local_language_id = languages.id
    WHERE type_names.type_id < 10000
    ORDER BY type_names.type_id";

const EFFICACY_SQL: &str = "
    SELECT damage_type_id, target_type_id, damage_factor
    FROM type_efficacy
    ORDER BY damage_type_id, target_type_id";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TypeEntry {
    pub name: BTreeMap<String, String>,
    pub super_effective: Vec<String>,
    pub not_very_effective: Vec<String>,
    pub no_effect: Vec<String>,
}

pub fn export_types(store: &StoreReader) -> Result<BTreeMap<String, TypeEntry>> {
    let mut types: HashMap<i64, (String, TypeEntry)> = HashMap::new();

    for row in store.query(NAMES_SQL, [])? {
        let (Some(id), Some(identifier)) = (row.i64("type_id"), text_of(&row, "identifier"))
        else {
            continue;
        };
        let (_, entry) = types
            .entry(id)
            .or_insert_with(|| (identifier, TypeEntry::default()));
        if let (Some(lang), Some(name)) = (text_of(&row, "iso3166"), text_of(&row, "name")) {
            entry.name.insert(lang, name);
        }
    }

    for row in store.query(EFFICACY_SQL, [])? {
        let (Some(damage), Some(target), Some(factor)) = (
            row.i64("damage_type_id"),
            row.i64("target_type_id"),
            row.i64("damage_factor"),
        ) else {
            continue;
        };
        // Matchups against non-standard types are not reported.
        let Some(target_identifier) = types.get(&target).map(|(identifier, _)| identifier.clone())
        else {
            continue;
        };
        let Some((_, entry)) = types.get_mut(&damage) else {
            continue;
        };
        match factor {
            0 => entry.no_effect.push(target_identifier),
            50 => entry.not_very_effective.push(target_identifier),
            200 => entry.super_effective.push(target_identifier),
            _ => {}
        }
    }

    Ok(types.into_values().collect())
}
