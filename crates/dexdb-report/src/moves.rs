//! Moves keyed by identifier.

use std::collections::{BTreeMap, HashMap};

use anyhow::Result;
use dexdb_store::StoreReader;
use serde::Serialize;
use tracing::debug;

use crate::export::text_of;

// Ids from 10000 up are non-standard entries (shadow moves and the like).
const NAMES_SQL: &str = "
    SELECT moves.id AS move_id, moves.identifier, languages.iso3166, move_names.name
    FROM moves
    JOIN move_names ON moves.id = move_names.move_id
    JOIN languages ON move_names.local_language_id = languages.id
    WHERE moves.id < 10000 AND moves.type_id < 10000";

const BASIC_SQL: &str = "
    SELECT
        moves.id AS move_id,
        power, pp, accuracy, priority,
        move_targets.identifier AS target,
        move_damage_classes.identifier AS damage_class,
        types.identifier AS type
    FROM moves
    LEFT JOIN move_targets ON moves.target_id = move_targets.id
    LEFT JOIN move_damage_classes ON moves.damage_class_id = move_damage_classes.id
    LEFT JOIN types ON moves.type_id = types.id
    WHERE moves.id < 10000";

const FLAVOR_TEXT_SQL: &str = "
    SELECT t1.move_id, languages.iso3166, t1.flavor_text
    FROM move_flavor_text AS t1
    JOIN languages ON t1.language_id = languages.id
    LEFT JOIN move_flavor_text AS t2
        ON t1.move_id = t2.move_id
        AND t1.language_id = t2.language_id
        AND t1.version_group_id < t2.version_group_id
    WHERE t2.version_group_id IS NULL";

const EFFECTS_SQL: &str = "
    SELECT moves.id AS move_id, languages.iso3166, move_effect_prose.short_effect
    FROM moves
    JOIN move_effect_prose ON moves.effect_id = move_effect_prose.move_effect_id
    JOIN languages ON move_effect_prose.local_language_id = languages.id
    WHERE moves.id < 10000";

const META_SQL: &str = "
    SELECT
        move_id,
        move_meta_categories.identifier AS meta_category,
        min_hits, max_hits, min_turns, max_turns,
        drain, healing, crit_rate, flinch_chance
    FROM move_meta
    LEFT JOIN move_meta_categories ON move_meta.meta_category_id = move_meta_categories.id
    WHERE move_id < 10000";

const AILMENTS_SQL: &str = "
    SELECT move_id, ailment_chance, move_meta_ailments.identifier AS ailment
    FROM move_meta
    JOIN move_meta_ailments ON move_meta.meta_ailment_id = move_meta_ailments.id
    WHERE move_id < 10000";

const STAT_CHANGES_SQL: &str = "
    SELECT
        move_meta.move_id, stat_chance,
        move_meta_stat_changes.change,
        stats.identifier AS stat
    FROM move_meta
    JOIN move_meta_stat_changes ON move_meta.move_id = move_meta_stat_changes.move_id
    JOIN stats ON move_meta_stat_changes.stat_id = stats.id
    WHERE move_meta.move_id < 10000
    ORDER BY move_meta.move_id, stats.id";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MoveEntry {
    pub name: BTreeMap<String, String>,
    pub flavor_text: BTreeMap<String, String>,
    pub effect: BTreeMap<String, String>,
    pub meta: MoveMeta,
    pub power: Option<i64>,
    pub pp: Option<i64>,
    pub accuracy: Option<i64>,
    pub priority: Option<i64>,
    #[serde(rename = "type")]
    pub move_type: Option<String>,
    pub damage_class: Option<String>,
    pub target: Option<String>,
}

/// Secondary effects. Only what applies to the move is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MoveMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_hits: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_hits: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_turns: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_turns: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drain: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub healing: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crit_rate: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flinch_chance: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ailment: Option<MoveAilment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stat_changes: Option<StatChanges>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveAilment {
    pub ailment: Option<String>,
    pub chance: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatChanges {
    pub chance: i64,
    pub changes: Vec<StatChange>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatChange {
    pub stat: Option<String>,
    pub change: Option<i64>,
}

fn positive(value: Option<i64>) -> Option<i64> {
    value.filter(|v| *v > 0)
}

/// Every standard move with at least one localized name, keyed by identifier.
pub fn export_moves(store: &StoreReader) -> Result<BTreeMap<String, MoveEntry>> {
    let mut moves: HashMap<i64, (String, MoveEntry)> = HashMap::new();

    for row in store.query(NAMES_SQL, [])? {
        let (Some(id), Some(identifier)) = (row.i64("move_id"), text_of(&row, "identifier"))
        else {
            continue;
        };
        let (_, entry) = moves
            .entry(id)
            .or_insert_with(|| (identifier, MoveEntry::default()));
        if let (Some(lang), Some(name)) = (text_of(&row, "iso3166"), text_of(&row, "name")) {
            entry.name.insert(lang, name);
        }
    }

    for row in store.query(BASIC_SQL, [])? {
        let Some((_, entry)) = row.i64("move_id").and_then(|id| moves.get_mut(&id)) else {
            continue;
        };
        entry.power = row.i64("power");
        entry.pp = row.i64("pp");
        entry.accuracy = row.i64("accuracy");
        entry.priority = row.i64("priority");
        entry.move_type = text_of(&row, "type");
        entry.damage_class = text_of(&row, "damage_class");
        entry.target = text_of(&row, "target");
    }

    for row in store.query(FLAVOR_TEXT_SQL, [])? {
        let Some((_, entry)) = row.i64("move_id").and_then(|id| moves.get_mut(&id)) else {
            continue;
        };
        if let (Some(lang), Some(text)) = (text_of(&row, "iso3166"), text_of(&row, "flavor_text"))
        {
            entry.flavor_text.insert(lang, text);
        }
    }

    for row in store.query(EFFECTS_SQL, [])? {
        let Some((_, entry)) = row.i64("move_id").and_then(|id| moves.get_mut(&id)) else {
            continue;
        };
        if let (Some(lang), Some(text)) = (text_of(&row, "iso3166"), text_of(&row, "short_effect"))
        {
            entry.effect.insert(lang, text);
        }
    }

    for row in store.query(META_SQL, [])? {
        let Some((_, entry)) = row.i64("move_id").and_then(|id| moves.get_mut(&id)) else {
            continue;
        };
        let meta = &mut entry.meta;
        meta.category = text_of(&row, "meta_category");
        // Hit and turn ranges are only meaningful as pairs.
        if let (Some(min), Some(max)) = (row.i64("min_hits"), row.i64("max_hits")) {
            meta.min_hits = Some(min);
            meta.max_hits = Some(max);
        }
        if let (Some(min), Some(max)) = (row.i64("min_turns"), row.i64("max_turns")) {
            meta.min_turns = Some(min);
            meta.max_turns = Some(max);
        }
        meta.drain = positive(row.i64("drain"));
        meta.healing = positive(row.i64("healing"));
        meta.crit_rate = positive(row.i64("crit_rate"));
        meta.flinch_chance = positive(row.i64("flinch_chance"));
    }

    for row in store.query(AILMENTS_SQL, [])? {
        let Some((_, entry)) = row.i64("move_id").and_then(|id| moves.get_mut(&id)) else {
            continue;
        };
        if let Some(chance) = positive(row.i64("ailment_chance")) {
            entry.meta.ailment = Some(MoveAilment {
                ailment: text_of(&row, "ailment"),
                chance,
            });
        }
    }

    for row in store.query(STAT_CHANGES_SQL, [])? {
        let Some((_, entry)) = row.i64("move_id").and_then(|id| moves.get_mut(&id)) else {
            continue;
        };
        let Some(chance) = positive(row.i64("stat_chance")) else {
            continue;
        };
        entry
            .meta
            .stat_changes
            .get_or_insert_with(|| StatChanges {
                chance,
                changes: Vec::new(),
            })
            .changes
            .push(StatChange {
                stat: text_of(&row, "stat"),
                change: row.i64("change"),
            });
    }

    debug!(moves = moves.len(), "collected moves");
    Ok(moves.into_values().collect())
}
