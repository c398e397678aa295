//! Pokédex entries keyed by species identifier.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use anyhow::Result;
use dexdb_store::{NamedRow, Params, StoreReader};
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use tracing::debug;

use crate::export::text_of;

pub const NATIONAL_DEX_ID: i64 = 1;

const LEVEL_UP_METHOD: &str = "level-up";

const BASIC_SQL: &str = "
    SELECT
        p.species_id AS pokemon_id, p.identifier, ps.\"order\" AS sort_order,
        p.height, p.weight, p.base_experience, ps.base_happiness,
        ps.hatch_counter, ps.capture_rate, ps.gender_rate,
        ps.is_baby, ps.is_legendary, ps.is_mythical,
        pokemon_habitats.identifier AS habitat,
        growth_rates.identifier AS growth_rate
    FROM pokemon AS p
    JOIN pokemon_species AS ps ON p.species_id = ps.id
    LEFT JOIN pokemon_habitats ON ps.habitat_id = pokemon_habitats.id
    LEFT JOIN growth_rates ON ps.growth_rate_id = growth_rates.id
    WHERE p.species_id < 10000 AND p.id < 10000";

const NAMES_SQL: &str = "
    SELECT pokemon_species_id AS pokemon_id, languages.iso3166, name, genus
    FROM pokemon_species_names
    JOIN languages ON pokemon_species_names.local_language_id = languages.id";

const DEX_NUMBERS_SQL: &str = "
    SELECT species_id AS pokemon_id, pokedex_number
    FROM pokemon_dex_numbers
    WHERE pokedex_id = ?1";

const FLAVOR_TEXT_SQL: &str = "
    SELECT species_id AS pokemon_id, languages.iso3166, flavor_text
    FROM pokemon_species_flavor_text
    JOIN languages ON pokemon_species_flavor_text.language_id = languages.id";

const TYPES_SQL: &str = "
    SELECT pokemon_types.pokemon_id, types.identifier AS type
    FROM pokemon_types
    JOIN types ON pokemon_types.type_id = types.id
    WHERE pokemon_types.pokemon_id < 10000
    ORDER BY pokemon_types.pokemon_id, pokemon_types.slot";

const STATS_SQL: &str = "
    SELECT pokemon_id, stats.identifier AS stat, base_stat, effort
    FROM pokemon_stats
    JOIN stats ON pokemon_stats.stat_id = stats.id
    WHERE pokemon_id < 10000
    ORDER BY pokemon_id, stats.id";

const ABILITIES_SQL: &str = "
    SELECT pokemon_abilities.pokemon_id, abilities.identifier AS ability, is_hidden
    FROM pokemon_abilities
    JOIN abilities ON pokemon_abilities.ability_id = abilities.id
    WHERE pokemon_abilities.pokemon_id < 10000 AND pokemon_abilities.slot BETWEEN 1 AND 3
    ORDER BY pokemon_abilities.pokemon_id, pokemon_abilities.slot";

const EGG_GROUPS_SQL: &str = "
    SELECT species_id AS pokemon_id, egg_groups.identifier AS egg_group
    FROM pokemon_egg_groups
    JOIN egg_groups ON pokemon_egg_groups.egg_group_id = egg_groups.id
    WHERE species_id < 10000
    ORDER BY species_id, egg_groups.id";

// Only the moveset of each pokemon's latest version group.
const MOVES_SQL: &str = "
    SELECT
        pm.pokemon_id,
        m.identifier AS move,
        pmm.identifier AS move_method,
        CASE WHEN pmm.identifier = 'level-up' THEN pm.level END AS level
    FROM pokemon_moves AS pm
    JOIN (
        SELECT pokemon_id, MAX(version_group_id) AS latest
        FROM pokemon_moves
        GROUP BY pokemon_id
    ) AS ver
    ON pm.pokemon_id = ver.pokemon_id AND pm.version_group_id = ver.latest
    JOIN moves AS m ON pm.move_id = m.id
    JOIN pokemon_move_methods AS pmm ON pm.pokemon_move_method_id = pmm.id
    WHERE pm.pokemon_id < 10000
    ORDER BY pm.pokemon_id, pm.level, m.id";

const EVOLVES_FROM_SQL: &str = "
    SELECT ps1.id AS pokemon_id, ps2.identifier AS evolves_from
    FROM pokemon_species AS ps1
    JOIN pokemon_species AS ps2 ON ps1.evolves_from_species_id = ps2.id
    WHERE ps1.id < 10000";

const EVOLVES_TO_SQL: &str = "
    SELECT
        ps.evolves_from_species_id AS pokemon_id,
        ps.identifier AS evolves_to,
        et.identifier AS evolution_trigger,
        pe.minimum_level,
        pe.minimum_happiness, pe.minimum_affection, pe.minimum_beauty,
        pe.time_of_day, pe.relative_physical_stats,
        pe.needs_overworld_rain, pe.turn_upside_down,
        ti.identifier AS trigger_item,
        hi.identifier AS held_item,
        km.identifier AS known_move,
        kt.identifier AS known_move_type,
        g.identifier AS gender,
        l.identifier AS location,
        r.identifier AS location_region,
        party_species.identifier AS party_species,
        party_type.identifier AS party_type,
        trade_species.identifier AS trade_species
    FROM pokemon_evolution AS pe
    JOIN pokemon_species AS ps ON pe.evolved_species_id = ps.id
    JOIN evolution_triggers AS et ON pe.evolution_trigger_id = et.id
    LEFT JOIN items AS ti ON pe.trigger_item_id = ti.id
    LEFT JOIN items AS hi ON pe.held_item_id = hi.id
    LEFT JOIN moves AS km ON pe.known_move_id = km.id
    LEFT JOIN types AS kt ON pe.known_move_type_id = kt.id
    LEFT JOIN genders AS g ON pe.gender_id = g.id
    LEFT JOIN locations AS l ON pe.location_id = l.id
    LEFT JOIN regions AS r ON l.region_id = r.id
    LEFT JOIN pokemon_species AS party_species ON pe.party_species_id = party_species.id
    LEFT JOIN types AS party_type ON pe.party_type_id = party_type.id
    LEFT JOIN pokemon_species AS trade_species ON pe.trade_species_id = trade_species.id
    WHERE ps.id < 10000
    ORDER BY pe.id";

/// Stat identifier → value, in stat order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatLine(Vec<(String, i64)>);

impl StatLine {
    pub fn get(&self, stat: &str) -> Option<i64> {
        self.0
            .iter()
            .find(|(name, _)| name == stat)
            .map(|(_, value)| *value)
    }

    pub fn total(&self) -> i64 {
        self.0.iter().map(|(_, value)| value).sum()
    }

    fn push(&mut self, stat: String, value: i64) {
        self.0.push((stat, value));
    }
}

impl Serialize for StatLine {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (stat, value) in &self.0 {
            map.serialize_entry(stat, value)?;
        }
        map.end()
    }
}

/// Base stats followed by their sum under `total`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseStats(pub StatLine);

impl Serialize for BaseStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.0.len() + 1))?;
        for (stat, value) in &self.0.0 {
            map.serialize_entry(stat, value)?;
        }
        map.serialize_entry("total", &self.0.total())?;
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbilitySlot {
    pub ability: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_hidden: Option<i64>,
}

/// Level-up moves by level, other learn methods as lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Moveset {
    #[serde(rename = "level-up")]
    pub level_up: BTreeMap<i64, String>,
    #[serde(flatten)]
    pub other: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvolutionLocation {
    pub location: String,
    pub region: Option<String>,
}

/// One way to evolve into `pokemon`. Conditions that do not apply are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Evolution {
    pub pokemon: Option<String>,
    pub trigger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_level: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_happiness: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_affection: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_beauty: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_physical_stats: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub during_overworld_rain: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hold_device_upside_down: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub held_item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub known_move: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub known_move_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<EvolutionLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pokemon_in_party: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_in_party: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_for: Option<String>,
}

impl Evolution {
    fn from_row(row: &NamedRow) -> Self {
        let text = |column: &str| text_of(row, column).filter(|value| !value.is_empty());
        let flag = |column: &str| (row.i64(column) == Some(1)).then_some(true);
        Self {
            pokemon: text("evolves_to"),
            trigger: text("evolution_trigger"),
            minimum_level: row.i64("minimum_level"),
            minimum_happiness: row.i64("minimum_happiness"),
            minimum_affection: row.i64("minimum_affection"),
            minimum_beauty: row.i64("minimum_beauty"),
            time_of_day: text("time_of_day"),
            relative_physical_stats: row.i64("relative_physical_stats"),
            during_overworld_rain: flag("needs_overworld_rain"),
            hold_device_upside_down: flag("turn_upside_down"),
            trigger_item: text("trigger_item"),
            held_item: text("held_item"),
            known_move: text("known_move"),
            known_move_type: text("known_move_type"),
            gender: text("gender"),
            location: text("location").map(|location| EvolutionLocation {
                location,
                region: text("location_region"),
            }),
            pokemon_in_party: text("party_species"),
            type_in_party: text("party_type"),
            trade_for: text("trade_species"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PokedexEntry {
    pub national_dex_number: Option<i64>,
    pub sort_order: Option<i64>,
    pub name: BTreeMap<String, String>,
    pub genus: BTreeMap<String, String>,
    /// Distinct texts per language, whitespace-normalized.
    pub flavor_text: BTreeMap<String, BTreeSet<String>>,
    #[serde(rename = "type")]
    pub types: Option<Vec<String>>,
    pub abilities: Option<Vec<AbilitySlot>>,
    pub base_stats: BaseStats,
    pub effort_values: StatLine,
    pub moves: Moveset,
    pub evolves_from: Option<String>,
    pub evolves_to: Vec<Evolution>,
    pub base_experience: Option<i64>,
    pub height: Option<i64>,
    pub weight: Option<i64>,
    pub gender_rate: Option<i64>,
    pub capture_rate: Option<i64>,
    pub base_happiness: Option<i64>,
    pub hatch_counter: Option<i64>,
    pub egg_groups: Vec<String>,
    pub is_baby: Option<i64>,
    pub is_legendary: Option<i64>,
    pub is_mythical: Option<i64>,
    pub habitat: Option<String>,
    pub growth_rate: Option<String>,
}

impl PokedexEntry {
    fn from_basic_row(row: &NamedRow) -> Self {
        Self {
            sort_order: row.i64("sort_order"),
            base_experience: row.i64("base_experience"),
            height: row.i64("height"),
            weight: row.i64("weight"),
            gender_rate: row.i64("gender_rate"),
            capture_rate: row.i64("capture_rate"),
            base_happiness: row.i64("base_happiness"),
            hatch_counter: row.i64("hatch_counter"),
            is_baby: row.i64("is_baby"),
            is_legendary: row.i64("is_legendary"),
            is_mythical: row.i64("is_mythical"),
            habitat: text_of(row, "habitat"),
            growth_rate: text_of(row, "growth_rate"),
            ..Self::default()
        }
    }
}

/// Game text uses line feeds and form feeds as soft breaks.
fn clean_flavor_text(text: &str) -> String {
    text.replace(['\n', '\u{c}'], " ")
}

/// Every standard species, keyed by identifier.
pub fn export_pokedex(store: &StoreReader) -> Result<BTreeMap<String, PokedexEntry>> {
    let mut dex: HashMap<i64, (String, PokedexEntry)> = HashMap::new();

    for row in store.query(BASIC_SQL, [])? {
        let (Some(id), Some(identifier)) = (row.i64("pokemon_id"), text_of(&row, "identifier"))
        else {
            continue;
        };
        dex.entry(id)
            .or_insert_with(|| (identifier, PokedexEntry::from_basic_row(&row)));
    }

    fill(store, &mut dex, NAMES_SQL, [], |row, entry| {
        let Some(lang) = text_of(row, "iso3166") else {
            return;
        };
        if let Some(name) = text_of(row, "name") {
            entry.name.insert(lang.clone(), name);
        }
        if let Some(genus) = text_of(row, "genus").filter(|genus| !genus.is_empty()) {
            entry.genus.insert(lang, genus);
        }
    })?;

    fill(store, &mut dex, DEX_NUMBERS_SQL, [NATIONAL_DEX_ID], |row, entry| {
        entry.national_dex_number = row.i64("pokedex_number");
    })?;

    fill(store, &mut dex, FLAVOR_TEXT_SQL, [], |row, entry| {
        if let (Some(lang), Some(text)) = (text_of(row, "iso3166"), row.str("flavor_text")) {
            entry
                .flavor_text
                .entry(lang)
                .or_default()
                .insert(clean_flavor_text(text));
        }
    })?;

    fill(store, &mut dex, TYPES_SQL, [], |row, entry| {
        if let Some(name) = text_of(row, "type") {
            entry.types.get_or_insert_with(Vec::new).push(name);
        }
    })?;

    fill(store, &mut dex, STATS_SQL, [], |row, entry| {
        let Some(stat) = text_of(row, "stat") else {
            return;
        };
        if let Some(base) = row.i64("base_stat") {
            entry.base_stats.0.push(stat.clone(), base);
        }
        if let Some(effort) = row.i64("effort").filter(|effort| *effort != 0) {
            entry.effort_values.push(stat, effort);
        }
    })?;

    fill(store, &mut dex, ABILITIES_SQL, [], |row, entry| {
        if let Some(ability) = text_of(row, "ability") {
            entry.abilities.get_or_insert_with(Vec::new).push(AbilitySlot {
                ability,
                is_hidden: row.i64("is_hidden").filter(|hidden| *hidden != 0),
            });
        }
    })?;

    fill(store, &mut dex, EGG_GROUPS_SQL, [], |row, entry| {
        if let Some(group) = text_of(row, "egg_group") {
            entry.egg_groups.push(group);
        }
    })?;

    fill(store, &mut dex, MOVES_SQL, [], |row, entry| {
        let (Some(name), Some(method)) = (text_of(row, "move"), text_of(row, "move_method")) else {
            return;
        };
        if method == LEVEL_UP_METHOD {
            if let Some(level) = row.i64("level") {
                entry.moves.level_up.insert(level, name);
            }
        } else {
            entry.moves.other.entry(method).or_default().push(name);
        }
    })?;

    fill(store, &mut dex, EVOLVES_FROM_SQL, [], |row, entry| {
        entry.evolves_from = text_of(row, "evolves_from");
    })?;

    fill(store, &mut dex, EVOLVES_TO_SQL, [], |row, entry| {
        entry.evolves_to.push(Evolution::from_row(row));
    })?;

    debug!(species = dex.len(), "collected pokedex");
    Ok(dex.into_values().collect())
}

/// Run `sql` and hand each row to the entry named by its `pokemon_id`.
fn fill<P: Params>(
    store: &StoreReader,
    dex: &mut HashMap<i64, (String, PokedexEntry)>,
    sql: &str,
    params: P,
    mut apply: impl FnMut(&NamedRow, &mut PokedexEntry),
) -> Result<()> {
    for row in store.query(sql, params)? {
        if let Some((_, entry)) = row.i64("pokemon_id").and_then(|id| dex.get_mut(&id)) {
            apply(&row, entry);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flavor_text_breaks_become_spaces() {
        assert_eq!(
            clean_flavor_text("A strange seed was\nplanted on its\u{c}back at birth."),
            "A strange seed was planted on its back at birth."
        );
    }

    #[test]
    fn base_stats_end_with_total() {
        let mut stats = StatLine::default();
        stats.push("hp".to_string(), 45);
        stats.push("attack".to_string(), 49);
        assert_eq!(stats.get("attack"), Some(49));
        let json = serde_json::to_string(&BaseStats(stats)).unwrap();
        assert_eq!(json, r#"{"hp":45,"attack":49,"total":94}"#);
    }

    #[test]
    fn moveset_flattens_other_methods() {
        let mut moves = Moveset::default();
        moves.level_up.insert(1, "tackle".to_string());
        moves
            .other
            .insert("machine".to_string(), vec!["toxic".to_string()]);
        let json = serde_json::to_string(&moves).unwrap();
        assert_eq!(json, r#"{"level-up":{"1":"tackle"},"machine":["toxic"]}"#);
    }
}
