//! Reports over an imported store.
//!
//! - **Table export**: every row of one table as JSON objects
//! - **Items / Moves / Types**: per-identifier JSON documents with localized
//!   names
//! - **Pokédex**: one document per species with stats, moves and evolutions
//! - **Type chart**: attacker × defender efficacy matrix for a generation
//!
//! Every report reads through a [`dexdb_store::StoreReader`], so the store is
//! never modified.

mod export;
mod items;
mod json;
mod matchup;
mod moves;
mod pokedex;
mod types;

pub use export::export_table;
pub use items::{ItemEntry, export_items};
pub use json::to_json_string;
pub use matchup::{
    ChartStyle, ChartType, DEFAULT_GENERATION, DEFAULT_LANGUAGE_ID, MAX_GENERATION, TypeChart,
    load_type_chart, render_type_chart,
};
pub use moves::{MoveAilment, MoveEntry, MoveMeta, StatChange, StatChanges, export_moves};
pub use pokedex::{
    AbilitySlot, BaseStats, Evolution, EvolutionLocation, Moveset, NATIONAL_DEX_ID, PokedexEntry,
    StatLine, export_pokedex,
};
pub use types::{TypeEntry, export_types};
