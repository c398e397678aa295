//! Type-matchup chart: attackers as rows, defenders as columns.

use std::collections::HashMap;

use anyhow::{Result, ensure};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{ASCII_FULL, UTF8_FULL};
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table};
use dexdb_store::StoreReader;
use tracing::debug;

use crate::export::text_of;

pub const DEFAULT_GENERATION: u8 = 9;
pub const MAX_GENERATION: u8 = 9;
/// English.
pub const DEFAULT_LANGUAGE_ID: i64 = 9;

const TYPES_SQL: &str = "
    SELECT types.id, type_names.name
    FROM types
    JOIN type_names ON type_names.type_id = types.id
    WHERE types.id < 10000
        AND types.generation_id <= ?1
        AND type_names.local_language_id = ?2
    ORDER BY types.id";

// Past efficacies apply to every generation up to and including the one
// recorded on the row.
const EFFICACY_SQL: &str = "
    SELECT te.damage_type_id, te.target_type_id,
        coalesce(tep.damage_factor, te.damage_factor) AS damage_factor
    FROM type_efficacy AS te
    LEFT JOIN (
        SELECT * FROM type_efficacy_past
        WHERE generation_id >= ?1 OR generation_id IS NULL
    ) AS tep
    ON te.damage_type_id = tep.damage_type_id AND te.target_type_id = tep.target_type_id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartType {
    pub id: i64,
    pub name: String,
}

/// Efficacies between the types present in one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeChart {
    pub generation: u8,
    pub types: Vec<ChartType>,
    factors: HashMap<(i64, i64), i64>,
}

impl TypeChart {
    pub fn new(generation: u8, types: Vec<ChartType>, factors: HashMap<(i64, i64), i64>) -> Self {
        Self {
            generation,
            types,
            factors,
        }
    }

    /// Damage factor in percent, e.g. `200` for super effective.
    pub fn factor(&self, attacker: i64, defender: i64) -> Option<i64> {
        self.factors.get(&(attacker, defender)).copied()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChartStyle {
    pub color: bool,
    pub ascii: bool,
}

pub fn load_type_chart(store: &StoreReader, generation: u8, language_id: i64) -> Result<TypeChart> {
    ensure!(
        (1..=MAX_GENERATION).contains(&generation),
        "generation must be between 1 and {MAX_GENERATION}, got {generation}"
    );

    let mut types = Vec::new();
    for row in store.query(TYPES_SQL, [i64::from(generation), language_id])? {
        if let (Some(id), Some(name)) = (row.i64("id"), text_of(&row, "name")) {
            types.push(ChartType { id, name });
        }
    }
    ensure!(
        !types.is_empty(),
        "no types named in language {language_id} for generation {generation}"
    );

    let mut factors = HashMap::new();
    for row in store.query(EFFICACY_SQL, [i64::from(generation)])? {
        if let (Some(attacker), Some(defender), Some(factor)) = (
            row.i64("damage_type_id"),
            row.i64("target_type_id"),
            row.i64("damage_factor"),
        ) {
            factors.insert((attacker, defender), factor);
        }
    }
    debug!(
        generation,
        types = types.len(),
        efficacies = factors.len(),
        "loaded type chart"
    );
    Ok(TypeChart::new(generation, types, factors))
}

pub fn render_type_chart(chart: &TypeChart, style: &ChartStyle) -> String {
    let mut table = Table::new();
    if style.ascii {
        table.load_preset(ASCII_FULL);
    } else {
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS);
    }
    if style.color {
        table.enforce_styling();
    } else {
        table.force_no_tty();
    }

    let mut header = vec![
        Cell::new("Attacker \\ Defender")
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
    ];
    header.extend(chart.types.iter().map(|defender| {
        Cell::new(abbreviate(&defender.name))
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold)
            .set_alignment(CellAlignment::Center)
    }));
    table.set_header(header);

    for attacker in &chart.types {
        let mut row = vec![Cell::new(&attacker.name).add_attribute(Attribute::Bold)];
        row.extend(
            chart
                .types
                .iter()
                .map(|defender| efficacy_cell(chart.factor(attacker.id, defender.id), style.ascii)),
        );
        table.add_row(row);
    }
    table.to_string()
}

fn abbreviate(name: &str) -> String {
    name.chars().take(3).collect()
}

fn efficacy_cell(factor: Option<i64>, ascii: bool) -> Cell {
    let cell = match factor {
        Some(0) => Cell::new("0").add_attribute(Attribute::Bold),
        Some(50) => Cell::new(if ascii { "1/2" } else { "½" })
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Some(100) | None => Cell::new(""),
        Some(200) => Cell::new("2")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        Some(other) => Cell::new(format!("{other}%")),
    };
    cell.set_alignment(CellAlignment::Center)
}
