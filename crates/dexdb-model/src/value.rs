//! Cell classification kinds and per-column tallies.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind a single raw cell is classified as.
///
/// Every cell falls into exactly one kind. Absent cells (rows shorter than the
/// header) are classified the same way as empty strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// Empty or absent cell.
    Null,
    /// Optional `-` followed by one or more ASCII digits.
    Integer,
    /// Decimal number with a `.` (`123.`, `.5`, `-0.25`); no exponent.
    Real,
    /// Anything else.
    Text,
}

impl ValueKind {
    pub const ALL: [ValueKind; 4] = [
        ValueKind::Null,
        ValueKind::Integer,
        ValueKind::Real,
        ValueKind::Text,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "NULL",
            ValueKind::Integer => "INTEGER",
            ValueKind::Real => "REAL",
            ValueKind::Text => "TEXT",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Occurrence counts of each [`ValueKind`] across every row of one column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationTally {
    pub null: usize,
    pub integer: usize,
    pub real: usize,
    pub text: usize,
}

impl ClassificationTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tally from an iterator of already-classified cells.
    pub fn from_kinds<I>(kinds: I) -> Self
    where
        I: IntoIterator<Item = ValueKind>,
    {
        let mut tally = Self::new();
        for kind in kinds {
            tally.record(kind);
        }
        tally
    }

    pub fn record(&mut self, kind: ValueKind) {
        match kind {
            ValueKind::Null => self.null += 1,
            ValueKind::Integer => self.integer += 1,
            ValueKind::Real => self.real += 1,
            ValueKind::Text => self.text += 1,
        }
    }

    pub fn count(&self, kind: ValueKind) -> usize {
        match kind {
            ValueKind::Null => self.null,
            ValueKind::Integer => self.integer,
            ValueKind::Real => self.real,
            ValueKind::Text => self.text,
        }
    }

    /// Number of cells observed.
    pub fn total(&self) -> usize {
        self.null + self.integer + self.real + self.text
    }
}
