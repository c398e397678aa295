//! Configuration options for table imports.

use serde::{Deserialize, Serialize};

/// Options controlling how source tables are turned into target tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOptions {
    /// Rewrite `[display]{ns:ref}` markup in TEXT columns to plain text.
    pub scrub_text: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self { scrub_text: true }
    }
}

impl ImportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store TEXT values exactly as they appear in the source.
    pub fn raw() -> Self {
        Self { scrub_text: false }
    }

    #[must_use]
    pub fn with_scrub_text(mut self, enable: bool) -> Self {
        self.scrub_text = enable;
        self
    }
}
