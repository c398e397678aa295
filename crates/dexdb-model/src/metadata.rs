//! Run metadata written once per import run.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Name of the key/value table holding run metadata.
pub const METADATA_TABLE: &str = "__metadata";

/// Recorded when a revision cannot be determined.
pub const UNKNOWN_REVISION: &str = "unknown";

/// Keys stored in the metadata table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKey {
    CreatedAt,
    DatasetRevision,
    ImporterRevision,
}

impl MetadataKey {
    pub const ALL: [MetadataKey; 3] = [
        MetadataKey::CreatedAt,
        MetadataKey::DatasetRevision,
        MetadataKey::ImporterRevision,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataKey::CreatedAt => "created_at",
            MetadataKey::DatasetRevision => "pokeapi_git_sha",
            MetadataKey::ImporterRevision => "pokeapi_sqlite_git_sha",
        }
    }
}

/// Process-wide metadata for one import run. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// RFC 3339 UTC timestamp.
    pub created_at: String,
    pub dataset_revision: String,
    pub importer_revision: String,
}

impl RunMetadata {
    pub fn new(
        created_at: DateTime<Utc>,
        dataset_revision: impl Into<String>,
        importer_revision: impl Into<String>,
    ) -> Self {
        Self {
            created_at: created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            dataset_revision: dataset_revision.into(),
            importer_revision: importer_revision.into(),
        }
    }

    /// Metadata stamped with the current time.
    pub fn now(dataset_revision: impl Into<String>, importer_revision: impl Into<String>) -> Self {
        Self::new(Utc::now(), dataset_revision, importer_revision)
    }

    pub fn get(&self, key: MetadataKey) -> &str {
        match key {
            MetadataKey::CreatedAt => &self.created_at,
            MetadataKey::DatasetRevision => &self.dataset_revision,
            MetadataKey::ImporterRevision => &self.importer_revision,
        }
    }

    /// Key/value pairs in insertion order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        MetadataKey::ALL
            .iter()
            .map(|key| (key.as_str(), self.get(*key)))
            .collect()
    }
}
