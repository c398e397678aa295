use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store already exists: {path} (use --overwrite to replace it)")]
    AlreadyExists { path: PathBuf },

    #[error("failed to remove existing store {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open store {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("store {path} is not available ({reason}); did you forget to run `dexdb build`?")]
    Unavailable { path: PathBuf, reason: String },

    #[error("{context}: {source}")]
    Sql {
        context: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("row has no column named {name}")]
    UnknownColumn { name: String },
}

impl StoreError {
    pub(crate) fn sql(context: impl Into<String>, source: rusqlite::Error) -> Self {
        Self::Sql {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
