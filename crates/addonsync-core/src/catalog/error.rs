//! Errors that abort processing of a single catalog file.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not find addons in {path}")]
    UnrecognizedShape { path: PathBuf },

    #[error("failed to write {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    /// Short machine-friendly label, used in logs and the CLI summary.
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogError::Read { .. } => "read",
            CatalogError::Parse { .. } => "parse",
            CatalogError::UnrecognizedShape { .. } => "shape",
            CatalogError::Persist { .. } => "persist",
        }
    }
}
