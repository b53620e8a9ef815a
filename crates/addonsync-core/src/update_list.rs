//! Update list: which catalog files a run should sync.
//!
//! The list is a JSON array. Each entry is either a bare path string or an
//! object `{ "file": "<path>", "enabled": <bool> }`; a missing `enabled`
//! counts as enabled. Paths are resolved against the list file's directory.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListEntry {
    Path(String),
    Entry {
        file: String,
        #[serde(default)]
        enabled: Option<bool>,
    },
}

impl ListEntry {
    fn into_enabled_path(self) -> Option<String> {
        match self {
            ListEntry::Path(file) => Some(file),
            ListEntry::Entry { file, enabled } => enabled.unwrap_or(true).then_some(file),
        }
    }
}

/// Parse list text and return the enabled catalog paths, resolved against `base_dir`.
pub fn parse_update_list(text: &str, base_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries: Vec<ListEntry> = serde_json::from_str(text).context("parse update list")?;
    Ok(entries
        .into_iter()
        .filter_map(ListEntry::into_enabled_path)
        .map(|file| base_dir.join(file))
        .collect())
}

/// Read the update list at `path`. Failing to read or parse it is the one
/// error that ends a whole run.
pub fn load_update_list(path: &Path) -> Result<Vec<PathBuf>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read update list {}", path.display()))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let files = parse_update_list(&text, base_dir)
        .with_context(|| format!("invalid update list {}", path.display()))?;
    tracing::debug!(list = %path.display(), count = files.len(), "loaded update list");
    Ok(files)
}
