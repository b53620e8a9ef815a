//! Read-only view of one addon record inside a catalog document.

use serde_json::Value;

/// Fields of an addon record that the synchronizer looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddonRecord {
    /// Position in the normalized record sequence.
    pub index: usize,
    /// `manifest.name`, when present.
    pub name: Option<String>,
    /// `manifest.version`, when present.
    pub version: Option<String>,
    /// `transportUrl`; `None` when missing, empty, or not a string.
    pub transport_url: Option<String>,
}

impl AddonRecord {
    pub(crate) fn from_value(index: usize, value: &Value) -> Self {
        let manifest = value.get("manifest");
        let name = manifest
            .and_then(|m| m.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string);
        let version = manifest
            .and_then(|m| m.get("version"))
            .and_then(Value::as_str)
            .map(str::to_string);
        let transport_url = value
            .get("transportUrl")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Self {
            index,
            name,
            version,
            transport_url,
        }
    }

    /// Label for status lines: the manifest name, else the URL, else a placeholder.
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.transport_url.as_deref())
            .unwrap_or("addon with no name")
    }
}
