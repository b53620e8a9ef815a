//! Catalog loading and normalization.
//!
//! A catalog is a JSON document holding addon records in one of three
//! layouts: `{ "result": { "addons": ... } }`, `{ "addons": [...] }` or
//! `{ "addons": { "<key>": record } }`. Whatever the layout, the records are
//! exposed as one ordered sequence. The original text is kept alongside the
//! parsed document so the patch policy can edit it in place.

mod error;
mod record;

pub use error::CatalogError;
pub use record::AddonRecord;

use serde_json::Value;
use std::path::{Path, PathBuf};

/// Where the addon collection lives inside the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogShape {
    /// `result.addons` (the collection API response layout).
    ResultAddons,
    /// Top-level `addons`.
    Addons,
}

impl CatalogShape {
    fn detect(document: &Value) -> Option<Self> {
        if document
            .get("result")
            .and_then(|r| r.get("addons"))
            .is_some_and(is_collection)
        {
            return Some(CatalogShape::ResultAddons);
        }
        if document.get("addons").is_some_and(is_collection) {
            return Some(CatalogShape::Addons);
        }
        None
    }
}

fn is_collection(value: &Value) -> bool {
    value.is_array() || value.is_object()
}

/// A loaded catalog file: original text plus parsed document.
#[derive(Debug, Clone)]
pub struct Catalog {
    path: PathBuf,
    raw: String,
    document: Value,
    shape: CatalogShape,
}

impl Catalog {
    /// Read and parse the catalog at `path`.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, raw)
    }

    /// Parse catalog text that was already read from `path`.
    pub fn parse(path: &Path, raw: String) -> Result<Self, CatalogError> {
        let document: Value = serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let shape = CatalogShape::detect(&document).ok_or_else(|| {
            CatalogError::UnrecognizedShape {
                path: path.to_path_buf(),
            }
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            raw,
            document,
            shape,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Text exactly as read from disk.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn shape(&self) -> CatalogShape {
        self.shape
    }

    fn collection(&self) -> Option<&Value> {
        match self.shape {
            CatalogShape::ResultAddons => self.document.get("result")?.get("addons"),
            CatalogShape::Addons => self.document.get("addons"),
        }
    }

    fn collection_mut(&mut self) -> Option<&mut Value> {
        match self.shape {
            CatalogShape::ResultAddons => self.document.get_mut("result")?.get_mut("addons"),
            CatalogShape::Addons => self.document.get_mut("addons"),
        }
    }

    /// Raw record values in document order (array items or keyed-object values).
    pub fn record_values(&self) -> Vec<&Value> {
        match self.collection() {
            Some(Value::Array(items)) => items.iter().collect(),
            Some(Value::Object(map)) => map.values().collect(),
            _ => Vec::new(),
        }
    }

    /// All addon records, normalized to one ordered sequence.
    pub fn records(&self) -> Vec<AddonRecord> {
        self.record_values()
            .into_iter()
            .enumerate()
            .map(|(i, v)| AddonRecord::from_value(i, v))
            .collect()
    }

    /// Replace the whole `manifest` of record `index`. Returns false if the
    /// index is out of range or the record is not an object.
    pub fn replace_manifest(&mut self, index: usize, manifest: Value) -> bool {
        let record = match self.collection_mut() {
            Some(Value::Array(items)) => items.get_mut(index),
            Some(Value::Object(map)) => map.values_mut().nth(index),
            _ => None,
        };
        match record.and_then(Value::as_object_mut) {
            Some(obj) => {
                obj.insert("manifest".to_string(), manifest);
                true
            }
            None => false,
        }
    }

    /// Pretty-printed document (two-space indent, original key order).
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(text: &str) -> Result<Catalog, CatalogError> {
        Catalog::parse(Path::new("catalog.json"), text.to_string())
    }

    #[test]
    fn result_addons_shape() {
        let c = parse(
            r#"{"result":{"addons":[
                {"transportUrl":"http://a/manifest.json","manifest":{"name":"A","version":"1.0.0"}},
                {"manifest":{"name":"B","version":"2.0.0"}}
            ]}}"#,
        )
        .unwrap();
        assert_eq!(c.shape(), CatalogShape::ResultAddons);
        let records = c.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name.as_deref(), Some("A"));
        assert!(records[1].transport_url.is_none());
    }

    #[test]
    fn addons_array_shape() {
        let c = parse(r#"{"addons":[{"transportUrl":"http://a","manifest":{"name":"A"}}]}"#)
            .unwrap();
        assert_eq!(c.shape(), CatalogShape::Addons);
        assert_eq!(c.records().len(), 1);
    }

    #[test]
    fn addons_map_shape_keeps_document_order() {
        let c = parse(
            r#"{"addons":{
                "zeta":{"manifest":{"name":"Z"}},
                "alpha":{"manifest":{"name":"A"}}
            }}"#,
        )
        .unwrap();
        let names: Vec<_> = c.records().into_iter().map(|r| r.name.unwrap()).collect();
        assert_eq!(names, vec!["Z", "A"]);
    }

    #[test]
    fn result_without_addons_falls_back_to_top_level() {
        let c = parse(r#"{"result":{},"addons":[]}"#).unwrap();
        assert_eq!(c.shape(), CatalogShape::Addons);
        assert!(c.records().is_empty());
    }

    #[test]
    fn unrecognized_shape_is_an_error() {
        let err = parse(r#"{"plugins":[]}"#).unwrap_err();
        assert!(matches!(err, CatalogError::UnrecognizedShape { .. }));
        assert_eq!(err.kind(), "shape");
        let err = parse(r#"{"addons":"nope"}"#).unwrap_err();
        assert!(matches!(err, CatalogError::UnrecognizedShape { .. }));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = parse("{ not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
        assert!(err.to_string().contains("catalog.json"));
    }

    #[test]
    fn load_missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }

    #[test]
    fn replace_manifest_in_array_and_map() {
        let mut c = parse(r#"{"addons":[{"manifest":{"version":"1"}}]}"#).unwrap();
        assert!(c.replace_manifest(0, json!({"version":"2","name":"New"})));
        assert_eq!(c.records()[0].version.as_deref(), Some("2"));
        assert!(!c.replace_manifest(5, json!({})));

        let mut c = parse(r#"{"addons":{"k":{"manifest":{"version":"1"}}}}"#).unwrap();
        assert!(c.replace_manifest(0, json!({"version":"3"})));
        assert_eq!(c.document()["addons"]["k"]["manifest"]["version"], "3");
    }

    #[test]
    fn pretty_json_keeps_key_order() {
        let c = parse(r#"{"addons":[{"transportUrl":"u","manifest":{"version":"1"}}]}"#).unwrap();
        let pretty = c.to_pretty_json().unwrap();
        let t = pretty.find("transportUrl").unwrap();
        let m = pretty.find("manifest").unwrap();
        assert!(t < m);
        assert!(pretty.contains("\n  \"addons\""));
    }
}
