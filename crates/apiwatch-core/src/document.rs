//! Typed view over a fetched OpenAPI / Swagger document.
//!
//! Only the sections the change detector reads are modelled. Every one of
//! them is optional: a missing or `null` section deserializes to an empty map
//! or `None`, so "missing means empty" is decided here once instead of at
//! every lookup. A section that is present with the wrong JSON type is a
//! malformed document.

#![allow(clippy::result_large_err)]

use crate::errors::{ExError, WatchError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// The monitored parts of an API description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiDocument {
    /// `info` block (title and version)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<DocumentInfo>,
    /// Top-level `version`, used when `info.version` is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Value>,
    /// Endpoint path → operations
    #[serde(default, deserialize_with = "null_as_default")]
    pub paths: BTreeMap<String, Value>,
    /// OpenAPI 3 `components`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
    /// Swagger 2 schema definitions
    #[serde(default, deserialize_with = "null_as_default")]
    pub definitions: BTreeMap<String, Value>,
}

/// The `info` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Value>,
}

/// The `components` object; only `schemas` is read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    #[serde(default, deserialize_with = "null_as_default")]
    pub schemas: BTreeMap<String, Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Render a scalar JSON value as a label. Objects, arrays and null have no
/// label.
fn scalar_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl ApiDocument {
    /// Build the typed view from an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// `InvalidDocument` if the root is not an object or a modelled section
    /// has the wrong JSON type.
    pub fn from_value(value: Value) -> Result<Self, ExError> {
        if !value.is_object() {
            return Err(WatchError::NotAnObject.into());
        }
        serde_json::from_value(value).map_err(|e| {
            WatchError::MalformedSection {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Endpoint path keys.
    pub fn endpoint_paths(&self) -> BTreeSet<&str> {
        self.paths.keys().map(String::as_str).collect()
    }

    /// Schema names from `components.schemas` and Swagger 2 `definitions`.
    pub fn schema_names(&self) -> BTreeSet<&str> {
        let components = self
            .components
            .iter()
            .flat_map(|c| c.schemas.keys().map(String::as_str));
        let definitions = self.definitions.keys().map(String::as_str);
        components.chain(definitions).collect()
    }

    /// Declared API version: `info.version`, falling back to top-level
    /// `version`.
    pub fn api_version(&self) -> Option<String> {
        self.info
            .as_ref()
            .and_then(|info| info.version.as_ref())
            .and_then(scalar_label)
            .or_else(|| self.version.as_ref().and_then(scalar_label))
    }

    /// Human title from `info.title`, if any.
    pub fn title(&self) -> Option<String> {
        self.info
            .as_ref()
            .and_then(|info| info.title.as_ref())
            .and_then(scalar_label)
    }
}

/// Parse raw fetched bytes into the typed document and the raw JSON value.
///
/// The raw value is returned alongside so the caller can persist the full
/// document, not just the modelled sections.
///
/// # Errors
///
/// `InvalidDocument` when the bytes are not UTF-8, not JSON, not a JSON
/// object, or a modelled section has the wrong type.
pub fn parse_document_bytes(bytes: &[u8]) -> Result<(ApiDocument, Value), ExError> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        ExError::from(WatchError::InvalidEncoding {
            reason: e.to_string(),
        })
    })?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let raw: Value = serde_json::from_str(text).map_err(|e| {
        ExError::from(WatchError::InvalidJson {
            reason: e.to_string(),
        })
    })?;

    let document = ApiDocument::from_value(raw.clone())?;
    Ok((document, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;
    use serde_json::json;

    fn parse(v: Value) -> ApiDocument {
        ApiDocument::from_value(v).unwrap()
    }

    #[test]
    fn test_missing_sections_are_empty() {
        let doc = parse(json!({}));
        assert!(doc.endpoint_paths().is_empty());
        assert!(doc.schema_names().is_empty());
        assert_eq!(doc.api_version(), None);
    }

    #[test]
    fn test_null_sections_are_empty() {
        let doc = parse(json!({
            "paths": null,
            "components": {"schemas": null},
            "definitions": null,
            "info": null
        }));
        assert!(doc.endpoint_paths().is_empty());
        assert!(doc.schema_names().is_empty());
        assert_eq!(doc.api_version(), None);
    }

    #[test]
    fn test_schema_names_union_openapi3_and_swagger2() {
        let doc = parse(json!({
            "components": {"schemas": {"Pet": {}, "Owner": {}}},
            "definitions": {"Pet": {}, "LegacyRow": {}}
        }));
        let names: Vec<&str> = doc.schema_names().into_iter().collect();
        assert_eq!(names, vec!["LegacyRow", "Owner", "Pet"]);
    }

    #[test]
    fn test_version_prefers_info_version() {
        let doc = parse(json!({"info": {"version": "2.1"}, "version": "9"}));
        assert_eq!(doc.api_version().as_deref(), Some("2.1"));

        let doc = parse(json!({"info": {"title": "x"}, "version": "9"}));
        assert_eq!(doc.api_version().as_deref(), Some("9"));
    }

    #[test]
    fn test_numeric_version_is_rendered() {
        let doc = parse(json!({"info": {"version": 3}}));
        assert_eq!(doc.api_version().as_deref(), Some("3"));
    }

    #[test]
    fn test_blank_version_is_absent() {
        let doc = parse(json!({"info": {"version": "  "}}));
        assert_eq!(doc.api_version(), None);
    }

    #[test]
    fn test_wrong_typed_paths_is_invalid() {
        let err = ApiDocument::from_value(json!({"paths": ["/a"]})).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidDocument);
    }

    #[test]
    fn test_parse_bytes_rejects_malformed_json() {
        let err = parse_document_bytes(b"{\"paths\": ").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidDocument);
        assert_eq!(err.op(), Some("parse_document"));
    }

    #[test]
    fn test_parse_bytes_rejects_non_object_root() {
        let err = parse_document_bytes(b"[1, 2]").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidDocument);
    }

    #[test]
    fn test_parse_bytes_rejects_invalid_utf8() {
        let err = parse_document_bytes(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidDocument);
    }

    #[test]
    fn test_parse_bytes_tolerates_bom_and_keeps_raw() {
        let bytes = "\u{feff}{\"swagger\":\"2.0\",\"paths\":{\"/a\":{}}}".as_bytes();
        let (doc, raw) = parse_document_bytes(bytes).unwrap();
        assert_eq!(doc.endpoint_paths().len(), 1);
        assert_eq!(raw["swagger"], json!("2.0"));
    }
}
