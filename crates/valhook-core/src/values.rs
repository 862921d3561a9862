//! Values tree with path-addressed reads and writes
//!
//! A values tree is a JSON object. Objects are the only map nodes; strings,
//! numbers, booleans, arrays and null are all leaves as far as path traversal
//! is concerned.
//!
//! Reads never fail on shape: walking through a leaf where a map was expected
//! simply yields nothing. Writes normalize the shape instead, see
//! [`replace_scalar_with_map`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::path::Path;

use crate::error::{CoreError, Result};

/// Values container with deep merge capability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Values(pub JsonValue);

impl Default for Values {
    fn default() -> Self {
        Self::new()
    }
}

impl Values {
    /// Create empty values
    pub fn new() -> Self {
        Self(JsonValue::Object(Map::new()))
    }

    /// Load values from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse values from YAML string
    ///
    /// An empty document yields empty values rather than `null`.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let value: JsonValue = serde_yaml::from_str(yaml)?;
        Ok(Self::from_json_value(value))
    }

    fn from_json_value(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::new(),
            other => Self(other),
        }
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.0)?)
    }

    /// Deep merge another Values into this one
    ///
    /// Rules:
    /// - Scalars: overlay replaces base
    /// - Objects: recursive merge
    /// - Arrays: overlay replaces base (not appended)
    pub fn merge(&mut self, overlay: &Values) {
        deep_merge(&mut self.0, &overlay.0);
    }

    /// Set a value by dotted path (e.g., "image.tag")
    pub fn set(&mut self, path: &str, value: JsonValue) {
        let parts: Vec<&str> = path.split('.').collect();
        if let Some((key, parents)) = parts.split_last() {
            self.set_leaf(parents, key, value);
        }
    }

    /// Get a value by dotted path
    pub fn get(&self, path: &str) -> Option<&JsonValue> {
        let parts: Vec<&str> = path.split('.').collect();
        self.get_path(&parts)
    }

    /// Get a value by path segments
    ///
    /// Returns `None` when a segment is missing or when an intermediate
    /// segment holds a leaf instead of a map.
    pub fn get_path(&self, path: &[&str]) -> Option<&JsonValue> {
        nested(&self.0, path)
    }

    /// Get a string leaf by path segments
    ///
    /// Absence is `Ok(None)`. A leaf that exists but is not a string is a
    /// [`CoreError::FieldType`].
    pub fn get_string(&self, path: &[&str]) -> Result<Option<&str>> {
        nested_string(&self.0, path)
    }

    /// Whether a readable string leaf exists at the path
    ///
    /// The empty string counts as present. A wrong-typed leaf counts as absent.
    pub fn has_string(&self, path: &[&str]) -> bool {
        matches!(self.get_string(path), Ok(Some(_)))
    }

    /// Walk the path, creating maps as needed, and return the deepest map
    ///
    /// Any node on the way that is not a map (the root included) is replaced
    /// by an empty map, dropping whatever it held.
    pub fn ensure_path(&mut self, path: &[&str]) -> &mut Map<String, JsonValue> {
        let mut node = replace_scalar_with_map(&mut self.0);
        for key in path {
            let child = node
                .entry((*key).to_string())
                .or_insert_with(|| JsonValue::Object(Map::new()));
            node = replace_scalar_with_map(child);
        }
        node
    }

    /// Assign `key` inside the map at `path`, creating the path if needed
    pub fn set_leaf(&mut self, path: &[&str], key: &str, value: impl Into<JsonValue>) {
        self.ensure_path(path).insert(key.to_string(), value.into());
    }

    /// Get the inner JSON value
    pub fn inner(&self) -> &JsonValue {
        &self.0
    }

    /// Check if values are empty
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            JsonValue::Object(map) => map.is_empty(),
            JsonValue::Null => true,
            _ => false,
        }
    }
}

impl From<JsonValue> for Values {
    fn from(value: JsonValue) -> Self {
        Self::from_json_value(value)
    }
}

/// Shape policy for writes: turn a non-map node into an empty map
///
/// Leaves the node alone when it already is a map. Otherwise the previous
/// value is discarded.
pub fn replace_scalar_with_map(node: &mut JsonValue) -> &mut Map<String, JsonValue> {
    if !node.is_object() {
        *node = JsonValue::Object(Map::new());
    }

    // SAFETY: We just ensured it's an object above
    node.as_object_mut()
        .expect("node should be an object after replacement")
}

/// Look up a nested value in any JSON document
pub fn nested<'a>(value: &'a JsonValue, path: &[&str]) -> Option<&'a JsonValue> {
    path.iter()
        .try_fold(value, |node, key| node.as_object()?.get(*key))
}

/// Look up a nested string in any JSON document
pub fn nested_string<'a>(value: &'a JsonValue, path: &[&str]) -> Result<Option<&'a str>> {
    match nested(value, path) {
        None => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(CoreError::FieldType {
            path: path.join("."),
            expected: "string",
        }),
    }
}

/// Deep merge two JSON values
fn deep_merge(base: &mut JsonValue, overlay: &JsonValue) {
    match (base, overlay) {
        (JsonValue::Object(base_map), JsonValue::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => {
                        base_map.insert(key.clone(), overlay_value.clone());
                    }
                }
            }
        }
        (base, overlay) => {
            *base = overlay.clone();
        }
    }
}

/// Parse --set arguments (key=value format)
pub fn parse_set_values(set_args: &[String]) -> Result<Values> {
    let mut values = Values::new();

    for arg in set_args {
        let (key, val) = arg.split_once('=').ok_or_else(|| CoreError::ValuesMerge {
            message: format!("Invalid --set format: '{}'. Expected key=value", arg),
        })?;

        if key.is_empty() {
            return Err(CoreError::ValuesMerge {
                message: format!("Invalid --set format: '{}'. Key is empty", arg),
            });
        }

        // Try to parse as JSON, fallback to string
        let json_value = if val == "true" {
            JsonValue::Bool(true)
        } else if val == "false" {
            JsonValue::Bool(false)
        } else if val == "null" {
            JsonValue::Null
        } else if let Ok(num) = val.parse::<i64>() {
            JsonValue::Number(num.into())
        } else if val.starts_with('[') || val.starts_with('{') {
            serde_json::from_str(val).unwrap_or(JsonValue::String(val.to_string()))
        } else {
            JsonValue::String(val.to_string())
        };

        values.set(key, json_value);
    }

    Ok(values)
}
