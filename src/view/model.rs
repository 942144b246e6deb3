// View model types
// Plain data handed to the template renderer for substitution

use serde::Serialize;
use serde_json::{Map, Value};

/// Page metadata rendered into the page header
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub subtitle: String,
}

impl Page {
    pub fn new(title: &str, subtitle: &str) -> Self {
        Self {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
        }
    }
}

/// Named values passed to the template renderer.
///
/// Keys keep their insertion order, so sequences and repeated renders come
/// out identical. Values are serialized on insert; the renderer consumes the
/// map as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewModel {
    attributes: Map<String, Value>,
}

impl ViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a named value, serializing it in place.
    ///
    /// Serialization of plain data (strings, sequences, derived structs)
    /// cannot fail; a non-serializable value is stored as null rather than
    /// aborting the request.
    pub fn insert<T: Serialize>(&mut self, key: &str, value: T) {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.attributes.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Attribute map in insertion order, as the renderer consumes it
    pub const fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }
}
