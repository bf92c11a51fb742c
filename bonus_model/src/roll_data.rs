//! Roll data - the key/value snapshot formulas are resolved against.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A nested key/value snapshot of a document's attributes.
///
/// Paths are dotted (`abilities.str.mod`). Array elements are addressed by
/// their index (`spells.0.level`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RollData(Map<String, Value>);

impl RollData {
    /// Create an empty roll data snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a top-level key, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Resolve a dotted path.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.0.get(first)?;
        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Copy every top-level key of `extra` over this snapshot.
    pub fn extend(&mut self, extra: impl IntoIterator<Item = (String, Value)>) {
        self.0.extend(extra);
    }

    /// Check whether the snapshot has no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert into a JSON object, e.g. to nest it under another snapshot.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for RollData {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
