use std::slice;

use serde_json::Value;

use crate::config::entry::ConfigEntry;

/// Ordered configuration entries, kept raw until the orchestrator validates
/// them so that blank entries and position-dependent errors survive loading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigSequence {
    entries: Vec<Value>,
}

impl ConfigSequence {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Build a sequence from a loaded document: an array contributes each of
    /// its elements, `null` contributes nothing and anything else is a single entry.
    pub fn from_value(value: Value) -> Self {
        let entries = match value {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            single => vec![single],
        };
        Self { entries }
    }

    pub fn push(&mut self, entry: Value) {
        self.entries.push(entry);
    }

    /// Append an entry built from its parts.
    pub fn add(&mut self, data: Value, type_name: &str, name: &str) {
        self.entries
            .push(ConfigEntry::new(type_name, name, data).to_value());
    }

    /// Append every entry of `other`, keeping its order.
    pub fn extend(&mut self, other: ConfigSequence) {
        self.entries.extend(other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.entries.iter()
    }

    /// Position of the first entry whose `type` is `type_name`.
    pub fn index(&self, type_name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.get("type").and_then(Value::as_str) == Some(type_name))
    }

    /// Remove and return the raw entry at `index`.
    pub fn pop(&mut self, index: usize) -> Option<Value> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// Remove and return the first entry of type `sentinel`.
    ///
    /// Only the first one is taken; later entries of the same type stay in the
    /// sequence.
    pub fn pop_reserved(&mut self, sentinel: &str) -> Option<ConfigEntry> {
        let index = self.index(sentinel)?;
        let raw = self.pop(index)?;
        let name = raw
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let data = raw.get("data").cloned().unwrap_or(Value::Null);
        Some(ConfigEntry::new(sentinel, name, data))
    }

    pub fn to_value(&self) -> Value {
        Value::Array(self.entries.clone())
    }
}

impl<'a> IntoIterator for &'a ConfigSequence {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Value> for ConfigSequence {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
