use std::collections::HashSet;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Synthetic field holding the quoted name of an `edit "<name>"` statement.
pub const NAME_FIELD: &str = "name";

/// One parsed `edit ... next` sub-block as an ordered set of fields.
///
/// Fields keep the position of their first assignment; assigning an existing
/// field again replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Create a record with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, overwriting any earlier value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Return the value of `key`, if it was set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// Return the value of `key`, or an empty string when it is absent.
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Value of the synthetic `name` field.
    pub fn name(&self) -> Option<&str> {
        self.get(NAME_FIELD)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate `(key, value)` pairs in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// First-seen ordered, de-duplicated set of field names across a parse run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldRegistry {
    order: Vec<String>,
    #[serde(skip)]
    seen: HashSet<String>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `field` unless it is already known. Returns `true` when added.
    pub fn register(&mut self, field: &str) -> bool {
        if self.seen.contains(field) {
            return false;
        }
        self.seen.insert(field.to_string());
        self.order.push(field.to_string());
        true
    }

    pub fn contains(&self, field: &str) -> bool {
        self.seen.contains(field)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.order
    }
}

/// Sealed output of one parse run: records in encounter order plus the
/// union of their field names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    pub records: Vec<Record>,
    pub fields: FieldRegistry,
}

impl ParseResult {
    /// True when there is nothing to tabulate (no records or no fields).
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() || self.fields.is_empty()
    }

    /// Project every record onto the registry columns; absent fields are empty.
    pub fn rows(&self) -> Vec<Vec<&str>> {
        self.records
            .iter()
            .map(|record| {
                self.fields
                    .iter()
                    .map(|field| record.get_or_empty(field))
                    .collect()
            })
            .collect()
    }
}
