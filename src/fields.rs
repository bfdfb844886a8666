//! Structured output of a successful match.
//!
//! A [`FieldMap`] always carries every field its pattern declares. Optional
//! sub-groups that did not participate in the match are reported as
//! [`FieldValue::Absent`], never as an empty string.

use crate::severity::Severity;
use regex::Captures;
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use std::sync::Arc;

/// Value of a single declared field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// The capture group participated in the match.
    Present(String),
    /// The capture group belongs to an optional sub-group that was not matched.
    Absent,
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Present(value) => Some(value.as_str()),
            FieldValue::Absent => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, FieldValue::Present(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }
}

impl From<Option<&str>> for FieldValue {
    fn from(value: Option<&str>) -> Self {
        match value {
            Some(value) => FieldValue::Present(value.to_string()),
            None => FieldValue::Absent,
        }
    }
}

/// Fields extracted from one line, in declaration order, tagged with the
/// identifier of the format (or atom) that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    format: Arc<str>,
    entries: Vec<(Arc<str>, FieldValue)>,
}

impl FieldMap {
    pub(crate) fn from_captures(
        format: &Arc<str>,
        declared: &[Arc<str>],
        captures: &Captures<'_>,
    ) -> Self {
        let entries = declared
            .iter()
            .map(|name| {
                let value = captures.name(name).map(|m| m.as_str());
                (Arc::clone(name), FieldValue::from(value))
            })
            .collect();

        Self {
            format: Arc::clone(format),
            entries,
        }
    }

    /// Identifier of the format that produced this map.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Look up a declared field. `None` means the field is not declared by
    /// this format at all.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(field, _)| field.as_ref() == name)
            .map(|(_, value)| value)
    }

    /// Concrete value of a field, if declared and present.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_str)
    }

    /// Whether `name` is declared but was not matched.
    pub fn is_absent(&self, name: &str) -> bool {
        self.get(name).is_some_and(FieldValue::is_absent)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(name, value)| (name.as_ref(), value))
    }

    /// Only the fields that carry a value.
    pub fn present(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(name, value)| value.as_str().map(|v| (name.as_ref(), v)))
    }

    /// Normalized severity of the line, when its format carries a level token.
    pub fn severity(&self) -> Option<Severity> {
        Severity::from_fields(self)
    }

    pub fn to_json(&self) -> serde_json::Value {
        // Serializing plain strings and nulls into a Value cannot fail.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

struct EntriesView<'a>(&'a [(Arc<str>, FieldValue)]);

impl Serialize for EntriesView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in self.0 {
            map.serialize_entry(name.as_ref(), value)?;
        }
        map.end()
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FieldMap", 2)?;
        state.serialize_field("format", self.format.as_ref())?;
        state.serialize_field("fields", &EntriesView(&self.entries))?;
        state.end()
    }
}
