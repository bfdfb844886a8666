//! Field provenance: which formats can produce a given field.
//!
//! The index is descriptive metadata for downstream tooling (e.g. "which
//! formats ever populate `subsystem`?"). It is never consulted while
//! matching.
//!
//! # Examples
//!
//! ```rust
//! use log_atoms::ContextIndex;
//!
//! let mut index = ContextIndex::new();
//! index.record("mysql", ["err_code", "subsystem", "message"]);
//! index.record("nginx", ["connection_counter", "message"]);
//! index.record("mysql", ["message"]);
//!
//! assert_eq!(index.formats_for("message"), ["mysql", "nginx"]);
//! assert!(index.formats_for("referer").is_empty());
//! ```

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextIndex {
    fields: BTreeMap<String, Vec<String>>,
}

impl ContextIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `format_id` produces each of `field_names`.
    ///
    /// Appends `format_id` to each field's list unless it is already there;
    /// recording the same pair twice changes nothing.
    pub fn record<I, S>(&mut self, format_id: &str, field_names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for field in field_names {
            let formats = self.fields.entry(field.as_ref().to_string()).or_default();
            if !formats.iter().any(|f| f == format_id) {
                formats.push(format_id.to_string());
            }
        }
    }

    /// Formats recorded for `field`, in first-registration order. Empty if
    /// the field is unknown.
    pub fn formats_for(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Fields recorded for `format_id`, sorted by name.
    pub fn fields_of<'a>(&'a self, format_id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .filter(move |(_, formats)| formats.iter().any(|f| f == format_id))
            .map(|(field, _)| field.as_str())
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Every known field with its formats, sorted by field name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(field, formats)| (field.as_str(), formats.as_slice()))
    }

    /// Number of distinct fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
