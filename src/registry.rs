//! Ordered, deduplicated collection of compiled format patterns.
//!
//! Registration order is detection priority: [`PatternRegistry::detect`]
//! tries every pattern in the order it was first registered and returns the
//! fields of the first full-line match.
//!
//! # Thread Safety
//!
//! The registry is populated once at startup and only read afterwards.
//! `detect` takes `&self` and compiled regexes are `Sync`, so a built
//! registry can be shared across threads without locking. Callers that keep
//! registering at runtime must provide their own single-writer discipline.

use crate::composer::FormatPattern;
use crate::fields::FieldMap;
use rayon::prelude::*;
use std::sync::Arc;

/// Outcome of matching one line against the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// The first format (in registration order) whose pattern matched.
    Matched(FieldMap),
    /// No registered format matched the line. This is a normal outcome.
    NoFormatMatched,
}

impl Detection {
    pub fn is_match(&self) -> bool {
        matches!(self, Detection::Matched(_))
    }

    pub fn format(&self) -> Option<&str> {
        self.fields().map(FieldMap::format)
    }

    pub fn fields(&self) -> Option<&FieldMap> {
        match self {
            Detection::Matched(fields) => Some(fields),
            Detection::NoFormatMatched => None,
        }
    }

    pub fn into_fields(self) -> Option<FieldMap> {
        match self {
            Detection::Matched(fields) => Some(fields),
            Detection::NoFormatMatched => None,
        }
    }
}

impl From<Option<FieldMap>> for Detection {
    fn from(fields: Option<FieldMap>) -> Self {
        match fields {
            Some(fields) => Detection::Matched(fields),
            None => Detection::NoFormatMatched,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    entries: Vec<Arc<FormatPattern>>,
}

impl PatternRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `pattern` unless a structurally identical one (same anchored
    /// regex text) is already registered. Returns whether it was added.
    pub fn register(&mut self, pattern: FormatPattern) -> bool {
        if self.contains_pattern(pattern.as_str()) {
            tracing::debug!(
                format = pattern.format_id(),
                "pattern already registered, skipping"
            );
            return false;
        }

        tracing::debug!(
            format = pattern.format_id(),
            priority = self.entries.len(),
            "registered format pattern"
        );
        self.entries.push(Arc::new(pattern));
        true
    }

    pub fn contains_pattern(&self, pattern: &str) -> bool {
        self.entries.iter().any(|entry| entry.as_str() == pattern)
    }

    /// First registered pattern that fully matches `line`.
    pub fn detect(&self, line: &str) -> Detection {
        let detection: Detection = self
            .entries
            .iter()
            .find_map(|entry| entry.match_line(line))
            .into();

        if let Detection::NoFormatMatched = detection {
            tracing::trace!(len = line.len(), "no format matched");
        }
        detection
    }

    /// Detect every line on the calling thread, preserving input order.
    pub fn detect_batch(&self, lines: &[&str]) -> Vec<Detection> {
        lines.iter().map(|line| self.detect(line)).collect()
    }

    /// Detect every line on the rayon pool, preserving input order.
    pub fn par_detect_batch(&self, lines: &[&str]) -> Vec<Detection> {
        lines.par_iter().map(|line| self.detect(line)).collect()
    }

    /// Pattern registered under `format_id`, if any.
    pub fn get(&self, format_id: &str) -> Option<&FormatPattern> {
        self.entries
            .iter()
            .find(|entry| entry.format_id() == format_id)
            .map(|entry| entry.as_ref())
    }

    /// Format identifiers in detection order.
    pub fn format_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.format_id())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormatPattern> {
        self.entries.iter().map(|entry| entry.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
