//! Typed assembly of full line patterns from atoms.
//!
//! A [`Template`] is an ordered list of segments: raw regex text, escaped
//! literal text, atom references and (possibly nested) groups. The
//! [`Composer`] resolves every atom reference against a format-local
//! [`AtomSet`] first and the shared base set second, checks that no capture
//! name is contributed twice, anchors the result at both ends and compiles it
//! into a [`FormatPattern`].
//!
//! # Example
//!
//! ```rust
//! use log_atoms::atom::{base_atoms, names, AtomSet};
//! use log_atoms::{Composer, Template};
//!
//! let base = base_atoms()?;
//! let local = AtomSet::new("kv");
//! let template = Template::new()
//!     .atom(names::TIME)
//!     .optional(Template::new().raw(r"\s").atom(names::TIMEZONE))
//!     .raw(r"\s")
//!     .atom(names::MESSAGE);
//!
//! let pattern = Composer::new(&base).compose("timed", &local, &template)?;
//! let fields = pattern.match_line("10:00:00 hello").unwrap();
//! assert!(fields.is_absent("timezone"));
//! assert_eq!(fields.value("message"), Some("hello"));
//! # Ok::<(), log_atoms::LogAtomError>(())
//! ```

use crate::atom::{Atom, AtomSet};
use crate::config::RegexConfig;
use crate::error::{LogAtomError, Result};
use crate::fields::FieldMap;
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// One piece of a [`Template`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Regex syntax inserted as-is (`\s`, `[T\s]`, ...).
    Raw(String),
    /// Plain text, escaped before insertion.
    Literal(String),
    /// Reference to an atom by name.
    Atom(String),
    /// Non-capturing group, optionally followed by `?`.
    Group {
        segments: Vec<Segment>,
        optional: bool,
    },
}

/// Ordered segments describing one line grammar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(mut self, regex: &str) -> Self {
        self.segments.push(Segment::Raw(regex.to_string()));
        self
    }

    pub fn lit(mut self, text: &str) -> Self {
        self.segments.push(Segment::Literal(text.to_string()));
        self
    }

    pub fn atom(mut self, name: &str) -> Self {
        self.segments.push(Segment::Atom(name.to_string()));
        self
    }

    /// Wrap `inner` in an optional group. Every capture inside it reports
    /// absent when the group does not participate in a match.
    pub fn optional(mut self, inner: Template) -> Self {
        self.segments.push(Segment::Group {
            segments: inner.segments,
            optional: true,
        });
        self
    }

    pub fn group(mut self, inner: Template) -> Self {
        self.segments.push(Segment::Group {
            segments: inner.segments,
            optional: false,
        });
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Every atom referenced, depth-first, in order of appearance.
    pub fn atom_refs(&self) -> Vec<&str> {
        fn walk<'a>(segments: &'a [Segment], out: &mut Vec<&'a str>) {
            for segment in segments {
                match segment {
                    Segment::Atom(name) => out.push(name),
                    Segment::Group { segments, .. } => walk(segments, out),
                    Segment::Raw(_) | Segment::Literal(_) => {}
                }
            }
        }

        let mut out = Vec::new();
        walk(&self.segments, &mut out);
        out
    }
}

/// A compiled, anchored pattern for one log format.
#[derive(Debug, Clone)]
pub struct FormatPattern {
    format_id: Arc<str>,
    regex: Regex,
    declared_fields: Vec<Arc<str>>,
}

impl FormatPattern {
    pub fn format_id(&self) -> &str {
        &self.format_id
    }

    /// The anchored regex text. Two patterns are structurally identical when
    /// this text is identical.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Field names in order of appearance in the pattern.
    pub fn declared_fields(&self) -> impl Iterator<Item = &str> {
        self.declared_fields.iter().map(|f| f.as_ref())
    }

    pub fn field_count(&self) -> usize {
        self.declared_fields.len()
    }

    /// Full-line match. Partial matches are impossible since the pattern is
    /// anchored at both ends.
    pub fn match_line(&self, line: &str) -> Option<FieldMap> {
        self.regex
            .captures(line)
            .map(|caps| FieldMap::from_captures(&self.format_id, &self.declared_fields, &caps))
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }
}

impl fmt::Display for FormatPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.format_id, self.regex.as_str())
    }
}

/// Builds [`FormatPattern`]s from templates over a shared base atom set.
#[derive(Debug, Clone)]
pub struct Composer<'a> {
    base: &'a AtomSet,
    regex: RegexConfig,
}

impl<'a> Composer<'a> {
    pub fn new(base: &'a AtomSet) -> Self {
        Self {
            base,
            regex: RegexConfig::default(),
        }
    }

    pub fn with_regex_config(mut self, config: RegexConfig) -> Self {
        self.regex = config;
        self
    }

    pub fn base(&self) -> &AtomSet {
        self.base
    }

    /// Compose and compile the pattern for `format_id`.
    ///
    /// Atoms in `local` shadow base atoms of the same name for this
    /// composition only.
    ///
    /// # Errors
    /// * [`LogAtomError::UnknownAtom`] - a referenced atom exists in neither set
    /// * [`LogAtomError::DuplicateCapture`] - two atom references contribute the
    ///   same capture name
    /// * [`LogAtomError::InvalidPattern`] - the assembled regex does not compile,
    ///   or a raw segment introduces a named capture no atom declared
    pub fn compose(
        &self,
        format_id: &str,
        local: &AtomSet,
        template: &Template,
    ) -> Result<FormatPattern> {
        let mut state = CompositionState {
            format_id,
            local,
            base: self.base,
            body: String::new(),
            owners: HashMap::new(),
            declared: Vec::new(),
        };
        state.emit(template.segments())?;

        let anchored = format!("^{}$", state.body);
        let regex = RegexBuilder::new(&anchored)
            .size_limit(self.regex.size_limit)
            .dfa_size_limit(self.regex.dfa_size_limit)
            .build()
            .map_err(|e| LogAtomError::InvalidPattern {
                format: format_id.to_string(),
                reason: e.to_string(),
            })?;

        if let Some(stray) = regex
            .capture_names()
            .flatten()
            .find(|name| !state.owners.contains_key(*name))
        {
            return Err(LogAtomError::InvalidPattern {
                format: format_id.to_string(),
                reason: format!("capture '{stray}' not contributed by an atom"),
            });
        }

        tracing::debug!(
            format = format_id,
            fields = state.declared.len(),
            "composed format pattern"
        );

        Ok(FormatPattern {
            format_id: Arc::from(format_id),
            regex,
            declared_fields: state.declared,
        })
    }
}

struct CompositionState<'s> {
    format_id: &'s str,
    local: &'s AtomSet,
    base: &'s AtomSet,
    body: String,
    /// capture name -> atom that contributed it
    owners: HashMap<Arc<str>, Arc<str>>,
    declared: Vec<Arc<str>>,
}

impl<'s> CompositionState<'s> {
    fn emit(&mut self, segments: &[Segment]) -> Result<()> {
        for segment in segments {
            match segment {
                Segment::Raw(regex) => self.body.push_str(regex),
                Segment::Literal(text) => self.body.push_str(&regex::escape(text)),
                Segment::Atom(name) => {
                    let atom = self.resolve(name)?;
                    self.claim_captures(atom)?;
                    // fragments may carry a top-level `|`; keep each one self-contained
                    self.body.push_str("(?:");
                    self.body.push_str(atom.fragment());
                    self.body.push(')');
                }
                Segment::Group { segments, optional } => {
                    self.body.push_str("(?:");
                    self.emit(segments)?;
                    self.body.push(')');
                    if *optional {
                        self.body.push('?');
                    }
                }
            }
        }
        Ok(())
    }

    fn resolve(&self, name: &str) -> Result<&'s Atom> {
        self.local
            .get(name)
            .or_else(|| self.base.get(name))
            .ok_or_else(|| {
                tracing::debug!(format = self.format_id, atom = name, "unresolved atom");
                LogAtomError::UnknownAtom {
                    format: self.format_id.to_string(),
                    atom: name.to_string(),
                }
            })
    }

    fn claim_captures(&mut self, atom: &Atom) -> Result<()> {
        for capture in atom.captures() {
            if let Some(first) = self.owners.get(capture) {
                return Err(LogAtomError::DuplicateCapture {
                    format: self.format_id.to_string(),
                    capture: capture.to_string(),
                    first: first.to_string(),
                    second: atom.name().to_string(),
                });
            }
            self.owners
                .insert(Arc::clone(capture), Arc::from(atom.name()));
            self.declared.push(Arc::clone(capture));
        }
        Ok(())
    }
}
