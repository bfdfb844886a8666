//! Named, reusable regex fragments ("atoms") and the base atom library.
//!
//! An atom is a piece of regex text carrying one or more named capture
//! groups. Atoms never change after construction; format modules combine
//! them into full line patterns through the [`Composer`](crate::Composer).
//!
//! All character classes are spelled with explicit ASCII ranges (`[0-9]`
//! rather than `\d`) because the `regex` crate is Unicode-aware by default.

use crate::error::{LogAtomError, Result};
use crate::fields::FieldMap;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;

/// Names of the atoms in the base library.
pub mod names {
    pub const DATE: &str = "DATE";
    pub const TIME: &str = "TIME";
    pub const TIMEZONE: &str = "TIMEZONE";
    pub const PROC_ID: &str = "PROC_ID";
    pub const THREAD_ID: &str = "THREAD_ID";
    pub const LEVEL: &str = "LEVEL";
    pub const IP: &str = "IP";
    pub const MESSAGE: &str = "MESSAGE";
}

/// Cross-format fragments shared by every format.
pub const BASE_ATOMS: &[(&str, &str)] = &[
    (
        names::DATE,
        r"(?P<year>[12][0-9]{3})-(?P<month>0[1-9]|1[0-2])-(?P<day>0[1-9]|[12][0-9]|3[01])",
    ),
    (
        names::TIME,
        r"(?P<hour>[01][0-9]|2[0-4]):(?P<minute>[0-5][0-9]):(?P<second>[0-5][0-9]|60)(?:\.(?P<microsecond>[0-9]{1,6}))?",
    ),
    (
        names::TIMEZONE,
        r"(?P<timezone>Z|[+-](?:[01][0-9]|2[0-4]):?[0-5][0-9])",
    ),
    (names::PROC_ID, r"(?P<proc_id>\S{1,128})"),
    (names::THREAD_ID, r"(?P<thread_id>\S{1,128})"),
    (names::LEVEL, r"(?P<level>[A-Za-z]+)"),
    // each octet 0-255, no leading zeros
    (
        names::IP,
        r"(?P<ip>(?:(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9][0-9]|[0-9])\.){3}(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9][0-9]|[0-9]))",
    ),
    (names::MESSAGE, r"(?P<message>.+)"),
];

/// A named regex fragment together with the capture names it declares.
#[derive(Debug, Clone)]
pub struct Atom {
    name: Arc<str>,
    fragment: Arc<str>,
    captures: Vec<Arc<str>>,
    anchored: Regex,
}

impl Atom {
    /// Validate `fragment` and read its capture names.
    ///
    /// Fails with [`LogAtomError::InvalidFragment`] if the fragment is not a
    /// valid regex on its own or declares no named capture.
    pub fn new(name: &str, fragment: &str) -> Result<Self> {
        let anchored = Regex::new(&format!("^(?:{fragment})$")).map_err(|e| {
            LogAtomError::InvalidFragment {
                atom: name.to_string(),
                reason: e.to_string(),
            }
        })?;

        let captures: Vec<Arc<str>> = anchored.capture_names().flatten().map(Arc::from).collect();
        if captures.is_empty() {
            return Err(LogAtomError::InvalidFragment {
                atom: name.to_string(),
                reason: "fragment declares no named capture".to_string(),
            });
        }

        Ok(Self {
            name: Arc::from(name),
            fragment: Arc::from(fragment),
            captures,
            anchored,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fragment text, verbatim.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Capture names in order of appearance.
    pub fn capture_names(&self) -> impl Iterator<Item = &str> {
        self.captures.iter().map(|c| c.as_ref())
    }

    pub(crate) fn captures(&self) -> &[Arc<str>] {
        &self.captures
    }

    /// Match the whole of `text` against this atom alone.
    pub fn matches(&self, text: &str) -> Option<FieldMap> {
        self.anchored
            .captures(text)
            .map(|caps| FieldMap::from_captures(&self.name, &self.captures, &caps))
    }
}

/// An ordered collection of atoms, addressable by name.
#[derive(Debug, Clone)]
pub struct AtomSet {
    name: String,
    atoms: Vec<Atom>,
    index: HashMap<Arc<str>, usize>,
}

impl AtomSet {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            atoms: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build a set from a `(name, fragment)` table.
    pub fn from_table(name: &str, table: &[(&str, &str)]) -> Result<Self> {
        let mut set = Self::new(name);
        for &(atom_name, fragment) in table {
            set.insert(Atom::new(atom_name, fragment)?)?;
        }
        Ok(set)
    }

    /// Add an atom. Names are unique within one set.
    pub fn insert(&mut self, atom: Atom) -> Result<()> {
        if self.index.contains_key(atom.name()) {
            return Err(LogAtomError::DuplicateAtom {
                set: self.name.clone(),
                atom: atom.name().to_string(),
            });
        }
        self.index.insert(Arc::clone(&atom.name), self.atoms.len());
        self.atoms.push(atom);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Atom> {
        self.index.get(name).map(|&idx| &self.atoms[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.iter()
    }
}

/// The base atom library shared by all formats.
pub fn base_atoms() -> Result<AtomSet> {
    AtomSet::from_table("base", BASE_ATOMS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(name: &str) -> Atom {
        base_atoms().unwrap().get(name).unwrap().clone()
    }

    #[test]
    fn test_base_library_contents() {
        let base = base_atoms().unwrap();
        assert_eq!(base.len(), BASE_ATOMS.len());
        assert_eq!(base.name(), "base");
        for name in [
            names::DATE,
            names::TIME,
            names::TIMEZONE,
            names::PROC_ID,
            names::THREAD_ID,
            names::LEVEL,
            names::IP,
            names::MESSAGE,
        ] {
            assert!(base.contains(name), "missing {name}");
        }
    }

    #[test]
    fn test_capture_names_in_order() {
        let time = atom(names::TIME);
        let captures: Vec<&str> = time.capture_names().collect();
        assert_eq!(captures, vec!["hour", "minute", "second", "microsecond"]);

        let ip = atom(names::IP);
        assert_eq!(ip.capture_names().collect::<Vec<_>>(), vec!["ip"]);
    }

    #[test]
    fn test_fragment_returned_verbatim() {
        let level = atom(names::LEVEL);
        assert_eq!(level.fragment(), r"(?P<level>[A-Za-z]+)");
        assert_eq!(level.name(), "LEVEL");
    }

    #[test]
    fn test_invalid_fragment_rejected() {
        let err = Atom::new("BROKEN", r"(?P<x>[0-9]").unwrap_err();
        assert!(matches!(err, LogAtomError::InvalidFragment { ref atom, .. } if atom == "BROKEN"));

        let err = Atom::new("ANONYMOUS", r"[0-9]+").unwrap_err();
        assert!(matches!(err, LogAtomError::InvalidFragment { .. }));
    }

    #[test]
    fn test_duplicate_atom_in_set() {
        let mut set = AtomSet::new("local");
        set.insert(Atom::new("A", r"(?P<a>a)").unwrap()).unwrap();
        let err = set.insert(Atom::new("A", r"(?P<b>b)").unwrap()).unwrap_err();
        assert_eq!(
            err,
            LogAtomError::DuplicateAtom {
                set: "local".to_string(),
                atom: "A".to_string(),
            }
        );
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_ip_octets() {
        let ip = atom(names::IP);
        assert_eq!(ip.matches("192.168.1.1").unwrap().value("ip"), Some("192.168.1.1"));
        assert!(ip.matches("255.255.255.255").is_some());
        assert!(ip.matches("0.0.0.0").is_some());
        assert!(ip.matches("256.1.1.1").is_none());
        assert!(ip.matches("01.1.1.1").is_none());
        assert!(ip.matches("912.456.123.123").is_none());
        assert!(ip.matches("000.0000.00.00").is_none());
    }

    #[test]
    fn test_time_fraction_optional() {
        let time = atom(names::TIME);
        let fields = time.matches("23:59:59").unwrap();
        assert!(fields.is_absent("microsecond"));
        assert_eq!(fields.value("second"), Some("59"));

        let fields = time.matches("24:00:60.5").unwrap();
        assert_eq!(fields.value("hour"), Some("24"));
        assert_eq!(fields.value("second"), Some("60"));
        assert_eq!(fields.value("microsecond"), Some("5"));
    }
}
