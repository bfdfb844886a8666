//! Error types for the log-atoms crate.
//!
//! Only pattern construction and configuration can fail. A line that matches
//! no registered format is a regular [`Detection`](crate::Detection) outcome,
//! never an error.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LogAtomError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogAtomError {
    // Pattern build errors (fatal at startup)
    #[error("Unknown atom '{atom}' referenced by format '{format}'")]
    UnknownAtom { format: String, atom: String },
    #[error(
        "Duplicate capture '{capture}' in format '{format}' (atoms '{first}' and '{second}')"
    )]
    DuplicateCapture {
        format: String,
        capture: String,
        first: String,
        second: String,
    },
    #[error("Atom '{atom}' defined twice in atom set '{set}'")]
    DuplicateAtom { set: String, atom: String },
    #[error("Invalid fragment for atom '{atom}': {reason}")]
    InvalidFragment { atom: String, reason: String },
    #[error("Invalid pattern for format '{format}': {reason}")]
    InvalidPattern { format: String, reason: String },

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Unknown log format: {0}")]
    UnknownFormat(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("YAML parsing error: {0}")]
    Yaml(String),
}

impl LogAtomError {
    /// Whether this error came from composing or compiling a pattern.
    pub fn is_build_error(&self) -> bool {
        matches!(
            self,
            LogAtomError::UnknownAtom { .. }
                | LogAtomError::DuplicateCapture { .. }
                | LogAtomError::DuplicateAtom { .. }
                | LogAtomError::InvalidFragment { .. }
                | LogAtomError::InvalidPattern { .. }
        )
    }
}

impl From<std::io::Error> for LogAtomError {
    fn from(err: std::io::Error) -> Self {
        LogAtomError::Io(err.to_string())
    }
}

impl From<serde_yaml::Error> for LogAtomError {
    fn from(err: serde_yaml::Error) -> Self {
        LogAtomError::Yaml(err.to_string())
    }
}
