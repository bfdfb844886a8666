//! Engine configuration.
//!
//! Configuration is plain data that can be built in code or loaded from YAML:
//!
//! ```yaml
//! formats: [syslog, nginx]
//! regex:
//!   size_limit: 33554432
//! parallel:
//!   min_batch_size_for_parallelism: 256
//! ```
//!
//! The order of `formats` is the detection priority.

use crate::error::{LogAtomError, Result};
use crate::formats::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Limits handed to `regex::RegexBuilder` for every compiled format pattern.
///
/// The formats use bounded repetitions over Unicode classes (`\S{1,255}`),
/// which compile to sizeable automata; the defaults leave ample headroom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegexConfig {
    /// Maximum compiled program size in bytes.
    pub size_limit: usize,
    /// Maximum lazy DFA cache size in bytes.
    pub dfa_size_limit: usize,
}

impl Default for RegexConfig {
    fn default() -> Self {
        Self {
            size_limit: 32 * (1 << 20),
            dfa_size_limit: 8 * (1 << 20),
        }
    }
}

/// Batch detection tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Batches shorter than this are matched on the calling thread.
    pub min_batch_size_for_parallelism: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            min_batch_size_for_parallelism: 128,
        }
    }
}

/// Top-level configuration for [`LogEngine`](crate::LogEngine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Formats to compose, in detection order.
    pub formats: Vec<LogFormat>,
    pub regex: RegexConfig,
    pub parallel: ParallelConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            formats: LogFormat::ALL.to_vec(),
            regex: RegexConfig::default(),
            parallel: ParallelConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: EngineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!("Loading engine configuration from: {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject configurations that cannot produce a usable registry.
    pub fn validate(&self) -> Result<()> {
        if self.formats.is_empty() {
            return Err(LogAtomError::Config(
                "at least one format must be enabled".to_string(),
            ));
        }
        for (idx, format) in self.formats.iter().enumerate() {
            if self.formats[..idx].contains(format) {
                return Err(LogAtomError::Config(format!(
                    "format '{format}' listed more than once"
                )));
            }
        }
        if self.regex.size_limit == 0 || self.regex.dfa_size_limit == 0 {
            return Err(LogAtomError::Config(
                "regex size limits must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_formats(mut self, formats: &[LogFormat]) -> Self {
        self.formats = formats.to_vec();
        self
    }

    pub fn with_regex_size_limit(mut self, bytes: usize) -> Self {
        self.regex.size_limit = bytes;
        self
    }

    pub fn with_dfa_size_limit(mut self, bytes: usize) -> Self {
        self.regex.dfa_size_limit = bytes;
        self
    }

    pub fn with_min_batch_size_for_parallelism(mut self, min_size: usize) -> Self {
        self.parallel.min_batch_size_for_parallelism = min_size;
        self
    }
}
