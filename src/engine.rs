//! Startup wiring and the query surface.
//!
//! [`LogEngine`] runs the registration phase once: it composes every
//! configured format, registers the compiled pattern and records which
//! fields each format owns. After construction it only answers queries.
//!
//! ```rust
//! use log_atoms::{Detection, LogEngine};
//!
//! let engine = LogEngine::new()?;
//!
//! let line = r#"127.0.0.1 - frank [10/Oct/2000:13:55:36 -0700] "GET /apache_pb.gif HTTP/1.0" 200 2326"#;
//! let detection = engine.detect(line);
//! assert_eq!(detection.format(), Some("httpd"));
//!
//! let fields = detection.fields().unwrap();
//! assert_eq!(fields.value("status"), Some("200"));
//! assert!(fields.is_absent("referer"));
//!
//! assert_eq!(engine.detect("not a log line"), Detection::NoFormatMatched);
//! assert_eq!(engine.formats_for("connection_counter"), ["nginx"]);
//! # Ok::<(), log_atoms::LogAtomError>(())
//! ```

use crate::atom::{base_atoms, AtomSet};
use crate::composer::{Composer, FormatPattern};
use crate::config::EngineConfig;
use crate::context::ContextIndex;
use crate::error::Result;
use crate::formats::LogFormat;
use crate::registry::{Detection, PatternRegistry};

/// Built registry and context index for a set of formats.
#[derive(Debug, Clone)]
pub struct LogEngine {
    registry: PatternRegistry,
    context: ContextIndex,
    base: AtomSet,
    config: EngineConfig,
}

impl LogEngine {
    /// Engine with every built-in format in default order.
    pub fn new() -> Result<Self> {
        Self::with_config(EngineConfig::default())
    }

    /// Build from `config`.
    ///
    /// # Errors
    /// Any pattern build error or invalid configuration aborts construction;
    /// a partially built engine is never returned.
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;

        let base = base_atoms()?;
        let mut engine = Self {
            registry: PatternRegistry::new(),
            context: ContextIndex::new(),
            base,
            config,
        };

        let formats = engine.config.formats.clone();
        for format in formats {
            engine.register_builtin(format)?;
        }

        tracing::info!(
            formats = engine.registry.len(),
            fields = engine.context.len(),
            "log engine ready"
        );
        Ok(engine)
    }

    fn register_builtin(&mut self, format: LogFormat) -> Result<()> {
        let composer = Composer::new(&self.base).with_regex_config(self.config.regex);
        let pattern = format.compose(&composer)?;
        if self.register(pattern) {
            for &(tag, fields) in format.provenance() {
                self.context.record(tag, fields.iter());
            }
        }
        Ok(())
    }

    /// Register an additional pattern and record its declared fields.
    ///
    /// Patterns structurally identical to an existing one are skipped and
    /// `false` is returned; the context index is left untouched for them.
    pub fn register(&mut self, pattern: FormatPattern) -> bool {
        if !self.registry.register(pattern) {
            return false;
        }
        if let Some(added) = self.registry.iter().last() {
            self.context
                .record(added.format_id(), added.declared_fields());
        }
        true
    }

    /// Composer over this engine's base atoms, for building custom formats.
    pub fn composer(&self) -> Composer<'_> {
        Composer::new(&self.base).with_regex_config(self.config.regex)
    }

    pub fn detect(&self, line: &str) -> Detection {
        self.registry.detect(line)
    }

    /// Detect a batch of lines, in parallel once the batch reaches the
    /// configured size. Results keep input order.
    pub fn detect_batch(&self, lines: &[&str]) -> Vec<Detection> {
        if lines.len() >= self.config.parallel.min_batch_size_for_parallelism {
            self.registry.par_detect_batch(lines)
        } else {
            self.registry.detect_batch(lines)
        }
    }

    pub fn formats_for(&self, field: &str) -> &[String] {
        self.context.formats_for(field)
    }

    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    pub fn context(&self) -> &ContextIndex {
        &self.context
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
