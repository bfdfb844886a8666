//! # Log Atoms
//!
//! Field extraction for heterogeneous log lines built from a library of small,
//! named regex fragments ("atoms"). Each supported log format is a template over
//! those atoms; the composed patterns are registered in priority order and a
//! line is detected by the first format whose pattern matches it in full.
//!
//! Built-in formats:
//!
//! * `httpd` - Common and Combined Log Format access logs
//! * `mysql` - MySQL 8.0+ and MariaDB error logs
//! * `nginx` - Nginx error logs
//! * `syslog` - RFC 5424 syslog, with Docker's `DOCKER:` MSGID tag split out
//!
//! ## Quick Start
//!
//! ### Basic Usage
//!
//! ```rust
//! use log_atoms::{LogEngine, Severity};
//!
//! let engine = LogEngine::new()?;
//!
//! let line = "2020-03-22T12:35:47.538083Z 0 [Note] [MY-012487] [InnoDB] DDL log recovery : begin";
//! let detection = engine.detect(line);
//! let fields = detection.fields().expect("mysql line");
//!
//! assert_eq!(fields.format(), "mysql");
//! assert_eq!(fields.value("err_code"), Some("MY-012487"));
//! assert_eq!(fields.value("subsystem"), Some("InnoDB"));
//! assert_eq!(fields.severity(), Some(Severity::Info));
//! # Ok::<(), log_atoms::LogAtomError>(())
//! ```
//!
//! ### Batch Processing
//!
//! ```rust
//! use log_atoms::LogEngine;
//!
//! let engine = LogEngine::new()?;
//! let lines = [
//!     "2020/03/21 23:30:24 [notice] 1#1: signal process started",
//!     "no recognisable format here",
//! ];
//!
//! let detections = engine.detect_batch(&lines);
//! let matched = detections.iter().filter(|d| d.is_match()).count();
//! assert_eq!(matched, 1);
//! # Ok::<(), log_atoms::LogAtomError>(())
//! ```
//!
//! ### Configuration
//!
//! ```rust
//! use log_atoms::{EngineConfig, LogEngine, LogFormat};
//!
//! let config = EngineConfig::from_yaml_str("formats: [syslog, nginx]")?;
//! assert_eq!(config.formats, vec![LogFormat::Syslog, LogFormat::Nginx]);
//!
//! let engine = LogEngine::with_config(config)?;
//! assert!(engine.formats_for("status").is_empty());
//! # Ok::<(), log_atoms::LogAtomError>(())
//! ```

pub mod atom;
pub mod composer;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod fields;
pub mod formats;
pub mod registry;
pub mod severity;

// Primary engine interface
pub use engine::LogEngine;
pub use config::{EngineConfig, ParallelConfig, RegexConfig};

// Pattern construction
pub use atom::{base_atoms, Atom, AtomSet};
pub use composer::{Composer, FormatPattern, Segment, Template};
pub use formats::LogFormat;

// Detection results and metadata
pub use context::ContextIndex;
pub use fields::{FieldMap, FieldValue};
pub use registry::{Detection, PatternRegistry};
pub use severity::Severity;

// Core errors
pub use error::{LogAtomError, Result};
