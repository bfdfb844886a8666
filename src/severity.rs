//! Normalized severity for extracted level tokens.
//!
//! Each format spells its level differently (MySQL `Note`, nginx `crit`,
//! syslog encodes it in the PRI value). These tables map them onto one
//! scale. They read the output of a match and never take part in matching.

use crate::fields::FieldMap;
use crate::formats::{mysql, nginx, syslog};
use serde::Serialize;
use std::fmt;

/// Facility 23 (local7) with severity 7.
const MAX_SYSLOG_PRI: u8 = 191;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    /// MySQL/MariaDB `[PRIORITY]` token.
    pub fn from_mysql_priority(priority: &str) -> Option<Self> {
        match priority.to_ascii_uppercase().as_str() {
            "INFORMATION" | "NOTE" | "SYSTEM" => Some(Severity::Info),
            "WARNING" => Some(Severity::Warning),
            "ERROR" => Some(Severity::Error),
            _ => None,
        }
    }

    /// Nginx error log level (see `ngx_log.h`).
    pub fn from_nginx_level(level: &str) -> Option<Self> {
        match level.to_ascii_lowercase().as_str() {
            "debug" => Some(Severity::Debug),
            "info" => Some(Severity::Info),
            "notice" | "warn" => Some(Severity::Warning),
            "error" => Some(Severity::Error),
            "crit" | "alert" | "emerg" => Some(Severity::Critical),
            _ => None,
        }
    }

    /// RFC 5424 PRI value (0-191); the severity is its low three bits.
    pub fn from_syslog_pri(pri: &str) -> Option<Self> {
        let pri: u8 = pri.parse().ok()?;
        if pri > MAX_SYSLOG_PRI {
            return None;
        }
        match pri & 0x07 {
            0..=2 => Some(Severity::Critical),
            3 => Some(Severity::Error),
            4 | 5 => Some(Severity::Warning),
            6 => Some(Severity::Info),
            _ => Some(Severity::Debug),
        }
    }

    /// Pick the table matching the format that produced `fields`.
    pub fn from_fields(fields: &FieldMap) -> Option<Self> {
        match fields.format() {
            mysql::FORMAT_ID => fields.value("priority").and_then(Self::from_mysql_priority),
            nginx::FORMAT_ID => fields.value("level").and_then(Self::from_nginx_level),
            syslog::FORMAT_ID => fields.value("severity").and_then(Self::from_syslog_pri),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
