//! Built-in log formats.
//!
//! Each submodule owns the format-local atom table for one log source and the
//! template describing its line grammar. [`LogFormat`] ties them together and
//! fixes the default detection order.

pub mod http;
pub mod mysql;
pub mod nginx;
pub mod syslog;

use crate::atom::AtomSet;
use crate::composer::{Composer, FormatPattern, Template};
use crate::error::{LogAtomError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a built-in format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Common/Combined Log Format access logs.
    Httpd,
    /// MySQL 8.0+ and MariaDB error logs.
    Mysql,
    /// Nginx error log.
    Nginx,
    /// RFC 5424 syslog, including the Docker tag convention.
    Syslog,
}

impl LogFormat {
    /// All built-in formats in default detection order.
    pub const ALL: [LogFormat; 4] = [
        LogFormat::Httpd,
        LogFormat::Mysql,
        LogFormat::Nginx,
        LogFormat::Syslog,
    ];

    pub fn id(self) -> &'static str {
        match self {
            LogFormat::Httpd => http::FORMAT_ID,
            LogFormat::Mysql => mysql::FORMAT_ID,
            LogFormat::Nginx => nginx::FORMAT_ID,
            LogFormat::Syslog => syslog::FORMAT_ID,
        }
    }

    /// Format-local atoms layered over the base library.
    pub fn atoms(self) -> Result<AtomSet> {
        match self {
            LogFormat::Httpd => http::atoms(),
            LogFormat::Mysql => mysql::atoms(),
            LogFormat::Nginx => nginx::atoms(),
            LogFormat::Syslog => syslog::atoms(),
        }
    }

    pub fn template(self) -> Template {
        match self {
            LogFormat::Httpd => http::template(),
            LogFormat::Mysql => mysql::template(),
            LogFormat::Nginx => nginx::template(),
            LogFormat::Syslog => syslog::template(),
        }
    }

    pub fn compose(self, composer: &Composer<'_>) -> Result<FormatPattern> {
        composer.compose(self.id(), &self.atoms()?, &self.template())
    }

    /// Extra provenance tags recorded in the context index alongside the
    /// format's own identifier.
    pub fn provenance(self) -> &'static [(&'static str, &'static [&'static str])] {
        match self {
            LogFormat::Syslog => syslog::PROVENANCE,
            LogFormat::Httpd | LogFormat::Mysql | LogFormat::Nginx => &[],
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for LogFormat {
    type Err = LogAtomError;

    fn from_str(s: &str) -> Result<Self> {
        LogFormat::ALL
            .into_iter()
            .find(|format| format.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| LogAtomError::UnknownFormat(s.to_string()))
    }
}
