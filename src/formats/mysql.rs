//! MySQL 8.0+ and MariaDB error logs.
//!
//! ```text
//! 2020-03-22T12:35:47.538083Z 0 [Note] [MY-012487] [InnoDB] InnoDB: DDL log recovery : begin
//! 2020-03-22 12:35:47 140310100753288 [Note] InnoDB: Percona XtraDB started
//! ```
//!
//! MySQL 8.0 joins date and time with `T`, appends `Z` and carries both the
//! error code and the subsystem. MariaDB and older MySQL use a space, no
//! timezone and omit both bracketed groups. Thread id, error code and
//! subsystem are independently optional.

use crate::atom::{names as base, AtomSet};
use crate::composer::Template;
use crate::error::Result;

pub const FORMAT_ID: &str = "mysql";

pub const PRIORITY: &str = "PRIORITY";
pub const MYSQL_ERR_CODE: &str = "MYSQL_ERR_CODE";
pub const MYSQL_SUBSYSTEM: &str = "MYSQL_SUBSYSTEM";

pub const ATOMS: &[(&str, &str)] = &[
    (PRIORITY, r"(?P<priority>[A-Z][A-Za-z]+)"),
    (MYSQL_ERR_CODE, r"(?P<err_code>[A-Z0-9][A-Z0-9_-]+)"),
    (MYSQL_SUBSYSTEM, r"(?P<subsystem>[A-Z]\S+)"),
];

pub fn atoms() -> Result<AtomSet> {
    AtomSet::from_table(FORMAT_ID, ATOMS)
}

/// `DATE[T ]TIME TZ? (THREAD-ID )?[PRIORITY] ([ERR-CODE] )?([SUBSYSTEM] )?MESSAGE`
pub fn template() -> Template {
    Template::new()
        .atom(base::DATE)
        .raw(r"[T\s]")
        .atom(base::TIME)
        .optional(Template::new().atom(base::TIMEZONE))
        .raw(r"\s")
        .optional(Template::new().atom(base::THREAD_ID).raw(r"\s"))
        .lit("[")
        .atom(PRIORITY)
        .lit("]")
        .raw(r"\s")
        .optional(
            Template::new()
                .lit("[")
                .atom(MYSQL_ERR_CODE)
                .lit("]")
                .raw(r"\s"),
        )
        .optional(
            Template::new()
                .lit("[")
                .atom(MYSQL_SUBSYSTEM)
                .lit("]")
                .raw(r"\s"),
        )
        .atom(base::MESSAGE)
}
