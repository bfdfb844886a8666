//! Nginx error log.
//!
//! ```text
//! 2020/03/21 23:30:24 [crit] 30016#0: *4 stat() "/var/www/html/index.php" failed (13: Permission denied)
//! ```
//!
//! The `*N ` connection counter only appears for messages tied to a client
//! connection.

use crate::atom::{names as base, AtomSet};
use crate::composer::Template;
use crate::error::Result;

pub const FORMAT_ID: &str = "nginx";

pub const NGINX_ERROR_DATE: &str = "NGINX_ERROR_DATE";
pub const NGINX_CID: &str = "NGINX_CID";

pub const ATOMS: &[(&str, &str)] = &[
    (
        NGINX_ERROR_DATE,
        r"(?P<year>[12][0-9]{3})/(?P<month>0[1-9]|1[0-2])/(?P<day>0[1-9]|[12][0-9]|3[01])",
    ),
    // nginx always writes its level lowercase
    (base::LEVEL, r"(?P<level>[a-z]+)"),
    (NGINX_CID, r"(?P<connection_counter>[0-9]+)"),
];

pub fn atoms() -> Result<AtomSet> {
    AtomSet::from_table(FORMAT_ID, ATOMS)
}

/// `YYYY/MM/DD TIME TZ? [LEVEL] PID#TID: (*CID )?MESSAGE`
pub fn template() -> Template {
    Template::new()
        .atom(NGINX_ERROR_DATE)
        .raw(r"\s")
        .atom(base::TIME)
        .optional(Template::new().atom(base::TIMEZONE))
        .raw(r"\s")
        .lit("[")
        .atom(base::LEVEL)
        .lit("]")
        .raw(r"\s")
        .atom(base::PROC_ID)
        .lit("#")
        .atom(base::THREAD_ID)
        .lit(":")
        .raw(r"\s")
        .optional(Template::new().lit("*").atom(NGINX_CID).raw(r"\s"))
        .atom(base::MESSAGE)
}
