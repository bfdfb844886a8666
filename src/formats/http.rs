//! HTTP server access logs in Common and Combined Log Format.
//!
//! ```text
//! 127.0.0.1 - frank [10/Oct/2000:13:55:36 -0700] "GET /apache_pb.gif HTTP/1.0" 200 2326 "http://www.example.com/start.html" "Mozilla/4.08 [en] (Win98; I ;Nav)"
//! ```
//!
//! The trailing referer and user-agent are only present in the combined
//! variant; each is an optional quoted sub-group.

use crate::atom::{names as base, AtomSet};
use crate::composer::Template;
use crate::error::Result;

pub const FORMAT_ID: &str = "httpd";

pub const LOG_RFC931: &str = "LOG_RFC931";
pub const LOG_AUTHUSER: &str = "LOG_AUTHUSER";
pub const LOG_DATE: &str = "LOG_DATE";
pub const LOG_STATUS: &str = "LOG_STATUS";
pub const LOG_BYTES: &str = "LOG_BYTES";
pub const LOG_REFERER: &str = "LOG_REFERER";
pub const LOG_USER_AGENT: &str = "LOG_USER_AGENT";

pub const ATOMS: &[(&str, &str)] = &[
    (LOG_RFC931, r"(?P<user_identifier>-|\S+)"),
    (LOG_AUTHUSER, r"(?P<authuser>-|\S+)"),
    // three-letter month name, not the numeric base DATE
    (
        LOG_DATE,
        r"(?P<day>0[1-9]|[12][0-9]|3[01])/(?P<month>[A-Z][a-z]{2})/(?P<year>[12][0-9]{3})",
    ),
    (LOG_STATUS, r"(?P<status>[1-5][0-9]{2})"),
    (LOG_BYTES, r"(?P<bytes>[0-9]+)"),
    (LOG_REFERER, r#""(?P<referer>-|(?:[a-z]+://\S+)?)""#),
    (LOG_USER_AGENT, r#""(?P<user_agent>[^"]+)""#),
];

pub fn atoms() -> Result<AtomSet> {
    AtomSet::from_table(FORMAT_ID, ATOMS)
}

/// `IP IDENT AUTHUSER [DD/Mon/YYYY:TIME TZ?] "MESSAGE" STATUS BYTES ("REFERER")? ("USER-AGENT")?`
pub fn template() -> Template {
    Template::new()
        .atom(base::IP)
        .raw(r"\s")
        .atom(LOG_RFC931)
        .raw(r"\s")
        .atom(LOG_AUTHUSER)
        .raw(r"\s")
        .lit("[")
        .atom(LOG_DATE)
        .lit(":")
        .atom(base::TIME)
        .optional(Template::new().raw(r"\s").atom(base::TIMEZONE))
        .lit("] \"")
        .atom(base::MESSAGE)
        .lit("\"")
        .raw(r"\s")
        .atom(LOG_STATUS)
        .raw(r"\s")
        .atom(LOG_BYTES)
        .optional(Template::new().raw(r"\s").atom(LOG_REFERER))
        .optional(Template::new().raw(r"\s").atom(LOG_USER_AGENT))
}
