//! RFC 5424 syslog, including Docker's syslog tag convention.
//!
//! ```text
//! <165>1 2003-10-11T22:14:15.003Z mymachine.example.com evntslog - ID47 [exampleSDID@32473 iut="3"] BOM An application event log entry...
//! ```
//!
//! With the Docker syslog driver configured as
//! `--log-opt tag="DOCKER:{{.FullID}}~{{.Name}}~{{.ImageFullID}}~{{.ImageName}}~{{.DaemonName}}"`
//! the MSGID field carries five tilde-separated container attributes which
//! are captured individually. Any other MSGID is an opaque token and leaves
//! those five fields absent.

use crate::atom::{names as base, AtomSet};
use crate::composer::Template;
use crate::error::Result;

pub const FORMAT_ID: &str = "syslog";

/// Provenance tag for the Docker tag sub-fields.
pub const DOCKER_TAG: &str = "docker";

pub const RFC5424_SEVERITY: &str = "RFC5424_SEVERITY";
pub const RFC5424_VERSION: &str = "RFC5424_VERSION";
pub const RFC5424_HOSTNAME: &str = "RFC5424_HOSTNAME";
pub const RFC5424_APPNAME: &str = "RFC5424_APPNAME";
pub const RFC5424_MSGID: &str = "RFC5424_MSGID";
pub const RFC5424_STRUCTURED_DATA: &str = "RFC5424_STRUCTURED_DATA";

pub const DOCKER_FIELDS: &[&str] = &[
    "container_id",
    "container_name",
    "image_id",
    "image_name",
    "daemon_name",
];

pub(crate) const PROVENANCE: &[(&str, &[&str])] = &[(DOCKER_TAG, DOCKER_FIELDS)];

pub const ATOMS: &[(&str, &str)] = &[
    (RFC5424_SEVERITY, r"(?P<severity>[0-9]{1,3})"),
    (RFC5424_VERSION, r"(?P<version>[0-9]{1,2})"),
    (RFC5424_HOSTNAME, r"(?P<hostname>\S{1,255})"),
    (RFC5424_APPNAME, r"(?P<appname>\S+)"),
    (
        RFC5424_MSGID,
        r"(?P<msgid>DOCKER:(?P<container_id>[a-z0-9]+)~(?P<container_name>\S+)~(?P<image_id>[a-z0-9:]+)~(?P<image_name>\S+)~(?P<daemon_name>\S+)|\S+)",
    ),
    // `-` or one or more [...] blocks; `]` inside a block must be escaped
    (
        RFC5424_STRUCTURED_DATA,
        r"(?P<structured_data>-|(?:\[(?:[^\]\\]|\\.)+\])+)",
    ),
];

pub fn atoms() -> Result<AtomSet> {
    AtomSet::from_table(FORMAT_ID, ATOMS)
}

/// `<SEVERITY>VERSION DATE"T"TIME TZ? HOSTNAME APPNAME PROCID MSGID SD( MESSAGE)?`
pub fn template() -> Template {
    Template::new()
        .lit("<")
        .atom(RFC5424_SEVERITY)
        .lit(">")
        .atom(RFC5424_VERSION)
        .raw(r"\s")
        .atom(base::DATE)
        .lit("T")
        .atom(base::TIME)
        .optional(Template::new().atom(base::TIMEZONE))
        .raw(r"\s")
        .atom(RFC5424_HOSTNAME)
        .raw(r"\s")
        .atom(RFC5424_APPNAME)
        .raw(r"\s")
        .atom(base::PROC_ID)
        .raw(r"\s")
        .atom(RFC5424_MSGID)
        .raw(r"\s")
        .atom(RFC5424_STRUCTURED_DATA)
        .optional(Template::new().raw(r"\s").atom(base::MESSAGE))
}
