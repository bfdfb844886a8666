//! Atom-level acceptance tests.
//!
//! Every atom is matched alone against the whole input, so these cases pin
//! down exactly which strings each fragment accepts.

use log_atoms::formats::{http, mysql, nginx, syslog};
use log_atoms::{base_atoms, Atom, AtomSet};

fn base(name: &str) -> Atom {
    base_atoms().unwrap().get(name).unwrap().clone()
}

fn local(set: AtomSet, name: &str) -> Atom {
    set.get(name).unwrap().clone()
}

/// Assert that `atom` accepts `input` with exactly `expected` as its fields.
fn assert_accepts(atom: &Atom, input: &str, expected: &[(&str, Option<&str>)]) {
    let fields = atom
        .matches(input)
        .unwrap_or_else(|| panic!("{} should accept {input:?}", atom.name()));
    let names: Vec<&str> = fields.names().collect();
    let expected_names: Vec<&str> = expected.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, expected_names, "{} on {input:?}", atom.name());
    for (name, value) in expected {
        assert_eq!(fields.value(name), *value, "{} field {name}", atom.name());
    }
}

fn assert_rejects(atom: &Atom, input: &str) {
    assert!(
        atom.matches(input).is_none(),
        "{} should reject {input:?}",
        atom.name()
    );
}

#[test]
fn test_date() {
    let date = base("DATE");
    assert_accepts(
        &date,
        "1970-01-01",
        &[("year", Some("1970")), ("month", Some("01")), ("day", Some("01"))],
    );
    assert_accepts(
        &date,
        "2000-02-03",
        &[("year", Some("2000")), ("month", Some("02")), ("day", Some("03"))],
    );
    assert_rejects(&date, "98-02-03");
    assert_rejects(&date, "2000/02-03");
    assert_rejects(&date, "2000-13-01");
    assert_rejects(&date, "2000-01-32");
}

#[test]
fn test_time() {
    let time = base("TIME");
    assert_accepts(
        &time,
        "00:00:00",
        &[
            ("hour", Some("00")),
            ("minute", Some("00")),
            ("second", Some("00")),
            ("microsecond", None),
        ],
    );
    assert_accepts(
        &time,
        "23:59:59",
        &[
            ("hour", Some("23")),
            ("minute", Some("59")),
            ("second", Some("59")),
            ("microsecond", None),
        ],
    );
    for (input, micro) in [
        ("00:00:00.000001", "000001"),
        ("00:00:00.1", "1"),
        ("00:00:00.100000", "100000"),
    ] {
        assert_eq!(time.matches(input).unwrap().value("microsecond"), Some(micro));
    }
    assert_rejects(&time, "00:00:00.0000001");
    assert_rejects(&time, "25:00:00");
}

#[test]
fn test_timezone() {
    let tz = base("TIMEZONE");
    for valid in ["Z", "+00:00", "-08:00", "+05:30", "-0700", "+0130"] {
        assert_accepts(&tz, valid, &[("timezone", Some(valid))]);
    }
    assert_rejects(&tz, "+1:00");
    assert_rejects(&tz, "00:00");
}

#[test]
fn test_ids_and_level() {
    for id in ["0345347597345", "7a4e19c66688"] {
        assert_accepts(&base("PROC_ID"), id, &[("proc_id", Some(id))]);
        assert_accepts(&base("THREAD_ID"), id, &[("thread_id", Some(id))]);
    }
    assert_rejects(&base("PROC_ID"), "has space");
    assert_rejects(&base("PROC_ID"), &"x".repeat(129));

    let level = base("LEVEL");
    for valid in ["Error", "INFORMATION", "warning"] {
        assert_accepts(&level, valid, &[("level", Some(valid))]);
    }
}

#[test]
fn test_ip() {
    let ip = base("IP");
    assert_accepts(&ip, "192.168.1.1", &[("ip", Some("192.168.1.1"))]);
    assert_accepts(&ip, "255.255.255.0", &[("ip", Some("255.255.255.0"))]);
    assert_rejects(&ip, "000.0000.00.00");
    assert_rejects(&ip, "912.456.123.123");
    assert_rejects(&ip, "10.0.0");
}

#[test]
fn test_mysql_atoms() {
    let priority = local(mysql::atoms().unwrap(), mysql::PRIORITY);
    assert_accepts(&priority, "Error", &[("priority", Some("Error"))]);
    assert_accepts(&priority, "INFORMATION", &[("priority", Some("INFORMATION"))]);
    assert_rejects(&priority, "warning");

    let err_code = local(mysql::atoms().unwrap(), mysql::MYSQL_ERR_CODE);
    for code in [
        "ER_SERVER_SHUTDOWN_COMPLETE",
        "MY-000031",
        "MY-010051",
        "000031",
        "10051",
        "31",
    ] {
        assert_accepts(&err_code, code, &[("err_code", Some(code))]);
    }
    assert_rejects(&err_code, "ERROR 1052");

    let subsystem = local(mysql::atoms().unwrap(), mysql::MYSQL_SUBSYSTEM);
    for name in ["InnoDB", "Server"] {
        assert_accepts(&subsystem, name, &[("subsystem", Some(name))]);
    }
}

#[test]
fn test_http_atoms() {
    let atoms = http::atoms().unwrap();

    let rfc931 = local(atoms.clone(), http::LOG_RFC931);
    assert_accepts(&rfc931, "-", &[("user_identifier", Some("-"))]);
    assert_accepts(&rfc931, "foo", &[("user_identifier", Some("foo"))]);

    let authuser = local(atoms.clone(), http::LOG_AUTHUSER);
    assert_accepts(&authuser, "-", &[("authuser", Some("-"))]);
    assert_accepts(&authuser, "bar", &[("authuser", Some("bar"))]);

    let date = local(atoms.clone(), http::LOG_DATE);
    assert_accepts(
        &date,
        "10/Oct/2000",
        &[("day", Some("10")), ("month", Some("Oct")), ("year", Some("2000"))],
    );
    assert_rejects(&date, "10/Oct/98");

    let status = local(atoms.clone(), http::LOG_STATUS);
    for code in ["101", "202", "303", "505"] {
        assert_accepts(&status, code, &[("status", Some(code))]);
    }
    assert_rejects(&status, "99");
    assert_rejects(&status, "700");

    let bytes = local(atoms.clone(), http::LOG_BYTES);
    assert_accepts(&bytes, "0", &[("bytes", Some("0"))]);
    assert_accepts(&bytes, "58973459", &[("bytes", Some("58973459"))]);

    let referer = local(atoms.clone(), http::LOG_REFERER);
    assert_accepts(
        &referer,
        r#""http://www.example.com/start.html""#,
        &[("referer", Some("http://www.example.com/start.html"))],
    );
    assert_accepts(
        &referer,
        r#""ftps://www.example.com/file.php""#,
        &[("referer", Some("ftps://www.example.com/file.php"))],
    );
    assert_rejects(&referer, r#""www.example.com""#);

    let user_agent = local(atoms, http::LOG_USER_AGENT);
    assert_accepts(
        &user_agent,
        r#""Mozilla/4.08 [en] (Win98; I ;Nav)""#,
        &[("user_agent", Some("Mozilla/4.08 [en] (Win98; I ;Nav)"))],
    );
    assert_accepts(&user_agent, r#""Foo Bar""#, &[("user_agent", Some("Foo Bar"))]);
}

#[test]
fn test_nginx_atoms() {
    let atoms = nginx::atoms().unwrap();

    let date = local(atoms.clone(), nginx::NGINX_ERROR_DATE);
    assert_accepts(
        &date,
        "1970/01/01",
        &[("year", Some("1970")), ("month", Some("01")), ("day", Some("01"))],
    );
    assert_rejects(&date, "2000-02-03");

    let level = local(atoms.clone(), "LEVEL");
    assert_accepts(&level, "emerg", &[("level", Some("emerg"))]);
    assert_accepts(&level, "notice", &[("level", Some("notice"))]);
    assert_rejects(&level, "DEBUG");

    let cid = local(atoms, nginx::NGINX_CID);
    assert_accepts(&cid, "0", &[("connection_counter", Some("0"))]);
    assert_accepts(&cid, "345", &[("connection_counter", Some("345"))]);
}

#[test]
fn test_syslog_msgid_atom() {
    let msgid = local(syslog::atoms().unwrap(), syslog::RFC5424_MSGID);
    let tag = "DOCKER:d8e210ec875a0871880e004f8fc37e0bf56140093155b8d55aec93d9dc66a53e~mariadb_1~sha256:20da7ed64a1e90fbee45ce9c14a4145fda05182b3ca712b8bf6fe5044d5bf6e6~million12/mariadb~docker";
    assert_accepts(
        &msgid,
        tag,
        &[
            ("msgid", Some(tag)),
            (
                "container_id",
                Some("d8e210ec875a0871880e004f8fc37e0bf56140093155b8d55aec93d9dc66a53e"),
            ),
            ("container_name", Some("mariadb_1")),
            (
                "image_id",
                Some("sha256:20da7ed64a1e90fbee45ce9c14a4145fda05182b3ca712b8bf6fe5044d5bf6e6"),
            ),
            ("image_name", Some("million12/mariadb")),
            ("daemon_name", Some("docker")),
        ],
    );

    let opaque = msgid.matches("ID47").unwrap();
    assert_eq!(opaque.value("msgid"), Some("ID47"));
    assert!(opaque.is_absent("container_id"));
    assert!(opaque.is_absent("daemon_name"));
}

#[test]
fn test_invalid_fragments_rejected() {
    assert!(Atom::new("BROKEN", "(?P<x>[0-9]").is_err());
    assert!(Atom::new("UNNAMED", "[0-9]+").is_err());
    let atom = Atom::new("OK", "(?P<x>[0-9]+)").unwrap();
    assert_eq!(atom.capture_names().collect::<Vec<_>>(), vec!["x"]);
    assert_eq!(atom.fragment(), "(?P<x>[0-9]+)");
}
