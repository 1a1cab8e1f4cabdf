#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use metricsd_server::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listne: "0.0.0.0:9090" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "INVALID_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.listen_addr().unwrap().port(), 8080);
}

#[test]
fn listen_must_be_socket_addr() {
    let bad = r#"
version: 1
server:
  listen: "localhost"
"#;
    assert!(config::load_from_str(bad).is_err());

    let ok = r#"
version: 1
server:
  listen: "127.0.0.1:9091"
"#;
    let cfg = config::load_from_str(ok).unwrap();
    assert_eq!(cfg.listen_addr().unwrap().to_string(), "127.0.0.1:9091");
}

#[test]
fn unsupported_version() {
    assert!(config::load_from_str("version: 2\n").is_err());
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let cfg = config::load_or_default("/nonexistent/metricsd-server.yaml").unwrap();
    assert_eq!(cfg.server.listen, "0.0.0.0:8080");
    assert!(config::load_from_file("/nonexistent/metricsd-server.yaml").is_err());
}
