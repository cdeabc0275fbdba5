use clap::Parser;
use pulsar_admin::{load_sink_config, load_source_config, ConnectionOpts};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

fn opts() -> ConnectionOpts {
    ConnectionOpts {
        web_service_url: "https://pulsar.example.com:8443".to_string(),
        auth_token: Some("token".to_string()),
        tls_trust_certs_file_path: Some(PathBuf::from("/etc/pulsar/ca.pem")),
        tls_allow_insecure: false,
        tls_disable_hostname_verification: false,
        request_timeout: "2m".to_string(),
    }
}

#[test]
fn test_connection_opts_to_client_config() {
    let config = opts().to_client_config().unwrap();

    assert_eq!(config.web_service_url, "https://pulsar.example.com:8443");
    assert_eq!(config.auth_token.as_deref(), Some("token"));
    assert_eq!(
        config.tls.trust_certs_file_path,
        Some(PathBuf::from("/etc/pulsar/ca.pem"))
    );
    assert!(!config.tls.allow_insecure_connection);
    assert!(config.tls.enable_hostname_verification);
    assert_eq!(config.request_timeout, Duration::from_secs(120));
}

#[test]
fn test_insecure_flags() {
    let opts = ConnectionOpts {
        tls_allow_insecure: true,
        tls_disable_hostname_verification: true,
        ..opts()
    };
    let config = opts.to_client_config().unwrap();

    assert!(config.tls.allow_insecure_connection);
    assert!(!config.tls.enable_hostname_verification);
}

#[test]
fn test_invalid_timeout() {
    let opts = ConnectionOpts {
        request_timeout: "soon".to_string(),
        ..opts()
    };
    let err = opts.to_client_config().unwrap_err();
    assert!(format!("{err:#}").contains("Invalid request timeout"));
}

#[test]
fn test_parse_flags() {
    let opts = ConnectionOpts::try_parse_from([
        "pulsar-admin",
        "--web-service-url",
        "http://broker:8080",
        "--request-timeout",
        "500ms",
        "--tls-allow-insecure",
    ])
    .unwrap();

    assert_eq!(opts.web_service_url, "http://broker:8080");
    assert!(opts.tls_allow_insecure);

    let config = opts.to_client_config().unwrap();
    assert_eq!(config.request_timeout, Duration::from_millis(500));
}

#[test]
fn test_load_sink_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"tenant":"public","namespace":"default","name":"es","inputs":["events"],"parallelism":2}}"#
    )
    .unwrap();

    let config = load_sink_config(file.path()).unwrap();
    assert_eq!(config.name, "es");
    assert_eq!(config.inputs, Some(vec!["events".to_string()]));
    assert_eq!(config.parallelism, Some(2));
    assert_eq!(config.archive, None);
}

#[test]
fn test_load_sink_config_errors() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();
    let err = load_sink_config(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("Invalid sink config"));

    let err = load_sink_config(std::path::Path::new("/nonexistent/sink.json")).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to read sink config"));
}

#[test]
fn test_load_source_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"tenant":"public","namespace":"default","name":"kafka-in","topicName":"events","archive":"builtin://kafka"}}"#
    )
    .unwrap();

    let config = load_source_config(file.path()).unwrap();
    assert_eq!(config.name, "kafka-in");
    assert_eq!(config.topic_name.as_deref(), Some("events"));
    assert_eq!(config.archive.as_deref(), Some("builtin://kafka"));

    let err = load_source_config(std::path::Path::new("/nonexistent/source.json")).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to read source config"));
}
