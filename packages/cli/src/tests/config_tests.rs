use crate::config::{parse_host, Config, ConfigError};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serial_test::serial;
use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

fn clear_env() {
    for name in tickoff_config::ALL_VARIABLES {
        env::remove_var(name);
    }
}

#[test]
#[serial]
fn test_config_from_env_defaults() {
    clear_env();

    let config = Config::from_env().unwrap();

    assert_eq!(config.host, "127.0.0.1".parse::<IpAddr>().unwrap());
    assert_eq!(config.port, 8000);
    assert_eq!(config.database_path, PathBuf::from("todos.db"));
    assert_eq!(config.db_max_connections, 10);
    assert_eq!(
        config.cors_origins,
        vec!["http://localhost:3000", "http://localhost:5173"]
    );
}

#[test]
#[serial]
fn test_config_from_env_with_all_custom() {
    clear_env();
    env::set_var("TICKOFF_HOST", "0.0.0.0");
    env::set_var("TICKOFF_PORT", "9000");
    env::set_var("TICKOFF_DATABASE_PATH", "/tmp/tickoff/todos.db");
    env::set_var("TICKOFF_DB_MAX_CONNECTIONS", "4");
    env::set_var("TICKOFF_CORS_ORIGINS", " https://app.example.com , ,https://admin.example.com");

    let config = Config::from_env().unwrap();

    assert_eq!(config.socket_addr().to_string(), "0.0.0.0:9000");
    assert_eq!(config.database_path, PathBuf::from("/tmp/tickoff/todos.db"));
    assert_eq!(config.database_config().max_connections, 4);
    assert_eq!(
        config.cors_origins,
        vec!["https://app.example.com", "https://admin.example.com"]
    );

    clear_env();
}

#[test]
#[serial]
fn test_legacy_port_variable() {
    clear_env();
    env::set_var("PORT", "3001");

    assert_eq!(Config::from_env().unwrap().port, 3001);

    env::set_var("TICKOFF_PORT", "3002");
    assert_eq!(Config::from_env().unwrap().port, 3002);

    clear_env();
}

#[test]
#[serial]
fn test_config_invalid_port() {
    clear_env();
    env::set_var("TICKOFF_PORT", "not-a-number");

    let result = Config::from_env();
    assert!(matches!(result.unwrap_err(), ConfigError::InvalidPort(_)));

    clear_env();
}

#[test]
#[serial]
fn test_config_port_zero() {
    clear_env();
    env::set_var("TICKOFF_PORT", "0");

    let result = Config::from_env();
    assert!(matches!(result.unwrap_err(), ConfigError::PortOutOfRange(0)));

    clear_env();
}

#[test]
#[serial]
fn test_config_port_too_large() {
    clear_env();
    env::set_var("TICKOFF_PORT", "70000");

    let result = Config::from_env();
    assert!(matches!(result.unwrap_err(), ConfigError::InvalidPort(_)));

    clear_env();
}

#[test]
#[serial]
fn test_config_invalid_max_connections() {
    clear_env();

    for value in ["0", "-3", "many"] {
        env::set_var("TICKOFF_DB_MAX_CONNECTIONS", value);

        let result = Config::from_env();
        assert!(
            matches!(result, Err(ConfigError::InvalidMaxConnections(_))),
            "expected {} to be rejected",
            value
        );
    }

    clear_env();
}

#[test]
#[serial]
fn test_config_invalid_host() {
    clear_env();
    env::set_var("TICKOFF_HOST", "not a host");

    let result = Config::from_env();
    assert!(matches!(result.unwrap_err(), ConfigError::InvalidHost(_)));

    clear_env();
}

#[rstest]
#[case("localhost", "127.0.0.1")]
#[case("127.0.0.1", "127.0.0.1")]
#[case("::1", "::1")]
#[case(" 0.0.0.0 ", "0.0.0.0")]
fn test_parse_host(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(parse_host(input).unwrap(), expected.parse::<IpAddr>().unwrap());
}
