use std::env;
use std::fs;
use std::sync::{Mutex, OnceLock};

use clientele_cli::commands::{config, migrate};
use clientele_core::config::LoadOptions;
use serde_json::Value;

#[test]
fn migrate_returns_success_with_in_memory_database() {
    let vars =
        [("CLIENTELE_DATABASE_URL", "sqlite::memory:"), ("CLIENTELE_DATABASE_MAX_CONNECTIONS", "1")];
    with_env(&vars, || {
        let result = migrate::run();
        assert_eq!(result.exit_code, 0, "expected successful migrate run");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "migrate");
        assert_eq!(payload["status"], "ok");
        assert!(payload["error_class"].is_null());
        let message = payload["message"].as_str().unwrap_or_default();
        assert!(message.contains("customer table holds 0 row(s)"), "{message}");
    });
}

#[test]
fn migrate_is_idempotent_against_a_file_database() {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = format!("sqlite://{}", dir.path().join("clientele.db").display());

    with_env(&[("CLIENTELE_DATABASE_URL", url.as_str())], || {
        let first = migrate::run();
        assert_eq!(first.exit_code, 0, "first run: {}", first.output);

        let second = migrate::run();
        assert_eq!(second.exit_code, 0, "second run: {}", second.output);
        assert_eq!(
            parse_payload(&first.output)["message"],
            parse_payload(&second.output)["message"]
        );
    });
}

#[test]
fn migrate_reports_config_failure() {
    with_env(&[("CLIENTELE_DATABASE_URL", "postgres://localhost/clientele")], || {
        let result = migrate::run();
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "migrate");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn migrate_reports_connectivity_failure() {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = format!("sqlite://{}", dir.path().join("missing").join("clientele.db").display());

    with_env(&[("CLIENTELE_DATABASE_URL", url.as_str())], || {
        let result = migrate::run();
        assert_eq!(result.exit_code, 4, "{}", result.output);
        assert_eq!(parse_payload(&result.output)["error_class"], "db_connectivity");
    });
}

#[test]
fn config_attributes_sources() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("clientele.toml");
    fs::write(&path, "[server]\nport = 8080\n").expect("write config");

    with_env(&[("CLIENTELE_LOGGING_LEVEL", "debug")], || {
        let result = config::run_with(LoadOptions {
            config_path: Some(path.clone()),
            ..LoadOptions::default()
        });
        assert_eq!(result.exit_code, 0, "{}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "config");
        let message = payload["message"].as_str().unwrap_or_default();
        assert!(message.contains("- server.port = 8080 (source: file ("), "{message}");
        assert!(message.contains("- logging.level = debug (source: env (CLIENTELE_LOGGING_LEVEL))"));
        assert!(message.contains("- database.url = sqlite://clientele.db (source: default)"));
        assert!(message.contains("- logging.format = compact (source: default)"));
    });
}

#[test]
fn config_reports_validation_failure() {
    with_env(&[("CLIENTELE_LOGGING_LEVEL", "verbose")], || {
        let result = config::run();
        assert_eq!(result.exit_code, 2);
        assert_eq!(parse_payload(&result.output)["error_class"], "config_validation");
    });
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "CLIENTELE_DATABASE_URL",
        "CLIENTELE_DATABASE_MAX_CONNECTIONS",
        "CLIENTELE_DATABASE_TIMEOUT_SECS",
        "CLIENTELE_SERVER_BIND_ADDRESS",
        "CLIENTELE_SERVER_PORT",
        "CLIENTELE_SERVER_GRACEFUL_SHUTDOWN_SECS",
        "CLIENTELE_LOGGING_LEVEL",
        "CLIENTELE_LOGGING_FORMAT",
        "CLIENTELE_LOG_LEVEL",
        "CLIENTELE_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
