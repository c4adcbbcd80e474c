use super::{apply_env, apply_file, load_settings, validate, Settings};

use std::{
    collections::HashMap,
    env, fs,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

fn env_map(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_point_at_local_backend() {
    let settings = Settings::default();
    assert_eq!(settings.api_base_url, "http://127.0.0.1:3001/api");
    assert_eq!(settings.request_timeout(), None);
    assert_eq!(settings.log_filter, "info");
    validate(&settings).expect("defaults are valid");
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
api_base_url = "https://metrics.example.com/api"
request_timeout_secs = "15"
log_filter = "dashboard_core=debug"
"#,
    )
    .expect("file");

    assert_eq!(settings.api_base_url, "https://metrics.example.com/api");
    assert_eq!(settings.request_timeout(), Some(Duration::from_secs(15)));
    assert_eq!(settings.log_filter, "dashboard_core=debug");
}

#[test]
fn unquoted_integer_timeout_is_accepted() {
    let mut settings = Settings::default();
    apply_file(&mut settings, "request_timeout_secs = 15\n").expect("file");
    assert_eq!(settings.request_timeout(), Some(Duration::from_secs(15)));
}

#[test]
fn negative_timeout_in_file_is_rejected() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "request_timeout_secs = -5\n").is_err());
}

#[test]
fn non_string_base_url_is_rejected() {
    let mut settings = Settings::default();
    let err = apply_file(&mut settings, "api_base_url = 42\n").expect_err("should fail");
    assert!(err.to_string().contains("api_base_url"));
}

#[test]
fn prefixed_env_var_wins_over_plain_one() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env_map(&[
            ("DASHBOARD_API_URL", "http://plain.example.com"),
            ("APP__API_BASE_URL", "http://prefixed.example.com"),
        ]),
    )
    .expect("env");

    assert_eq!(settings.api_base_url, "http://prefixed.example.com");
}

#[test]
fn env_overrides_file_values() {
    let mut settings = Settings::default();
    apply_file(&mut settings, r#"request_timeout_secs = "15""#).expect("file");
    apply_env(
        &mut settings,
        env_map(&[("APP__REQUEST_TIMEOUT_SECS", "3"), ("APP__LOG_FILTER", "warn")]),
    )
    .expect("env");

    assert_eq!(settings.request_timeout(), Some(Duration::from_secs(3)));
    assert_eq!(settings.log_filter, "warn");
}

#[test]
fn zero_timeout_means_no_timeout() {
    let settings = Settings {
        request_timeout_secs: Some(0),
        ..Settings::default()
    };
    assert_eq!(settings.request_timeout(), None);
}

#[test]
fn non_numeric_timeout_is_rejected() {
    let mut settings = Settings::default();
    let err = apply_env(
        &mut settings,
        env_map(&[("APP__REQUEST_TIMEOUT_SECS", "soon")]),
    )
    .expect_err("should fail");
    assert!(err.to_string().contains("soon"));
}

#[test]
fn rejects_non_http_base_url() {
    let settings = Settings {
        api_base_url: "ftp://files.example.com".into(),
        ..Settings::default()
    };
    assert!(validate(&settings).is_err());

    let settings = Settings {
        api_base_url: "not a url".into(),
        ..Settings::default()
    };
    assert!(validate(&settings).is_err());
}

#[test]
fn explicit_missing_config_file_is_an_error() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let missing = env::temp_dir().join(format!("dashboard_cli_missing_{suffix}.toml"));

    assert!(load_settings(Some(&missing)).is_err());
}

#[test]
fn loads_explicit_config_file() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("dashboard_cli_test_{suffix}.toml"));
    fs::write(&path, r#"log_filter = "debug""#).expect("write config");

    let settings = load_settings(Some(&path));
    fs::remove_file(&path).expect("cleanup");

    let settings = settings.expect("settings");
    if env::var("APP__LOG_FILTER").is_err() {
        assert_eq!(settings.log_filter, "debug");
    }
}
