use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "CATLOAD_ENV"));
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.api_base_url, "http://localhost:5000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(
        cfg.manifest_path,
        std::path::PathBuf::from("./config/catalogs.yaml")
    );
    assert_eq!(
        cfg.categories_path,
        std::path::PathBuf::from("./config/categories.yaml")
    );
    assert_eq!(cfg.request_timeout_secs, 10);
    assert_eq!(cfg.user_agent, "catload/0.1 (catalog-import)");
    assert_eq!(cfg.progress_every, 10);
    assert_eq!(cfg.inter_request_delay_ms, 0);
}

#[test]
fn api_base_url_override_strips_trailing_slash() {
    let mut map = HashMap::new();
    map.insert("CATLOAD_API_BASE_URL", "https://shop.example.com/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "https://shop.example.com");
}

#[test]
fn api_base_url_without_scheme_is_rejected() {
    let mut map = HashMap::new();
    map.insert("CATLOAD_API_BASE_URL", "localhost:5000");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CATLOAD_API_BASE_URL"),
        "expected InvalidEnvVar(CATLOAD_API_BASE_URL), got: {result:?}"
    );
}

#[test]
fn api_base_url_without_host_is_rejected() {
    let mut map = HashMap::new();
    map.insert("CATLOAD_API_BASE_URL", "http://");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CATLOAD_API_BASE_URL"
    ));
}

#[test]
fn request_timeout_override() {
    let mut map = HashMap::new();
    map.insert("CATLOAD_REQUEST_TIMEOUT_SECS", "30");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 30);
}

#[test]
fn request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("CATLOAD_REQUEST_TIMEOUT_SECS", "ten");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CATLOAD_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(CATLOAD_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn request_timeout_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("CATLOAD_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CATLOAD_REQUEST_TIMEOUT_SECS"
    ));
}

#[test]
fn progress_every_override() {
    let mut map = HashMap::new();
    map.insert("CATLOAD_PROGRESS_EVERY", "25");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.progress_every, 25);
}

#[test]
fn progress_every_invalid() {
    let mut map = HashMap::new();
    map.insert("CATLOAD_PROGRESS_EVERY", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CATLOAD_PROGRESS_EVERY"
    ));
}

#[test]
fn inter_request_delay_override() {
    let mut map = HashMap::new();
    map.insert("CATLOAD_INTER_REQUEST_DELAY_MS", "100");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.inter_request_delay_ms, 100);
}

#[test]
fn user_agent_override() {
    let mut map = HashMap::new();
    map.insert("CATLOAD_USER_AGENT", "custom-agent/2.0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.user_agent, "custom-agent/2.0");
}
