use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if any value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every setting has a default, so an empty environment yields a config that
/// targets a local admin API on port 5000.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("CATLOAD_ENV", "development"))?;
    let api_base_url = parse_base_url(&or_default(
        "CATLOAD_API_BASE_URL",
        "http://localhost:5000",
    ))?;
    let log_level = or_default("CATLOAD_LOG_LEVEL", "info");
    let manifest_path = PathBuf::from(or_default(
        "CATLOAD_MANIFEST_PATH",
        "./config/catalogs.yaml",
    ));
    let categories_path = PathBuf::from(or_default(
        "CATLOAD_CATEGORIES_PATH",
        "./config/categories.yaml",
    ));

    let request_timeout_secs = parse_u64("CATLOAD_REQUEST_TIMEOUT_SECS", "10")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "CATLOAD_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }
    let user_agent = or_default("CATLOAD_USER_AGENT", "catload/0.1 (catalog-import)");
    let progress_every = parse_usize("CATLOAD_PROGRESS_EVERY", "10")?;
    let inter_request_delay_ms = parse_u64("CATLOAD_INTER_REQUEST_DELAY_MS", "0")?;

    Ok(AppConfig {
        env,
        api_base_url,
        log_level,
        manifest_path,
        categories_path,
        request_timeout_secs,
        user_agent,
        progress_every,
        inter_request_delay_ms,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CATLOAD_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Validates the admin API origin and strips trailing slashes so endpoint
/// paths can be appended with a single `/`.
fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_scheme = trimmed.starts_with("http://") || trimmed.starts_with("https://");
    let has_host = trimmed
        .split_once("://")
        .is_some_and(|(_, rest)| !rest.is_empty());
    if !has_scheme || !has_host {
        return Err(ConfigError::InvalidEnvVar {
            var: "CATLOAD_API_BASE_URL".to_string(),
            reason: format!("'{raw}' is not an http(s) URL"),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
