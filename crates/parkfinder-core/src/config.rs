use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it from a
/// `HashMap`.
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

    let env = parse_environment(&or_default("PARKFINDER_ENV", "development"))?;
    let log_level = or_default("PARKFINDER_LOG_LEVEL", "info");
    let catalog_path = PathBuf::from(or_default("PARKFINDER_CATALOG_PATH", "./config/parks.yaml"));

    let geocoder_base_url = or_default("PARKFINDER_GEOCODER_BASE_URL", "https://api.postcodes.io");
    if !geocoder_base_url.starts_with("http://") && !geocoder_base_url.starts_with("https://") {
        return Err(ConfigError::InvalidEnvVar {
            var: "PARKFINDER_GEOCODER_BASE_URL".to_string(),
            reason: format!("expected an http(s) URL, got '{geocoder_base_url}'"),
        });
    }

    let geocoder_timeout_secs = parse_u64("PARKFINDER_GEOCODER_TIMEOUT_SECS", "10")?;
    if geocoder_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PARKFINDER_GEOCODER_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }

    let user_agent = or_default("PARKFINDER_USER_AGENT", "parkfinder/0.1 (park-discovery)");

    Ok(AppConfig {
        env,
        log_level,
        catalog_path,
        geocoder_base_url,
        geocoder_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PARKFINDER_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
