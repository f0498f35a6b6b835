//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::RemoteConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variables that override file values.
pub const ENV_BASE_URL: &str = "SITE_API_BASE_URL";
pub const ENV_TENANT_ID: &str = "SITE_TENANT_ID";
pub const ENV_DEFAULT_LOCALE: &str = "SITE_DEFAULT_LOCALE";
pub const ENV_TIMEOUT_MS: &str = "SITE_API_TIMEOUT_MS";
pub const ENV_RETRIES: &str = "SITE_API_RETRIES";
pub const ENV_RETRY_DELAY_MS: &str = "SITE_API_RETRY_DELAY_MS";
pub const ENV_LOG_LEVEL: &str = "SITE_LOG_LEVEL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: '{value}'")]
    Env { var: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file, without env overrides.
pub fn load_config(path: &Path) -> Result<RemoteConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: RemoteConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Resolve the effective config: defaults, then the optional file, then the
/// process environment.
pub fn resolve_config(path: Option<&Path>) -> Result<RemoteConfig, ConfigError> {
    resolve_config_with(path, |_| {})
}

/// Like [`resolve_config`], with caller overrides (command-line flags)
/// applied last and validated together with everything else.
pub fn resolve_config_with<F>(path: Option<&Path>, overrides: F) -> Result<RemoteConfig, ConfigError>
where
    F: FnOnce(&mut RemoteConfig),
{
    let mut config = match path {
        Some(path) => toml::from_str(&fs::read_to_string(path)?)?,
        None => RemoteConfig::default(),
    };

    apply_env_overrides(&mut config, |var| std::env::var(var).ok())?;
    overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::debug!(
        api_base_url = %config.api_base_url,
        tenant = ?config.tenant_id,
        timeout_ms = config.timeout_ms,
        retries = config.retries,
        "Configuration resolved"
    );
    Ok(config)
}

/// Apply `SITE_*` overrides read through `lookup`.
pub fn apply_env_overrides<F>(config: &mut RemoteConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_BASE_URL) {
        config.api_base_url = url;
    }
    if let Some(tenant) = lookup(ENV_TENANT_ID) {
        config.tenant_id = Some(tenant);
    }
    if let Some(locale) = lookup(ENV_DEFAULT_LOCALE) {
        config.default_locale = locale;
    }
    if let Some(level) = lookup(ENV_LOG_LEVEL) {
        config.log_level = level;
    }
    if let Some(value) = lookup(ENV_TIMEOUT_MS) {
        config.timeout_ms = parse_env(ENV_TIMEOUT_MS, value)?;
    }
    if let Some(value) = lookup(ENV_RETRIES) {
        config.retries = parse_env(ENV_RETRIES, value)?;
    }
    if let Some(value) = lookup(ENV_RETRY_DELAY_MS) {
        config.retry_delay_ms = parse_env(ENV_RETRY_DELAY_MS, value)?;
    }
    Ok(())
}

fn parse_env<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Env { var, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_base_url = \"https://api.clean.example\"\nretries = 2").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.retries, 2);
        assert_eq!(config.api_base_url, "https://api.clean.example");
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "per_page = 500").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref e) if e.len() == 1));
        assert!(err.to_string().contains("per_page"));
    }

    #[test]
    fn test_env_overrides_win() {
        let env: HashMap<&str, &str> = [
            (ENV_BASE_URL, "https://env.example"),
            (ENV_TENANT_ID, "t1"),
            (ENV_RETRIES, "3"),
        ]
        .into_iter()
        .collect();

        let mut config = RemoteConfig::default();
        apply_env_overrides(&mut config, |k| env.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(config.api_base_url, "https://env.example");
        assert_eq!(config.tenant_id.as_deref(), Some("t1"));
        assert_eq!(config.retries, 3);
    }

    #[test]
    fn test_overrides_are_validated() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_base_url = \"https://api.clean.example\"").unwrap();

        let err = resolve_config_with(Some(file.path()), |config| {
            config.api_base_url = "ftp://files.clean.example".to_string();
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref e) if e.len() == 1));

        let config = resolve_config_with(Some(file.path()), |config| {
            config.api_base_url = "http://localhost:9000/api".to_string();
        })
        .unwrap();
        assert_eq!(config.api_base_url, "http://localhost:9000/api");
    }

    #[test]
    fn test_bad_numeric_env_is_reported() {
        let mut config = RemoteConfig::default();
        let err = apply_env_overrides(&mut config, |k| {
            (k == ENV_TIMEOUT_MS).then(|| "soon".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: ENV_TIMEOUT_MS, .. }));
    }
}
