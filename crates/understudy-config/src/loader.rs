//! Configuration loading and validation
//!
//! - [`load_config`] - Strict loader, errors if file missing (no side effects)
//! - [`load_config_from_str`] - Parse and validate TOML content
//! - [`apply_env_overrides`] - Layer `UNDERSTUDY_*` environment variables on top
//!
//! # Usage
//!
//! ```rust,ignore
//! use understudy_config::{apply_env_overrides, load_config};
//! use std::path::Path;
//!
//! let mut config = load_config(Path::new("understudy.toml"))?;
//! apply_env_overrides(&mut config)?;
//! ```

use crate::constants::{ENV_UNDERSTUDY_DEFAULT_ANSWER, ENV_UNDERSTUDY_LOG_INVOCATIONS};
use crate::types::{DefaultAnswerPolicy, ParseDefaultAnswerPolicyError};
use crate::SessionConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Errors that can occur during config loading
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid value for {variable}: {source}")]
    EnvError {
        variable: &'static str,
        #[source]
        source: ParseDefaultAnswerPolicyError,
    },

    #[error("Invalid value for {variable}: '{value}' is not a boolean")]
    EnvBoolError {
        variable: &'static str,
        value: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file (strict - no side effects)
///
/// # Returns
/// * `Ok(SessionConfig)` - Successfully loaded configuration
/// * `Err(ConfigError::NotFound)` - Config file does not exist
/// * `Err(ConfigError)` - Failed to read, parse or validate configuration
pub fn load_config(path: &Path) -> Result<SessionConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    debug!(path = %path.display(), "Loading config file");
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Load configuration from a TOML string
pub fn load_config_from_str(content: &str) -> Result<SessionConfig, ConfigError> {
    let config: SessionConfig = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Apply `UNDERSTUDY_*` environment overrides to `config`.
pub fn apply_env_overrides(config: &mut SessionConfig) -> Result<(), ConfigError> {
    apply_overrides_from(config, |name| std::env::var(name).ok())
}

/// Apply overrides read through `lookup` (environment-shaped key/value source).
pub fn apply_overrides_from<F>(config: &mut SessionConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(ENV_UNDERSTUDY_DEFAULT_ANSWER) {
        config.mocks.default_answer =
            raw.parse::<DefaultAnswerPolicy>().map_err(|source| ConfigError::EnvError {
                variable: ENV_UNDERSTUDY_DEFAULT_ANSWER,
                source,
            })?;
        debug!(policy = %config.mocks.default_answer, "Default answer overridden from environment");
    }

    if let Some(raw) = lookup(ENV_UNDERSTUDY_LOG_INVOCATIONS) {
        config.mocks.log_invocations = parse_bool(&raw).ok_or(ConfigError::EnvBoolError {
            variable: ENV_UNDERSTUDY_LOG_INVOCATIONS,
            value: raw.clone(),
        })?;
    }

    validate_config(config)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Validate configuration values
fn validate_config(config: &SessionConfig) -> Result<(), ConfigError> {
    let mut all_errors = Vec::new();

    if config.verification.max_listed_invocations == 0 {
        all_errors.push("verification.max_listed_invocations must be greater than 0".to_string());
    }

    if all_errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(all_errors.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_strict_fails_on_missing_file() {
        let result = load_config(Path::new("/nonexistent/path/understudy.toml"));
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_config_strict_loads_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("understudy.toml");

        std::fs::write(
            &config_path,
            r#"
[mocks]
default_answer = "returns_empty_values"
log_invocations = true

[verification]
max_listed_invocations = 5
"#,
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.mocks.default_answer, DefaultAnswerPolicy::ReturnsEmptyValues);
        assert!(config.mocks.log_invocations);
        assert_eq!(config.verification.max_listed_invocations, 5);
    }

    #[test]
    fn test_empty_string_gives_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn test_parse_error() {
        let err = load_config_from_str("[mocks]\ndefault_answer = \"smart\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_validation_rejects_zero_listing() {
        let err = load_config_from_str("[verification]\nmax_listed_invocations = 0").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(ref msg) if msg.contains("max_listed_invocations")));
    }

    #[test]
    fn test_overrides_applied() {
        let env: HashMap<&str, &str> = [
            (ENV_UNDERSTUDY_DEFAULT_ANSWER, "calls_real_methods"),
            (ENV_UNDERSTUDY_LOG_INVOCATIONS, "yes"),
        ]
        .into_iter()
        .collect();

        let mut config = SessionConfig::default();
        apply_overrides_from(&mut config, |k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.mocks.default_answer, DefaultAnswerPolicy::CallsRealMethods);
        assert!(config.mocks.log_invocations);
    }

    #[test]
    fn test_overrides_absent_leave_config_untouched() {
        let mut config = SessionConfig::default();
        apply_overrides_from(&mut config, |_| None).unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn test_bad_override_values() {
        let mut config = SessionConfig::default();
        let err = apply_overrides_from(&mut config, |k| {
            (k == ENV_UNDERSTUDY_DEFAULT_ANSWER).then(|| "smart".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::EnvError { .. }));

        let err = apply_overrides_from(&mut config, |k| {
            (k == ENV_UNDERSTUDY_LOG_INVOCATIONS).then(|| "maybe".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains("maybe"));
    }
}
