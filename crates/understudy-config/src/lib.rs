//! Configuration types and loading for understudy
//!
//! This crate provides:
//! - [`SessionConfig`] and its sections (mock defaults, verification reporting)
//! - Config loading (TOML format)
//! - Environment variable overrides
//!
//! # Usage
//!
//! ```rust,ignore
//! use understudy_config::{load_config_from_str, DefaultAnswerPolicy};
//!
//! let config = load_config_from_str(r#"
//! [mocks]
//! default_answer = "returns_empty_values"
//! "#)?;
//! assert_eq!(config.mocks.default_answer, DefaultAnswerPolicy::ReturnsEmptyValues);
//! ```

mod loader;

// Default constants for all configuration values
pub mod constants;

mod types;

pub use loader::{
    apply_env_overrides, apply_overrides_from, load_config, load_config_from_str, ConfigError,
};
pub use types::{
    DefaultAnswerPolicy, MockDefaults, ParseDefaultAnswerPolicyError, SessionConfig,
    VerificationConfig,
};
