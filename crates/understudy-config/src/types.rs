//! Configuration types for understudy

use crate::constants::{DEFAULT_LOG_INVOCATIONS, DEFAULT_MAX_LISTED_INVOCATIONS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Session Config
// ============================================================================

/// Configuration applied to every mock created by a session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub mocks: MockDefaults,
    #[serde(default)]
    pub verification: VerificationConfig,
}

// ============================================================================
// Mock Defaults
// ============================================================================

/// How unstubbed calls are answered when a mock has no explicit default answer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultAnswerPolicy {
    /// Zero value of the declared result type (0, false, null)
    #[default]
    ReturnsDefaults,
    /// Like `ReturnsDefaults`, but "" / [] / {} for text and containers
    ReturnsEmptyValues,
    /// Delegate to the real target when one exists, else `ReturnsDefaults`
    CallsRealMethods,
}

impl DefaultAnswerPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DefaultAnswerPolicy::ReturnsDefaults => "returns_defaults",
            DefaultAnswerPolicy::ReturnsEmptyValues => "returns_empty_values",
            DefaultAnswerPolicy::CallsRealMethods => "calls_real_methods",
        }
    }
}

impl fmt::Display for DefaultAnswerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised default-answer policy name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown default answer policy '{0}' (expected returns_defaults, returns_empty_values or calls_real_methods)")]
pub struct ParseDefaultAnswerPolicyError(pub String);

impl FromStr for DefaultAnswerPolicy {
    type Err = ParseDefaultAnswerPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "returns_defaults" | "defaults" => Ok(DefaultAnswerPolicy::ReturnsDefaults),
            "returns_empty_values" | "empty" => Ok(DefaultAnswerPolicy::ReturnsEmptyValues),
            "calls_real_methods" | "real" => Ok(DefaultAnswerPolicy::CallsRealMethods),
            other => Err(ParseDefaultAnswerPolicyError(other.to_string())),
        }
    }
}

/// Defaults for newly created mocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockDefaults {
    #[serde(default)]
    pub default_answer: DefaultAnswerPolicy,

    /// Emit a `tracing` debug event for every dispatched call
    #[serde(default = "default_log_invocations")]
    pub log_invocations: bool,
}

fn default_log_invocations() -> bool {
    DEFAULT_LOG_INVOCATIONS
}

impl Default for MockDefaults {
    fn default() -> Self {
        Self {
            default_answer: DefaultAnswerPolicy::default(),
            log_invocations: default_log_invocations(),
        }
    }
}

// ============================================================================
// Verification Config
// ============================================================================

/// Verification failure reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationConfig {
    /// Recorded calls listed in a failure message before truncating
    #[serde(default = "default_max_listed_invocations")]
    pub max_listed_invocations: usize,
}

fn default_max_listed_invocations() -> usize {
    DEFAULT_MAX_LISTED_INVOCATIONS
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            max_listed_invocations: default_max_listed_invocations(),
        }
    }
}
