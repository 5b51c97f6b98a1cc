//! Default constants for understudy configuration
//!
//! Single source of truth for default values. Everything that is
//! configurable has its default here.

// ============================================================================
// ENVIRONMENT VARIABLES
// ============================================================================

/// Overrides `mocks.default_answer` (e.g. `returns_empty_values`)
pub const ENV_UNDERSTUDY_DEFAULT_ANSWER: &str = "UNDERSTUDY_DEFAULT_ANSWER";

/// Overrides `mocks.log_invocations` (`true`/`false`/`1`/`0`)
pub const ENV_UNDERSTUDY_LOG_INVOCATIONS: &str = "UNDERSTUDY_LOG_INVOCATIONS";

// ============================================================================
// MOCKS
// ============================================================================

/// Emit a tracing event for every dispatched call
pub const DEFAULT_LOG_INVOCATIONS: bool = false;

// ============================================================================
// VERIFICATION
// ============================================================================

/// Maximum number of recorded calls listed in a verification failure message
pub const DEFAULT_MAX_LISTED_INVOCATIONS: usize = 20;
