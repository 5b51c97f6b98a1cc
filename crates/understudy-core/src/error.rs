//! Error types for the understudy domain

use crate::fault::Fault;
use crate::mode::VerificationMode;
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

// ============================================================================
// Error Codes - Machine-readable codes for tooling
// ============================================================================

/// Machine-readable error codes.
///
/// Error code ranges:
/// - 1xxx: Configuration errors (raised while setting up a mock)
/// - 2xxx: Verification errors (raised by `verify`-family calls)
/// - 3xxx: Delegated failures (produced by user code, carried verbatim)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u16")]
pub enum ErrorCode {
    // Configuration errors (1xxx)
    /// Matcher count differs from method arity (1001)
    ArityMismatch = 1001,
    /// Method not declared by the capability (1002)
    UnknownMethod = 1002,
    /// Real method requested but no real target exists (1003)
    NoRealMethod = 1003,
    /// Dispatched value does not fit the requested type (1004)
    ResultType = 1004,
    /// Mock not part of the in-order scope (1005)
    MockNotInOrder = 1005,
    /// In-order scope spans mocks from different sessions (1006)
    MixedSessions = 1006,

    // Verification errors (2xxx)
    /// Call count did not satisfy the verification mode (2001)
    VerificationFailed = 2001,
    /// Expected call not found after the in-order cursor (2002)
    OutOfOrder = 2002,
    /// Unverified invocations remain (2003)
    UnverifiedInteractions = 2003,
    /// Mock was expected to have no interactions (2004)
    UnexpectedInteractions = 2004,

    // Delegated failures (3xxx)
    /// Failure raised by a stubbed action, answer or real object (3001)
    Fault = 3001,
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

// ============================================================================
// Error Categories
// ============================================================================

/// Classification of errors by the phase that raises them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// Malformed setup, detected synchronously at the offending call
    Configuration,
    /// A verification assertion failed (the observable test failure)
    Verification,
    /// Not a framework error: the invocation's own result
    Delegated,
}

impl ErrorCategory {
    /// Get the category name as a string
    pub fn name(&self) -> &'static str {
        match self {
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::Verification => "verification",
            ErrorCategory::Delegated => "delegated",
        }
    }
}

impl ErrorCode {
    /// Get the numeric value of the error code
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    /// Get the category of this error code
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorCode::ArityMismatch
            | ErrorCode::UnknownMethod
            | ErrorCode::NoRealMethod
            | ErrorCode::ResultType
            | ErrorCode::MockNotInOrder
            | ErrorCode::MixedSessions => ErrorCategory::Configuration,

            ErrorCode::VerificationFailed
            | ErrorCode::OutOfOrder
            | ErrorCode::UnverifiedInteractions
            | ErrorCode::UnexpectedInteractions => ErrorCategory::Verification,

            ErrorCode::Fault => ErrorCategory::Delegated,
        }
    }

    /// Get the error code name as a string
    pub fn name(&self) -> &'static str {
        match self {
            ErrorCode::ArityMismatch => "ARITY_MISMATCH",
            ErrorCode::UnknownMethod => "UNKNOWN_METHOD",
            ErrorCode::NoRealMethod => "NO_REAL_METHOD",
            ErrorCode::ResultType => "RESULT_TYPE",
            ErrorCode::MockNotInOrder => "MOCK_NOT_IN_ORDER",
            ErrorCode::MixedSessions => "MIXED_SESSIONS",
            ErrorCode::VerificationFailed => "VERIFICATION_FAILED",
            ErrorCode::OutOfOrder => "OUT_OF_ORDER",
            ErrorCode::UnverifiedInteractions => "UNVERIFIED_INTERACTIONS",
            ErrorCode::UnexpectedInteractions => "UNEXPECTED_INTERACTIONS",
            ErrorCode::Fault => "FAULT",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Configuration errors
    #[error("{mock}.{method} takes {expected} argument(s) but {actual} matcher(s) were given")]
    ArityMismatch {
        mock: String,
        method: String,
        expected: usize,
        actual: usize,
    },

    #[error("{capability} has no method named '{method}'")]
    UnknownMethod { capability: String, method: String },

    /// `CallReal` was requested on a mock that wraps no real object.
    #[error("cannot call real method {mock}.{method}: the mock has no real target")]
    NoRealMethod { mock: String, method: String },

    #[error("{mock}.{method} returned {value}, which does not fit the requested type: {message}")]
    ResultType {
        mock: String,
        method: String,
        value: String,
        message: String,
    },

    #[error("{mock} was not passed to in_order()")]
    MockNotInOrder { mock: String },

    /// Sequence numbers are per session, so calls on mocks from different
    /// sessions have no common order.
    #[error("{mock} belongs to a different session than {first}; in_order() needs mocks from one session")]
    MixedSessions { mock: String, first: String },

    // Verification errors
    #[error("wanted {mode} of {mock}.{method}({wanted}) but was invoked {actual} time(s){listing}")]
    VerificationFailed {
        mock: String,
        method: String,
        wanted: String,
        mode: VerificationMode,
        actual: usize,
        /// Pre-rendered list of the mock's recorded calls (may be empty)
        listing: String,
    },

    #[error("wanted {mock}.{method}({wanted}) after the last verified call in order, but it was not found{listing}")]
    OutOfOrder {
        mock: String,
        method: String,
        wanted: String,
        listing: String,
    },

    #[error("no more interactions wanted on {mock}, but found unverified: {}", unverified.join(", "))]
    UnverifiedInteractions {
        mock: String,
        unverified: Vec<String>,
    },

    #[error("no interactions wanted on {mock}, but found: {}", found.join(", "))]
    UnexpectedInteractions { mock: String, found: Vec<String> },

    /// A failure produced by user code (a `Throw` action, an answer or a real
    /// object). Display and source pass straight through to the fault.
    #[error(transparent)]
    Fault(#[from] Fault),
}

impl Error {
    /// Get the machine-readable error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::ArityMismatch { .. } => ErrorCode::ArityMismatch,
            Error::UnknownMethod { .. } => ErrorCode::UnknownMethod,
            Error::NoRealMethod { .. } => ErrorCode::NoRealMethod,
            Error::ResultType { .. } => ErrorCode::ResultType,
            Error::MockNotInOrder { .. } => ErrorCode::MockNotInOrder,
            Error::MixedSessions { .. } => ErrorCode::MixedSessions,
            Error::VerificationFailed { .. } => ErrorCode::VerificationFailed,
            Error::OutOfOrder { .. } => ErrorCode::OutOfOrder,
            Error::UnverifiedInteractions { .. } => ErrorCode::UnverifiedInteractions,
            Error::UnexpectedInteractions { .. } => ErrorCode::UnexpectedInteractions,
            Error::Fault(_) => ErrorCode::Fault,
        }
    }

    /// Get the error code name (e.g., "ARITY_MISMATCH")
    pub fn code_name(&self) -> &'static str {
        self.code().name()
    }

    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        self.code().category()
    }

    /// Returns true for setup mistakes (arity, unknown method, ...).
    pub fn is_configuration(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }

    /// Returns true for failed verification assertions.
    pub fn is_verification(&self) -> bool {
        self.category() == ErrorCategory::Verification
    }

    /// The delegated fault, if this error carries one.
    pub fn as_fault(&self) -> Option<&Fault> {
        match self {
            Error::Fault(fault) => Some(fault),
            _ => None,
        }
    }

    /// Consume the error, returning the delegated fault if there is one.
    pub fn into_fault(self) -> Option<Fault> {
        match self {
            Error::Fault(fault) => Some(fault),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_arity() {
        let err = Error::ArityMismatch {
            mock: "list".to_string(),
            method: "get".to_string(),
            expected: 1,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "list.get takes 1 argument(s) but 2 matcher(s) were given"
        );
    }

    #[test]
    fn test_fault_is_transparent() {
        let fault = Fault::new("IOException", "stream closed");
        let err = Error::from(fault.clone());
        assert_eq!(err.to_string(), fault.to_string());
        assert_eq!(err.as_fault(), Some(&fault));
        assert_eq!(err.into_fault(), Some(fault));
    }

    #[test]
    fn test_error_code_values() {
        let err = Error::UnknownMethod {
            capability: "List".to_string(),
            method: "push".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::UnknownMethod);
        assert_eq!(err.code().as_u16(), 1002);
        assert_eq!(err.code_name(), "UNKNOWN_METHOD");
    }

    #[test]
    fn test_error_categories() {
        let config = Error::MockNotInOrder {
            mock: "list".to_string(),
        };
        assert!(config.is_configuration());
        assert!(!config.is_verification());

        let mixed = Error::MixedSessions {
            mock: "b".to_string(),
            first: "a".to_string(),
        };
        assert!(mixed.is_configuration());
        assert_eq!(mixed.code().as_u16(), 1006);

        let verification = Error::UnexpectedInteractions {
            mock: "list".to_string(),
            found: vec!["list.add(1)".to_string()],
        };
        assert!(verification.is_verification());

        let delegated = Error::Fault(Fault::new("RuntimeException", ""));
        assert_eq!(delegated.category(), ErrorCategory::Delegated);
        assert_eq!(delegated.category().name(), "delegated");
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::OutOfOrder).unwrap();
        assert_eq!(json, "2002");

        let json = serde_json::to_string(&ErrorCategory::Verification).unwrap();
        assert_eq!(json, "\"verification\"");
    }

    #[test]
    fn test_unverified_listing() {
        let err = Error::UnverifiedInteractions {
            mock: "list".to_string(),
            unverified: vec!["list.add(2)".to_string(), "list.clear()".to_string()],
        };
        assert!(err.to_string().ends_with("list.add(2), list.clear()"));
    }
}
