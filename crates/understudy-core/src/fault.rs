//! User-level failures raised through a mock

use serde::{Deserialize, Serialize};
use std::fmt;

/// A failure produced by code the framework runs on the caller's behalf.
///
/// `Throw` actions, answer callbacks and real objects fail with a `Fault`.
/// The dispatcher hands it back exactly as it was produced, so tests can
/// compare the propagated fault with the one they configured.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fault {
    /// Failure class, e.g. "IndexOutOfBounds" or "IOException"
    pub kind: String,
    /// Human-readable detail (may be empty)
    pub message: String,
}

impl Fault {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// A fault with a kind and no message.
    pub fn of_kind(kind: impl Into<String>) -> Self {
        Self::new(kind, "")
    }

    /// Index outside `0..len`.
    pub fn index_out_of_bounds(index: i64, len: usize) -> Self {
        Self::new(
            "IndexOutOfBounds",
            format!("index {} out of bounds for length {}", index, len),
        )
    }

    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}

impl std::error::Error for Fault {}
