//! Verification modes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Assertion policy applied to a matching-call count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", content = "n", rename_all = "snake_case")]
pub enum VerificationMode {
    Times(usize),
    AtLeast(usize),
    AtMost(usize),
    /// Same as `Times(0)`
    Never,
}

impl VerificationMode {
    /// Does `count` satisfy this mode?
    pub fn check(&self, count: usize) -> bool {
        match *self {
            VerificationMode::Times(n) => count == n,
            VerificationMode::AtLeast(n) => count >= n,
            VerificationMode::AtMost(n) => count <= n,
            VerificationMode::Never => count == 0,
        }
    }
}

impl Default for VerificationMode {
    fn default() -> Self {
        VerificationMode::Times(1)
    }
}

impl fmt::Display for VerificationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationMode::Times(n) => write!(f, "exactly {} call(s)", n),
            VerificationMode::AtLeast(n) => write!(f, "at least {} call(s)", n),
            VerificationMode::AtMost(n) => write!(f, "at most {} call(s)", n),
            VerificationMode::Never => f.write_str("no calls"),
        }
    }
}

pub fn times(n: usize) -> VerificationMode {
    VerificationMode::Times(n)
}

pub fn never() -> VerificationMode {
    VerificationMode::Never
}

pub fn at_least(n: usize) -> VerificationMode {
    VerificationMode::AtLeast(n)
}

pub fn at_least_once() -> VerificationMode {
    VerificationMode::AtLeast(1)
}

pub fn at_most(n: usize) -> VerificationMode {
    VerificationMode::AtMost(n)
}

pub fn at_most_once() -> VerificationMode {
    VerificationMode::AtMost(1)
}
