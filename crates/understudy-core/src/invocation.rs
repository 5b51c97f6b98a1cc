//! Recorded calls

use crate::fault::Fault;
use crate::value::{render_args, ReturnKind, Value};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::fmt;

/// Identity of a mock within its session (newtype for type safety)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MockId(pub u64);

impl fmt::Display for MockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Global ordering key assigned to every invocation in a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Sequence(pub u64);

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a dispatched call produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Returned(Value),
    /// Failed with a delegated fault
    Raised(Fault),
    /// Failed with a framework error (rendered)
    Rejected(String),
}

/// One recorded call to a mock.
///
/// Invocations are immutable apart from the outcome, filled in once dispatch
/// finishes, and the verified flag, set by successful verifications.
#[derive(Debug)]
pub struct Invocation {
    pub mock: MockId,
    pub mock_name: String,
    pub method: String,
    pub args: Vec<Value>,
    pub returns: ReturnKind,
    pub sequence: Sequence,
    outcome: RefCell<Option<Outcome>>,
    verified: Cell<bool>,
}

impl Invocation {
    pub fn new(
        mock: MockId,
        mock_name: impl Into<String>,
        method: impl Into<String>,
        args: Vec<Value>,
        returns: ReturnKind,
        sequence: Sequence,
    ) -> Self {
        Self {
            mock,
            mock_name: mock_name.into(),
            method: method.into(),
            args,
            returns,
            sequence,
            outcome: RefCell::new(None),
            verified: Cell::new(false),
        }
    }

    /// Argument at `index`, or null when out of range.
    pub fn arg(&self, index: usize) -> &Value {
        static NULL: Value = Value::Null;
        self.args.get(index).unwrap_or(&NULL)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome.borrow().clone()
    }

    pub fn set_outcome(&self, outcome: Outcome) {
        *self.outcome.borrow_mut() = Some(outcome);
    }

    pub fn is_verified(&self) -> bool {
        self.verified.get()
    }

    pub fn mark_verified(&self) {
        self.verified.set(true);
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}({})",
            self.mock_name,
            self.method,
            render_args(&self.args)
        )
    }
}
