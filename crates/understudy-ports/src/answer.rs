//! Answer Port
//!
//! An answer turns an invocation into a result. It backs both
//! `then_answer` callbacks and a mock's default-answer strategy.

use understudy_core::{Fault, Invocation, Value};

/// Computes the result of an invocation.
///
/// Implemented for every `Fn(&Invocation) -> Result<Value, Fault>`, so plain
/// closures can be passed wherever an answer is expected.
pub trait Answer {
    /// Produce the result of `invocation`, or the fault it should fail with.
    fn answer(&self, invocation: &Invocation) -> Result<Value, Fault>;
}

impl<F> Answer for F
where
    F: Fn(&Invocation) -> Result<Value, Fault>,
{
    fn answer(&self, invocation: &Invocation) -> Result<Value, Fault> {
        self(invocation)
    }
}
