//! Real Object Port
//!
//! Defines the trait a real implementation exposes so a mock can delegate to
//! it: every unstubbed call for a spy, or `then_call_real_method` for a
//! partial mock.

use understudy_core::{Capability, Fault, Invocation, Value};

/// A real implementation reachable through a mock.
///
/// Failures the real code raises (e.g. a bounds violation) are returned as
/// a [`Fault`] and propagate to the mock's caller unchanged.
pub trait RealObject {
    /// The methods this object implements.
    fn capability(&self) -> Capability;

    /// Run the real method named by `invocation`.
    fn invoke(&mut self, invocation: &Invocation) -> Result<Value, Fault>;
}
