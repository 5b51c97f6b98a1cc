//! Mock handles
//!
//! A [`MockHandle`] ties a capability surface to its call recorder, stub
//! registry, optional real target and default answer. Handles are cheap to
//! clone; clones refer to the same mock.
//!
//! Typed wrappers implement a domain trait by forwarding each method to
//! [`MockHandle::call`] (or [`MockHandle::call_as`]), which is how a Rust
//! trait object becomes a mock:
//!
//! ```
//! use understudy_core::{args, Capability, Result, ReturnKind};
//! use understudy_engine::{MockHandle, Session};
//!
//! trait Counter {
//!     fn increment(&self, by: i64) -> Result<i64>;
//! }
//!
//! struct MockCounter(MockHandle);
//!
//! impl Counter for MockCounter {
//!     fn increment(&self, by: i64) -> Result<i64> {
//!         self.0.call_as("increment", args![by])
//!     }
//! }
//!
//! let session = Session::new();
//! let handle = session.mock(Capability::new("Counter").method("increment", 1, ReturnKind::Integer));
//! handle.when("increment", [understudy_core::any_int()]).unwrap().then_return(41);
//!
//! let counter = MockCounter(handle.clone());
//! assert_eq!(counter.increment(1).unwrap(), 41);
//! ```

use crate::dispatch;
use crate::matching;
use crate::recorder::CallRecorder;
use crate::registry::StubRegistry;
use crate::session::SessionState;
use crate::stubbing::StubBuilder;
use crate::verification;
use serde::de::DeserializeOwned;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use tracing::debug;
use understudy_core::{
    Capability, Error, Invocation, Matcher, MethodMatcher, MockId, Result, Value,
    VerificationMode,
};
use understudy_ports::{AnswerRef, RealObjectRef};

pub(crate) struct MockState {
    pub(crate) id: MockId,
    pub(crate) name: String,
    pub(crate) capability: Capability,
    pub(crate) real: Option<RealObjectRef>,
    pub(crate) spy: bool,
    /// Unstubbed calls go to `real` when it is present
    pub(crate) calls_real_by_default: bool,
    pub(crate) default_answer: AnswerRef,
    pub(crate) log_invocations: bool,
    pub(crate) recorder: RefCell<CallRecorder>,
    pub(crate) registry: RefCell<StubRegistry>,
    /// Bumped by every reset, invalidating outstanding stub builders
    pub(crate) generation: Cell<u64>,
    pub(crate) session: Rc<SessionState>,
}

impl MockState {
    pub(crate) fn delegates_unstubbed(&self) -> bool {
        self.calls_real_by_default && self.real.is_some()
    }

    /// Clear log and stubs. Real target and default answer stay.
    pub(crate) fn reset(&self) {
        let calls = self.recorder.borrow().len();
        let stubs = self.registry.borrow().len();
        self.recorder.borrow_mut().clear();
        self.registry.borrow_mut().clear();
        self.generation.set(self.generation.get() + 1);
        debug!(mock = %self.name, calls, stubs, "Mock reset");
    }
}

/// Handle to one mock (or spy) in a [`Session`](crate::Session).
#[derive(Clone)]
pub struct MockHandle {
    state: Rc<MockState>,
}

impl MockHandle {
    pub(crate) fn from_state(state: Rc<MockState>) -> Self {
        Self { state }
    }

    pub(crate) fn state(&self) -> &MockState {
        &self.state
    }

    pub fn id(&self) -> MockId {
        self.state.id
    }

    pub fn name(&self) -> &str {
        &self.state.name
    }

    pub fn capability(&self) -> &Capability {
        &self.state.capability
    }

    /// True for mocks created with [`Session::spy`](crate::Session::spy).
    pub fn is_spy(&self) -> bool {
        self.state.spy
    }

    pub fn has_real_target(&self) -> bool {
        self.state.real.is_some()
    }

    // =========================================================================
    // Exercise
    // =========================================================================

    /// Call `method` through the mock.
    ///
    /// Failures from `Throw` actions, answers and real objects come back as
    /// [`Error::Fault`] carrying the original fault.
    pub fn call(&self, method: &str, args: Vec<Value>) -> Result<Value> {
        dispatch::dispatch(&self.state, method, args)
    }

    /// Call `method` and deserialize the result into `T`.
    pub fn call_as<T: DeserializeOwned>(&self, method: &str, args: Vec<Value>) -> Result<T> {
        let value = self.call(method, args)?;
        serde_json::from_value(value.clone()).map_err(|e| Error::ResultType {
            mock: self.state.name.clone(),
            method: method.to_string(),
            value: value.to_string(),
            message: e.to_string(),
        })
    }

    // =========================================================================
    // Setup
    // =========================================================================

    /// Start configuring responses for calls to `method` whose arguments are
    /// accepted by `matchers` (one per argument).
    ///
    /// Nothing is evaluated here: actions run only when a matching call is
    /// dispatched, so a spy can be stubbed for arguments its real code would
    /// reject.
    pub fn when(
        &self,
        method: &str,
        matchers: impl IntoIterator<Item = Matcher>,
    ) -> Result<StubBuilder> {
        let matcher = self.checked_matcher(method, MethodMatcher::new(matchers))?;
        Ok(StubBuilder::new(self.clone(), method, matcher))
    }

    // =========================================================================
    // Verification
    // =========================================================================

    /// Check the number of calls to `method` accepted by `matchers`.
    pub fn verify(
        &self,
        method: &str,
        matchers: impl IntoIterator<Item = Matcher>,
        mode: VerificationMode,
    ) -> Result<()> {
        let matcher = self.checked_matcher(method, MethodMatcher::new(matchers))?;
        verification::verify(&self.state, method, Some(&matcher), mode)
    }

    /// Shorthand for `verify(method, matchers, times(1))`.
    pub fn verify_called(
        &self,
        method: &str,
        matchers: impl IntoIterator<Item = Matcher>,
    ) -> Result<()> {
        self.verify(method, matchers, VerificationMode::default())
    }

    /// Check the number of calls to `method`, whatever their arguments.
    pub fn verify_calls(&self, method: &str, mode: VerificationMode) -> Result<()> {
        self.state.capability.signature(method)?;
        verification::verify(&self.state, method, None, mode)
    }

    /// Fails if any recorded call was not covered by a successful verification.
    pub fn verify_no_more_interactions(&self) -> Result<()> {
        verification::check_no_more_interactions(&self.state)
    }

    /// This mock's invocations in call order.
    pub fn invocations(&self) -> Vec<Rc<Invocation>> {
        self.state.recorder.borrow().log().to_vec()
    }

    /// Number of stub entries currently registered.
    pub fn stub_count(&self) -> usize {
        self.state.registry.borrow().len()
    }

    /// Clear recorded calls and stubs; keep the real target and default answer.
    pub fn reset(&self) {
        self.state.reset();
    }

    pub(crate) fn checked_matcher(&self, method: &str, matcher: MethodMatcher) -> Result<MethodMatcher> {
        let signature = self.state.capability.signature(method)?;
        matching::check_arity(&self.state.name, signature, &matcher)?;
        Ok(matcher)
    }
}

impl PartialEq for MockHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl Eq for MockHandle {}

impl fmt::Debug for MockHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockHandle")
            .field("id", &self.state.id)
            .field("name", &self.state.name)
            .field("capability", &self.state.capability.name)
            .field("spy", &self.state.spy)
            .finish()
    }
}
