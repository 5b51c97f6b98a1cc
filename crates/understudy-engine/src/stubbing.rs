//! Stub builder
//!
//! Returned by [`MockHandle::when`]. The first `then_*` call registers a stub
//! entry for the builder's matcher; every later call on the same builder
//! appends to that entry's action chain:
//!
//! ```
//! use understudy_core::{args, matchers, Capability, Fault, ReturnKind};
//! use understudy_engine::Session;
//!
//! let session = Session::new();
//! let list = session.mock(Capability::new("List").method("get", 1, ReturnKind::Reference));
//! list.when("get", matchers![3])
//!     .unwrap()
//!     .then_return(3)
//!     .then_return(4)
//!     .then_throw(Fault::of_kind("RuntimeException"));
//!
//! assert_eq!(list.call("get", args![3]).unwrap(), 3);
//! assert_eq!(list.call("get", args![3]).unwrap(), 4);
//! assert!(list.call("get", args![3]).is_err());
//! assert!(list.call("get", args![3]).is_err());
//! ```

use crate::handle::MockHandle;
use crate::registry::{Action, Registration};
use std::rc::Rc;
use tracing::{debug, warn};
use understudy_core::{Fault, MethodMatcher, Value};
use understudy_ports::Answer;

/// Chainable response configuration for one (method, matcher) pair.
#[derive(Debug)]
pub struct StubBuilder {
    mock: MockHandle,
    method: String,
    matcher: MethodMatcher,
    /// Index of the registered entry once the first action is added
    entry: Option<usize>,
    generation: u64,
}

impl StubBuilder {
    pub(crate) fn new(mock: MockHandle, method: &str, matcher: MethodMatcher) -> Self {
        let generation = mock.state().generation.get();
        Self {
            mock,
            method: method.to_string(),
            matcher,
            entry: None,
            generation,
        }
    }

    /// Yield `value`.
    pub fn then_return(self, value: impl Into<Value>) -> Self {
        self.push(Action::Return(value.into()))
    }

    /// Fail the call with `fault`.
    pub fn then_throw(self, fault: Fault) -> Self {
        self.push(Action::Throw(fault))
    }

    /// Compute the result from the invocation at dispatch time.
    pub fn then_answer<A: Answer + 'static>(self, answer: A) -> Self {
        self.push(Action::Invoke(Rc::new(answer)))
    }

    /// Delegate to the mock's real target at dispatch time.
    pub fn then_call_real_method(self) -> Self {
        self.push(Action::CallReal)
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn matcher(&self) -> &MethodMatcher {
        &self.matcher
    }

    fn push(mut self, action: Action) -> Self {
        let state = self.mock.state();
        if state.generation.get() != self.generation {
            warn!(
                mock = %state.name,
                method = %self.method,
                "Stub builder outlived a reset; action ignored"
            );
            return self;
        }

        let mut registry = state.registry.borrow_mut();
        match self.entry {
            Some(index) => {
                if !registry.append_action(&self.method, index, action) {
                    warn!(mock = %state.name, method = %self.method, index, "Stub entry vanished; action ignored");
                }
            }
            None => {
                let registration = registry.stub(&self.method, self.matcher.clone(), vec![action]);
                match registration {
                    Registration::Appended(index) => {
                        debug!(mock = %state.name, method = %self.method, matcher = %self.matcher, index, "Stub registered");
                    }
                    Registration::Replaced(index) => {
                        debug!(mock = %state.name, method = %self.method, matcher = %self.matcher, index, "Stub replaced");
                    }
                }
                self.entry = Some(registration.index());
            }
        }
        drop(registry);
        self
    }
}
