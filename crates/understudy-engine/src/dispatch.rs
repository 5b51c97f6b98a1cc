//! Invocation dispatch
//!
//! Order of work for one call:
//!
//! 1. Resolve the method against the capability (unknown methods fail here,
//!    before anything is recorded)
//! 2. Record the invocation
//! 3. Select the first stub entry accepting the arguments and run its next
//!    action
//! 4. Without a stub, delegate to the real target when the mock calls real
//!    methods by default, otherwise ask the default answer
//!
//! No registry or recorder borrow is held while an action runs or while
//! argument predicates are evaluated, so answers, real objects and
//! `arg_that` predicates may call back into the same mock.

use crate::handle::MockState;
use crate::matching;
use crate::registry::Action;
use tracing::{debug, trace};
use understudy_core::{Error, Invocation, Outcome, Result, Value};

pub(crate) fn dispatch(mock: &MockState, method: &str, args: Vec<Value>) -> Result<Value> {
    let returns = mock.capability.signature(method)?.returns;
    let invocation = mock
        .recorder
        .borrow_mut()
        .record(&mock.session.sequence, method, args, returns);

    let action = select_action(mock, method, &invocation.args);
    let stubbed = action.is_some();
    let result = match action {
        Some(action) => execute(mock, &invocation, action),
        None if mock.delegates_unstubbed() => call_real(mock, &invocation),
        None => mock
            .default_answer
            .answer(&invocation)
            .map_err(Error::from),
    };

    let outcome = match &result {
        Ok(value) => Outcome::Returned(value.clone()),
        Err(Error::Fault(fault)) => Outcome::Raised(fault.clone()),
        Err(e) => Outcome::Rejected(e.to_string()),
    };
    if mock.log_invocations {
        debug!(
            sequence = %invocation.sequence,
            invocation = %invocation,
            stubbed,
            outcome = ?outcome,
            "Invocation dispatched"
        );
    } else {
        trace!(
            sequence = %invocation.sequence,
            invocation = %invocation,
            stubbed,
            outcome = ?outcome,
            "Invocation dispatched"
        );
    }
    invocation.set_outcome(outcome);

    result
}

/// Registry selection with the matchers evaluated outside the borrow.
fn select_action(mock: &MockState, method: &str, args: &[Value]) -> Option<Action> {
    let candidates = mock.registry.borrow().candidates(method);
    let (index, _) = candidates
        .iter()
        .find(|(_, matcher)| matching::matches(matcher, args))?;
    // A predicate that reset the mock leaves no entry to take from.
    mock.registry.borrow_mut().take_action(method, *index)
}

fn execute(mock: &MockState, invocation: &Invocation, action: Action) -> Result<Value> {
    match action {
        Action::Return(value) => Ok(value),
        Action::Throw(fault) => Err(Error::Fault(fault)),
        Action::Invoke(answer) => answer.answer(invocation).map_err(Error::from),
        Action::CallReal => call_real(mock, invocation),
    }
}

fn call_real(mock: &MockState, invocation: &Invocation) -> Result<Value> {
    let real = mock.real.as_ref().ok_or_else(|| Error::NoRealMethod {
        mock: mock.name.clone(),
        method: invocation.method.clone(),
    })?;
    real.borrow_mut().invoke(invocation).map_err(Error::from)
}
