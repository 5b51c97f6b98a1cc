//! Matcher engine
//!
//! Decides whether a [`MethodMatcher`] accepts a call's arguments. Arity is
//! checked once, when a matcher is handed to the engine for stubbing or
//! verification; at match time a length mismatch simply does not match.

use understudy_core::{Error, MethodMatcher, MethodSignature, Result, Value};

/// Does `matcher` accept `args`?
pub fn matches(matcher: &MethodMatcher, args: &[Value]) -> bool {
    matcher.len() == args.len()
        && matcher
            .matchers()
            .iter()
            .zip(args)
            .all(|(m, arg)| m.accepts(arg))
}

/// Reject a matcher whose length differs from the method's arity.
pub fn check_arity(mock: &str, signature: &MethodSignature, matcher: &MethodMatcher) -> Result<()> {
    if matcher.len() == signature.arity {
        Ok(())
    } else {
        Err(Error::ArityMismatch {
            mock: mock.to_string(),
            method: signature.name.clone(),
            expected: signature.arity,
            actual: matcher.len(),
        })
    }
}

/// Feed each captor position of `matcher` the corresponding argument.
pub fn capture(matcher: &MethodMatcher, args: &[Value]) {
    for (m, arg) in matcher.matchers().iter().zip(args) {
        if let Some(captor) = m.as_captor() {
            captor.record(arg.clone());
        }
    }
}
