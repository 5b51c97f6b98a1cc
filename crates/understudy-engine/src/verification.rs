//! Verification engine
//!
//! Count-based checks ([`verify`]), exhaustiveness checks
//! ([`verify_no_more_interactions`], [`verify_zero_interactions`]) and the
//! cursor-based [`InOrder`] verifier.
//!
//! A successful check marks every invocation it counted as verified; those
//! marks are what `verify_no_more_interactions` inspects. Argument captors in
//! the checked matcher receive values only when the check succeeds.

use crate::handle::{MockHandle, MockState};
use crate::matching;
use crate::recorder::merge_logs;
use std::fmt::Write as _;
use std::rc::Rc;
use tracing::debug;
use understudy_config::constants::DEFAULT_MAX_LISTED_INVOCATIONS;
use understudy_core::{
    Error, Invocation, Matcher, MethodMatcher, Result, Sequence, VerificationMode,
};

/// Rendering of an absent matcher in failure messages.
const ANY_ARGS: &str = "<any>";

/// Check that calls to `method` accepted by `matcher` satisfy `mode`.
pub(crate) fn verify(
    mock: &MockState,
    method: &str,
    matcher: Option<&MethodMatcher>,
    mode: VerificationMode,
) -> Result<()> {
    let log = mock.recorder.borrow().log().to_vec();
    let counted: Vec<&Rc<Invocation>> = log
        .iter()
        .filter(|inv| accepts(inv, method, matcher))
        .collect();

    if !mode.check(counted.len()) {
        debug!(
            mock = %mock.name,
            method,
            mode = %mode,
            count = counted.len(),
            "Verification failed"
        );
        return Err(Error::VerificationFailed {
            mock: mock.name.clone(),
            method: method.to_string(),
            wanted: render_matcher(matcher),
            mode,
            actual: counted.len(),
            listing: listing(&log, mock.session.config.verification.max_listed_invocations),
        });
    }

    for invocation in &counted {
        invocation.mark_verified();
        if let Some(matcher) = matcher {
            matching::capture(matcher, &invocation.args);
        }
    }
    debug!(
        mock = %mock.name,
        method,
        mode = %mode,
        count = counted.len(),
        "Verification passed"
    );
    Ok(())
}

/// Fail if `mock` has an invocation no successful verification covered.
pub(crate) fn check_no_more_interactions(mock: &MockState) -> Result<()> {
    let unverified: Vec<String> = mock
        .recorder
        .borrow()
        .log()
        .iter()
        .filter(|inv| !inv.is_verified())
        .map(|inv| inv.to_string())
        .collect();

    if unverified.is_empty() {
        debug!(mock = %mock.name, "No unverified interactions");
        Ok(())
    } else {
        Err(Error::UnverifiedInteractions {
            mock: mock.name.clone(),
            unverified,
        })
    }
}

/// Fail on the first of `mocks` whose log is not empty.
pub fn verify_zero_interactions(mocks: &[&MockHandle]) -> Result<()> {
    for mock in mocks {
        let state = mock.state();
        let recorder = state.recorder.borrow();
        if !recorder.is_empty() {
            return Err(Error::UnexpectedInteractions {
                mock: state.name.clone(),
                found: recorder.log().iter().map(|inv| inv.to_string()).collect(),
            });
        }
    }
    Ok(())
}

/// Fail if `mock` has an invocation no successful verification covered.
pub fn verify_no_more_interactions(mock: &MockHandle) -> Result<()> {
    mock.verify_no_more_interactions()
}

/// Ordered verifier over the calls of `mocks`.
pub fn in_order(mocks: &[&MockHandle]) -> InOrder {
    InOrder::new(mocks)
}

/// Clear `mock`'s recorded calls and stubs.
pub fn reset(mock: &MockHandle) {
    mock.reset();
}

/// Cursor over the merged call log of a fixed set of mocks.
///
/// Each successful [`verify`](InOrder::verify) moves the cursor just past the
/// invocation it matched. Calls at or before the cursor can never satisfy a
/// later check. The log is read at check time, so calls made after the
/// verifier was created are visible to it.
///
/// All mocks in scope must come from one [`Session`](crate::Session);
/// otherwise every check fails with `MixedSessions`.
#[derive(Debug)]
pub struct InOrder {
    scope: Vec<MockHandle>,
    cursor: Option<Sequence>,
    max_listed: usize,
    /// First in-scope mock created by a different session than `scope[0]`
    foreign: Option<MockHandle>,
}

impl InOrder {
    fn new(mocks: &[&MockHandle]) -> Self {
        let max_listed = mocks
            .first()
            .map(|m| m.state().session.config.verification.max_listed_invocations)
            .unwrap_or(DEFAULT_MAX_LISTED_INVOCATIONS);
        let foreign = mocks.split_first().and_then(|(first, rest)| {
            rest.iter()
                .find(|m| !Rc::ptr_eq(&m.state().session, &first.state().session))
                .map(|m| MockHandle::clone(m))
        });
        Self {
            scope: mocks.iter().map(|m| (*m).clone()).collect(),
            cursor: None,
            max_listed,
            foreign,
        }
    }

    /// Expect the next matching call (after the cursor) to be
    /// `mock.method(matchers..)`.
    pub fn verify(
        &mut self,
        mock: &MockHandle,
        method: &str,
        matchers: impl IntoIterator<Item = Matcher>,
    ) -> Result<()> {
        self.check_scope(mock)?;
        let matcher = mock.checked_matcher(method, MethodMatcher::new(matchers))?;
        self.advance(mock, method, Some(&matcher))
    }

    /// Like [`verify`](InOrder::verify), accepting any arguments.
    pub fn verify_any(&mut self, mock: &MockHandle, method: &str) -> Result<()> {
        self.check_scope(mock)?;
        mock.capability().signature(method)?;
        self.advance(mock, method, None)
    }

    /// Sequence number of the last invocation matched, if any.
    pub fn cursor(&self) -> Option<Sequence> {
        self.cursor
    }

    fn check_scope(&self, mock: &MockHandle) -> Result<()> {
        if let (Some(foreign), Some(first)) = (&self.foreign, self.scope.first()) {
            return Err(Error::MixedSessions {
                mock: foreign.name().to_string(),
                first: first.name().to_string(),
            });
        }
        if self.scope.contains(mock) {
            Ok(())
        } else {
            Err(Error::MockNotInOrder {
                mock: mock.name().to_string(),
            })
        }
    }

    fn remaining(&self) -> Vec<Rc<Invocation>> {
        let recorders: Vec<_> = self
            .scope
            .iter()
            .map(|m| m.state().recorder.borrow())
            .collect();
        let mut merged = merge_logs(recorders.iter().map(|r| r.log()));
        if let Some(cursor) = self.cursor {
            merged.retain(|inv| inv.sequence > cursor);
        }
        merged
    }

    fn advance(
        &mut self,
        mock: &MockHandle,
        method: &str,
        matcher: Option<&MethodMatcher>,
    ) -> Result<()> {
        let remaining = self.remaining();
        let found = remaining
            .iter()
            .find(|inv| inv.mock == mock.id() && accepts(inv, method, matcher));

        match found {
            Some(invocation) => {
                invocation.mark_verified();
                if let Some(matcher) = matcher {
                    matching::capture(matcher, &invocation.args);
                }
                debug!(
                    invocation = %invocation,
                    sequence = %invocation.sequence,
                    "In-order verification passed"
                );
                self.cursor = Some(invocation.sequence);
                Ok(())
            }
            None => {
                debug!(
                    mock = %mock.name(),
                    method,
                    cursor = ?self.cursor,
                    "In-order verification failed"
                );
                Err(Error::OutOfOrder {
                    mock: mock.name().to_string(),
                    method: method.to_string(),
                    wanted: render_matcher(matcher),
                    listing: listing(&remaining, self.max_listed),
                })
            }
        }
    }
}

fn accepts(invocation: &Invocation, method: &str, matcher: Option<&MethodMatcher>) -> bool {
    invocation.method == method
        && matcher.map_or(true, |m| matching::matches(m, &invocation.args))
}

fn render_matcher(matcher: Option<&MethodMatcher>) -> String {
    matcher.map_or_else(|| ANY_ARGS.to_string(), |m| m.to_string())
}

/// Multi-line rendering of `log`, capped at `limit` entries.
fn listing(log: &[Rc<Invocation>], limit: usize) -> String {
    if log.is_empty() {
        return String::new();
    }
    let mut out = String::from("\nrecorded invocations:");
    for invocation in log.iter().take(limit) {
        let _ = write!(out, "\n  {} {}", invocation.sequence, invocation);
    }
    if log.len() > limit {
        let _ = write!(out, "\n  ... and {} more", log.len() - limit);
    }
    out
}
