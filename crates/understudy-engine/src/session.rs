//! Test-session context
//!
//! A [`Session`] owns the state shared by every mock created through it: the
//! global sequence counter and the list of live mocks. Create one per test
//! and let it drop at the end; nothing survives it.
//!
//! ```
//! use understudy_core::{args, matchers, times, Capability, ReturnKind};
//! use understudy_engine::Session;
//!
//! let session = Session::new();
//! let list = session.mock(Capability::new("List").method("add", 1, ReturnKind::Bool));
//!
//! list.call("add", args![1]).unwrap();
//! list.verify("add", matchers![1], times(1)).unwrap();
//! session.verify_no_more_interactions(&list).unwrap();
//! ```

use crate::answers::answer_for_policy;
use crate::handle::{MockHandle, MockState};
use crate::recorder::{merge_logs, CallRecorder, SequenceCounter};
use crate::registry::StubRegistry;
use crate::settings::MockSettings;
use crate::verification::{self, InOrder};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use tracing::debug;
use understudy_config::{DefaultAnswerPolicy, SessionConfig};
use understudy_core::{Capability, Invocation, MockId, Result};
use understudy_ports::{real_object_ref, RealObject, RealObjectRef};

pub(crate) struct SessionState {
    pub(crate) config: SessionConfig,
    pub(crate) sequence: SequenceCounter,
    next_mock_id: Cell<u64>,
    mocks: RefCell<Vec<Weak<MockState>>>,
}

impl SessionState {
    fn allocate_id(&self) -> MockId {
        let id = self.next_mock_id.get() + 1;
        self.next_mock_id.set(id);
        MockId(id)
    }

    fn live_mocks(&self) -> Vec<Rc<MockState>> {
        let mut mocks = self.mocks.borrow_mut();
        mocks.retain(|weak| weak.strong_count() > 0);
        mocks.iter().filter_map(Weak::upgrade).collect()
    }
}

/// Owner of the shared state for one test's mocks.
pub struct Session {
    state: Rc<SessionState>,
}

impl Session {
    /// Session with default configuration.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            state: Rc::new(SessionState {
                config,
                sequence: SequenceCounter::new(),
                next_mock_id: Cell::new(0),
                mocks: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.state.config
    }

    /// Mock of `capability` using the session defaults.
    pub fn mock(&self, capability: Capability) -> MockHandle {
        self.mock_with(capability, MockSettings::default())
    }

    /// Mock of `capability` with explicit settings.
    pub fn mock_with(&self, capability: Capability, settings: MockSettings) -> MockHandle {
        let defaults = &self.state.config.mocks;
        let id = self.state.allocate_id();
        let name = settings
            .name
            .unwrap_or_else(|| default_mock_name(&capability.name));
        let calls_real_by_default =
            settings.spy || defaults.default_answer == DefaultAnswerPolicy::CallsRealMethods;
        let default_answer = settings
            .default_answer
            .unwrap_or_else(|| answer_for_policy(defaults.default_answer));
        let log_invocations = settings.log_invocations.unwrap_or(defaults.log_invocations);

        debug!(
            mock = %name,
            id = %id,
            capability = %capability.name,
            spy = settings.spy,
            has_real = settings.real.is_some(),
            "Mock created"
        );

        let state = Rc::new(MockState {
            id,
            recorder: RefCell::new(CallRecorder::new(id, name.clone())),
            registry: RefCell::new(StubRegistry::new()),
            generation: Cell::new(0),
            name,
            capability,
            real: settings.real,
            spy: settings.spy,
            calls_real_by_default,
            default_answer,
            log_invocations,
            session: Rc::clone(&self.state),
        });
        self.state.mocks.borrow_mut().push(Rc::downgrade(&state));
        MockHandle::from_state(state)
    }

    /// Spy over `real`: unstubbed calls run the real code.
    pub fn spy<R: RealObject + 'static>(&self, real: R) -> MockHandle {
        self.spy_ref(real_object_ref(real))
    }

    /// Spy over a real object the caller keeps a reference to.
    pub fn spy_ref(&self, real: RealObjectRef) -> MockHandle {
        let capability = real.borrow().capability();
        self.mock_with(capability, MockSettings::new().real_target_ref(real).spy())
    }

    /// Every invocation on every live mock of this session, in call order.
    pub fn global_log(&self) -> Vec<Rc<Invocation>> {
        let mocks = self.state.live_mocks();
        let recorders: Vec<_> = mocks.iter().map(|m| m.recorder.borrow()).collect();
        merge_logs(recorders.iter().map(|r| r.log()))
    }

    /// Number of live mocks created by this session.
    pub fn mock_count(&self) -> usize {
        self.state.live_mocks().len()
    }

    /// Ordered verifier over the given mocks' calls.
    pub fn in_order(&self, mocks: &[&MockHandle]) -> InOrder {
        verification::in_order(mocks)
    }

    /// Fails if any of `mocks` has recorded a call.
    pub fn verify_zero_interactions(&self, mocks: &[&MockHandle]) -> Result<()> {
        verification::verify_zero_interactions(mocks)
    }

    /// Fails if `mock` has a call no successful verification covered.
    pub fn verify_no_more_interactions(&self, mock: &MockHandle) -> Result<()> {
        mock.verify_no_more_interactions()
    }

    /// Return `mock` to its just-created state (log and stubs only).
    pub fn reset(&self, mock: &MockHandle) {
        mock.reset();
    }

    /// Reset every live mock of this session.
    pub fn reset_all(&self) {
        for mock in self.state.live_mocks() {
            mock.reset();
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.state.config)
            .field("sequence", &self.state.sequence.current())
            .finish()
    }
}

/// `List` -> `list`, `PersonDao` -> `personDao`.
fn default_mock_name(capability: &str) -> String {
    let mut chars = capability.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => "mock".to_string(),
    }
}
