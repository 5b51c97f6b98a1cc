//! Per-mock settings

use std::fmt;
use std::rc::Rc;
use understudy_ports::{real_object_ref, Answer, AnswerRef, RealObject, RealObjectRef};

/// Options for [`Session::mock_with`](crate::Session::mock_with).
///
/// Anything left unset falls back to the session's configuration.
///
/// ```
/// use understudy_engine::{MockSettings, Returns, Session};
/// use understudy_core::{Capability, ReturnKind};
///
/// let session = Session::new();
/// let list = session.mock_with(
///     Capability::new("List").method("size", 0, ReturnKind::Integer),
///     MockSettings::new().name("numbers").default_answer(Returns::new(999)),
/// );
/// assert_eq!(list.call_as::<i64>("size", vec![]).unwrap(), 999);
/// ```
#[derive(Clone, Default)]
pub struct MockSettings {
    pub(crate) name: Option<String>,
    pub(crate) default_answer: Option<AnswerRef>,
    pub(crate) real: Option<RealObjectRef>,
    pub(crate) spy: bool,
    pub(crate) log_invocations: Option<bool>,
}

impl MockSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name used in invocation listings and error messages.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Strategy for calls no stub matches.
    pub fn default_answer<A: Answer + 'static>(mut self, answer: A) -> Self {
        self.default_answer = Some(Rc::new(answer));
        self
    }

    /// Real implementation reachable through `then_call_real_method`.
    pub fn real_target<R: RealObject + 'static>(self, real: R) -> Self {
        self.real_target_ref(real_object_ref(real))
    }

    /// Like [`real_target`](Self::real_target), sharing an existing reference.
    pub fn real_target_ref(mut self, real: RealObjectRef) -> Self {
        self.real = Some(real);
        self
    }

    /// Delegate every unstubbed call to the real target.
    pub fn spy(mut self) -> Self {
        self.spy = true;
        self
    }

    /// Emit a debug event for every dispatched call.
    pub fn log_invocations(mut self, enabled: bool) -> Self {
        self.log_invocations = Some(enabled);
        self
    }
}

impl fmt::Debug for MockSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockSettings")
            .field("name", &self.name)
            .field("default_answer", &self.default_answer.as_ref().map(|_| "<Answer>"))
            .field("real", &self.real.as_ref().map(|_| "<RealObject>"))
            .field("spy", &self.spy)
            .field("log_invocations", &self.log_invocations)
            .finish()
    }
}
