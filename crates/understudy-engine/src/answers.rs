//! Built-in answers
//!
//! Default-answer strategies and a constant answer, all implementing
//! [`Answer`] so they can be installed with `MockSettings::default_answer`.

use std::rc::Rc;
use understudy_config::DefaultAnswerPolicy;
use understudy_core::{Fault, Invocation, Value};
use understudy_ports::{Answer, AnswerRef};

/// Zero value of the declared result type: 0, false, or null.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReturnsDefaults;

impl Answer for ReturnsDefaults {
    fn answer(&self, invocation: &Invocation) -> Result<Value, Fault> {
        Ok(invocation.returns.zero_value())
    }
}

/// Like [`ReturnsDefaults`], but text and containers come back empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReturnsEmptyValues;

impl Answer for ReturnsEmptyValues {
    fn answer(&self, invocation: &Invocation) -> Result<Value, Fault> {
        Ok(invocation.returns.empty_value())
    }
}

/// The same value for every call.
#[derive(Debug, Clone, PartialEq)]
pub struct Returns(pub Value);

impl Returns {
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }
}

impl Answer for Returns {
    fn answer(&self, _invocation: &Invocation) -> Result<Value, Fault> {
        Ok(self.0.clone())
    }
}

/// Answer backing a configured policy.
///
/// `CallsRealMethods` is answered by delegation before the default answer is
/// consulted; when no real target exists it falls back to zero values.
pub fn answer_for_policy(policy: DefaultAnswerPolicy) -> AnswerRef {
    match policy {
        DefaultAnswerPolicy::ReturnsDefaults | DefaultAnswerPolicy::CallsRealMethods => {
            Rc::new(ReturnsDefaults)
        }
        DefaultAnswerPolicy::ReturnsEmptyValues => Rc::new(ReturnsEmptyValues),
    }
}
