//! Understudy Core - Domain types for the test-double engine
//!
//! This crate contains the data model shared by every other understudy crate.
//! It has no knowledge of dispatch, recording or verification logic.
//!
//! # Architecture
//!
//! - `value` - Argument/result values and declared return kinds
//! - `capability` - The method surface a mock substitutes
//! - `matcher` - Per-argument matchers, method matchers and captors
//! - `invocation` - Recorded calls and their outcomes
//! - `mode` - Verification modes (times, at least, at most, never)
//! - `fault` - User-level failures carried through a mock
//! - `error` - Framework error types
//!
//! # Related Crates
//!
//! - Seams (answers, real objects): `understudy-ports`
//! - Engine (dispatch, stubbing, verification): `understudy-engine`

pub mod capability;
pub mod error;
pub mod fault;
pub mod invocation;
pub mod matcher;
pub mod mode;
pub mod value;

pub use capability::{Capability, MethodSignature};
pub use error::{Error, ErrorCategory, ErrorCode, Result};
pub use fault::Fault;
pub use invocation::{Invocation, MockId, Outcome, Sequence};
pub use matcher::{
    any, any_bool, any_float, any_int, any_text, arg_that, eq, is_null, ArgKind, ArgumentCaptor,
    Matcher, MethodMatcher, Predicate,
};
pub use mode::{at_least, at_least_once, at_most, at_most_once, never, times, VerificationMode};
pub use value::{render_args, ReturnKind, Value};
