//! # Understudy Engine
//!
//! Dispatch, stubbing and verification for understudy test doubles.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │  Test code / typed mock wrappers    │  <- understudy-testing
//! ├─────────────────────────────────────┤
//! │  Engine                             │  <- THIS CRATE
//! │  (Session, MockHandle, InOrder)     │
//! ├─────────────────────────────────────┤
//! │  Ports                              │  <- understudy-ports
//! │  (Answer, RealObject)               │
//! ├─────────────────────────────────────┤
//! │  Domain                             │  <- understudy-core
//! │  (Values, Matchers, Invocations)    │
//! └─────────────────────────────────────┘
//! ```
//!
//! ## Components
//!
//! - [`matching`] - Does a method matcher accept a call's arguments
//! - [`recorder`] - Per-mock call logs with session-wide sequence numbers
//! - [`registry`] - Per-mock stub entries and their action chains
//! - `dispatch` - Record, select, execute (internal)
//! - [`verification`] - Count checks, exhaustiveness checks, [`InOrder`]
//! - [`Session`] - Owner of the sequence counter and the live mocks
//!
//! State is single-threaded (`Rc`, `RefCell`): handles are neither `Send`
//! nor `Sync`, so a session cannot be shared across threads by accident.
//!
//! ## Usage
//!
//! ```
//! use understudy_engine::prelude::*;
//!
//! let session = Session::new();
//! let list = session.mock(
//!     Capability::new("List")
//!         .method("add", 1, ReturnKind::Bool)
//!         .method("get", 1, ReturnKind::Reference),
//! );
//!
//! list.when("get", matchers![0]).unwrap().then_return("first");
//! assert_eq!(list.call("get", args![0]).unwrap(), "first");
//! assert_eq!(list.call("get", args![1]).unwrap(), Value::Null);
//!
//! list.call("add", args!["one"]).unwrap();
//! list.verify("add", [any_text()], times(1)).unwrap();
//! list.verify_calls("get", times(2)).unwrap();
//! ```

pub mod answers;
mod dispatch;
mod handle;
pub mod matching;
pub mod recorder;
pub mod registry;
mod session;
mod settings;
mod stubbing;
pub mod verification;

pub use answers::{answer_for_policy, Returns, ReturnsDefaults, ReturnsEmptyValues};
pub use handle::MockHandle;
pub use session::Session;
pub use settings::MockSettings;
pub use stubbing::StubBuilder;
pub use verification::{in_order, reset, verify_no_more_interactions, verify_zero_interactions, InOrder};

/// Everything a test usually needs in one import.
pub mod prelude {
    pub use crate::{
        in_order, reset, verify_no_more_interactions, verify_zero_interactions, InOrder,
        MockHandle, MockSettings, Returns, ReturnsDefaults, ReturnsEmptyValues, Session,
        StubBuilder,
    };
    pub use understudy_config::{DefaultAnswerPolicy, SessionConfig};
    pub use understudy_core::{
        any, any_bool, any_float, any_int, any_text, arg_that, args, at_least, at_least_once,
        at_most, at_most_once, eq, is_null, matchers, never, times, ArgumentCaptor, Capability,
        Error, Fault, Invocation, Matcher, ReturnKind, Value, VerificationMode,
    };
    pub use understudy_ports::{Answer, RealObject};
}
