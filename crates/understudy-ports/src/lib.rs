//! Port trait definitions for understudy
//!
//! The engine calls out to user code through two seams:
//!
//! - [`Answer`]: computes a result for an invocation (answer callbacks,
//!   default-answer strategies)
//! - [`RealObject`]: the real implementation behind a spy or partial mock
//!
//! Engine state is single-threaded (see `understudy-engine`), so the shared
//! references below use `Rc` rather than `Arc`.

mod answer;
mod real_object;

pub use answer::Answer;
pub use real_object::RealObject;

use std::cell::RefCell;
use std::rc::Rc;

/// Shared reference to an answer
pub type AnswerRef = Rc<dyn Answer>;

/// Shared, mutable reference to a real object
pub type RealObjectRef = Rc<RefCell<dyn RealObject>>;

/// Wrap a real object for sharing with a mock.
pub fn real_object_ref<R: RealObject + 'static>(real: R) -> RealObjectRef {
    Rc::new(RefCell::new(real))
}
