//! Test utilities for understudy
//!
//! Fixtures, real-object doubles and a small consumer application used by
//! the scenario suites in `tests/` and available to downstream crates.
//!
//! # Fixtures
//!
//! - [`fixtures::list`], [`fixtures::iterator`], [`fixtures::output_stream`],
//!   [`fixtures::comparable`], [`fixtures::person_dao`], [`fixtures::widget`],
//!   [`fixtures::directory`] - Capability surfaces
//! - [`fixtures::SAMPLE_CONFIG_TOML`] - A session config overriding every default
//!
//! # Real objects
//!
//! - [`RealList`] - Spy target with real bounds failures
//! - [`RealWidget`] - Partial-mock target
//!
//! # Consumers
//!
//! - [`Person`], [`PersonDao`], [`PersonService`] - Code under test
//! - [`MockPersonDao`] - Typed trait implementation over a mock handle
//!
//! # Usage
//!
//! ```
//! use understudy_core::{args, matchers};
//! use understudy_engine::Session;
//! use understudy_testing::{fixtures, RealList};
//!
//! let session = Session::new();
//! let spy = session.spy(RealList::new());
//! spy.call("add", args![1]).unwrap();
//! assert_eq!(spy.call("size", args![]).unwrap(), 1);
//! spy.verify_called("add", matchers![1]).unwrap();
//!
//! let list = session.mock(fixtures::list());
//! assert_eq!(list.call("size", args![]).unwrap(), 0);
//! ```

pub mod consumers;
pub mod doubles;
pub mod fixtures;
pub mod proptest_config;

pub use consumers::{MockPersonDao, Person, PersonDao, PersonService};
pub use doubles::{RealList, RealWidget};

/// Install a test-writer subscriber (idempotent).
pub fn init_tracing() {
    understudy_logging::init_test();
}
