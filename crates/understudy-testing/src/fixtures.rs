//! Capability fixtures and sample data
//!
//! Capabilities shaped after the collection and I/O interfaces the scenario
//! suites mock, plus a sample session configuration.
//!
//! ```rust,ignore
//! use understudy_testing::fixtures;
//!
//! let session = understudy_engine::Session::new();
//! let list = session.mock(fixtures::list());
//! ```

use understudy_core::{Capability, ReturnKind};

/// Ordered collection: `add`, `get`, `size`, `contains`, `is_empty`, `clear`.
pub fn list() -> Capability {
    Capability::new("List")
        .method("add", 1, ReturnKind::Bool)
        .method("get", 1, ReturnKind::Reference)
        .method("size", 0, ReturnKind::Integer)
        .method("contains", 1, ReturnKind::Bool)
        .method("is_empty", 0, ReturnKind::Bool)
        .method("clear", 0, ReturnKind::Unit)
}

/// Cursor over a sequence: `next`, `has_next`.
pub fn iterator() -> Capability {
    Capability::new("Iterator")
        .method("next", 0, ReturnKind::Reference)
        .method("has_next", 0, ReturnKind::Bool)
}

/// Byte sink: `write`, `flush`, `close`.
pub fn output_stream() -> Capability {
    Capability::new("OutputStream")
        .method("write", 1, ReturnKind::Unit)
        .method("flush", 0, ReturnKind::Unit)
        .method("close", 0, ReturnKind::Unit)
}

pub fn comparable() -> Capability {
    Capability::new("Comparable").method("compare_to", 1, ReturnKind::Integer)
}

/// Storage seam used by [`PersonService`](crate::consumers::PersonService).
pub fn person_dao() -> Capability {
    Capability::new("PersonDao")
        .method("update", 1, ReturnKind::Unit)
        .method("find", 1, ReturnKind::Reference)
}

/// Concrete type whose real method is reachable through a partial mock.
pub fn widget() -> Capability {
    Capability::new("Widget").method("do_something", 1, ReturnKind::Integer)
}

/// Mapping with text and collection results, for empty-value answers.
pub fn directory() -> Capability {
    Capability::new("Directory")
        .method("lookup", 1, ReturnKind::Text)
        .method("entries", 0, ReturnKind::Collection)
        .method("attributes", 1, ReturnKind::Map)
        .method("ratio", 0, ReturnKind::Float)
}

/// Session configuration in TOML form, overriding every default.
pub const SAMPLE_CONFIG_TOML: &str = r#"
[mocks]
default_answer = "returns_empty_values"
log_invocations = true

[verification]
max_listed_invocations = 3
"#;
