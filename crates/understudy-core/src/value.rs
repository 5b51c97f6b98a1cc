//! Argument and result values
//!
//! Every argument and result crossing a mock is a [`Value`]. Custom argument
//! types take part through `serde::Serialize`, which gives them structural
//! (value) equality when matched literally.

use serde::{Deserialize, Serialize};
use std::fmt;

pub use serde_json::Value;

/// Declared result type of a method, used to derive default answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnKind {
    /// No meaningful result
    #[default]
    Unit,
    Bool,
    Integer,
    Float,
    Text,
    Collection,
    Map,
    /// Any other object-like result
    Reference,
}

impl ReturnKind {
    /// Type-appropriate zero value: numeric 0, false, absent for everything else.
    pub fn zero_value(&self) -> Value {
        match self {
            ReturnKind::Bool => Value::Bool(false),
            ReturnKind::Integer => Value::from(0),
            ReturnKind::Float => Value::from(0.0),
            ReturnKind::Unit
            | ReturnKind::Text
            | ReturnKind::Collection
            | ReturnKind::Map
            | ReturnKind::Reference => Value::Null,
        }
    }

    /// Like [`zero_value`](Self::zero_value), but text and containers come back empty.
    pub fn empty_value(&self) -> Value {
        match self {
            ReturnKind::Text => Value::String(String::new()),
            ReturnKind::Collection => Value::Array(Vec::new()),
            ReturnKind::Map => Value::Object(serde_json::Map::new()),
            other => other.zero_value(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnKind::Unit => "unit",
            ReturnKind::Bool => "bool",
            ReturnKind::Integer => "integer",
            ReturnKind::Float => "float",
            ReturnKind::Text => "text",
            ReturnKind::Collection => "collection",
            ReturnKind::Map => "map",
            ReturnKind::Reference => "reference",
        }
    }
}

impl fmt::Display for ReturnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render an argument list the way invocations are printed: `1, "hello"`.
pub fn render_args(args: &[Value]) -> String {
    args.iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build an argument list from anything convertible into [`Value`].
///
/// ```
/// use understudy_core::args;
/// let args = args![1, "hello", true];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($arg)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_zero_values() {
        assert_eq!(ReturnKind::Integer.zero_value(), json!(0));
        assert_eq!(ReturnKind::Bool.zero_value(), json!(false));
        assert_eq!(ReturnKind::Float.zero_value(), json!(0.0));
        assert_eq!(ReturnKind::Text.zero_value(), Value::Null);
        assert_eq!(ReturnKind::Collection.zero_value(), Value::Null);
        assert_eq!(ReturnKind::Unit.zero_value(), Value::Null);
    }

    #[test]
    fn test_empty_values() {
        assert_eq!(ReturnKind::Text.empty_value(), json!(""));
        assert_eq!(ReturnKind::Collection.empty_value(), json!([]));
        assert_eq!(ReturnKind::Map.empty_value(), json!({}));
        assert_eq!(ReturnKind::Integer.empty_value(), json!(0));
        assert_eq!(ReturnKind::Reference.empty_value(), Value::Null);
    }

    #[test]
    fn test_render_args() {
        assert_eq!(render_args(&args![1, "hello"]), "1, \"hello\"");
        assert_eq!(render_args(&args![]), "");
    }

    #[test]
    fn test_return_kind_serde() {
        let kind: ReturnKind = serde_json::from_str("\"collection\"").unwrap();
        assert_eq!(kind, ReturnKind::Collection);
        assert_eq!(kind.to_string(), "collection");
    }
}
