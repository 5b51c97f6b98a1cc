//! Real objects for spies and partial mocks
//!
//! - [`RealList`] - In-memory list, fails with `IndexOutOfBounds` like a linked list
//! - [`RealWidget`] - `do_something(i)` returns `i`

use crate::fixtures;
use tracing::trace;
use understudy_core::{Capability, Fault, Invocation, Value};
use understudy_ports::RealObject;

// ============================================================================
// Real List
// ============================================================================

/// An in-memory list implementing the [`fixtures::list`] capability.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RealList {
    items: Vec<Value>,
}

impl RealList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: impl IntoIterator<Item = Value>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    fn index(&self, arg: &Value) -> Result<usize, Fault> {
        let index = arg
            .as_i64()
            .ok_or_else(|| Fault::new("ClassCast", format!("{} is not an index", arg)))?;
        usize::try_from(index)
            .ok()
            .filter(|i| *i < self.items.len())
            .ok_or_else(|| Fault::index_out_of_bounds(index, self.items.len()))
    }
}

impl RealObject for RealList {
    fn capability(&self) -> Capability {
        fixtures::list()
    }

    fn invoke(&mut self, invocation: &Invocation) -> Result<Value, Fault> {
        trace!(invocation = %invocation, "RealList invoked");
        match invocation.method.as_str() {
            "add" => {
                self.items.push(invocation.arg(0).clone());
                Ok(Value::Bool(true))
            }
            "get" => {
                let index = self.index(invocation.arg(0))?;
                Ok(self.items[index].clone())
            }
            "size" => Ok(Value::from(self.items.len())),
            "contains" => Ok(Value::Bool(self.items.contains(invocation.arg(0)))),
            "is_empty" => Ok(Value::Bool(self.items.is_empty())),
            "clear" => {
                self.items.clear();
                Ok(Value::Null)
            }
            other => Err(Fault::new("UnsupportedOperation", other)),
        }
    }
}

// ============================================================================
// Real Widget
// ============================================================================

/// Concrete implementation of [`fixtures::widget`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RealWidget;

impl RealObject for RealWidget {
    fn capability(&self) -> Capability {
        fixtures::widget()
    }

    fn invoke(&mut self, invocation: &Invocation) -> Result<Value, Fault> {
        match invocation.method.as_str() {
            "do_something" => Ok(invocation.arg(0).clone()),
            other => Err(Fault::new("UnsupportedOperation", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use understudy_core::{args, MockId, ReturnKind, Sequence};

    fn call(method: &str, args: Vec<Value>) -> Invocation {
        Invocation::new(MockId(0), "real", method, args, ReturnKind::Reference, Sequence(1))
    }

    #[test]
    fn test_real_list_basics() {
        let mut list = RealList::new();
        assert_eq!(list.invoke(&call("add", args![1])), Ok(Value::Bool(true)));
        assert_eq!(list.invoke(&call("size", args![])), Ok(Value::from(1)));
        assert_eq!(list.invoke(&call("get", args![0])), Ok(Value::from(1)));
        assert_eq!(list.invoke(&call("contains", args![1])), Ok(Value::Bool(true)));
        list.invoke(&call("clear", args![])).unwrap();
        assert!(list.items().is_empty());
    }

    #[test]
    fn test_real_list_bounds() {
        let mut list = RealList::from_items(args!["a"]);
        assert_eq!(
            list.invoke(&call("get", args![1])),
            Err(Fault::index_out_of_bounds(1, 1))
        );
        assert_eq!(
            list.invoke(&call("get", args![-1])),
            Err(Fault::index_out_of_bounds(-1, 1))
        );
        assert!(list
            .invoke(&call("get", args!["zero"]))
            .unwrap_err()
            .is_kind("ClassCast"));
    }

    #[test]
    fn test_widget_echoes() {
        assert_eq!(RealWidget.invoke(&call("do_something", args![999])), Ok(Value::from(999)));
    }
}
