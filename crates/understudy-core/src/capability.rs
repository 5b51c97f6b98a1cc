//! Capability surfaces: the interface a mock stands in for

use crate::error::{Error, Result};
use crate::value::ReturnKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One method of a capability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodSignature {
    pub name: String,
    pub arity: usize,
    #[serde(default)]
    pub returns: ReturnKind,
}

impl MethodSignature {
    pub fn new(name: impl Into<String>, arity: usize, returns: ReturnKind) -> Self {
        Self {
            name: name.into(),
            arity,
            returns,
        }
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} -> {}", self.name, self.arity, self.returns)
    }
}

/// The set of methods a mock can be called through.
///
/// ```
/// use understudy_core::{Capability, ReturnKind};
///
/// let list = Capability::new("List")
///     .method("add", 1, ReturnKind::Bool)
///     .method("size", 0, ReturnKind::Integer);
/// assert_eq!(list.signature("size").unwrap().arity, 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    pub name: String,
    #[serde(default)]
    pub methods: Vec<MethodSignature>,
}

impl Capability {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    /// Declare a method. Re-declaring a name replaces the earlier signature.
    pub fn method(mut self, name: impl Into<String>, arity: usize, returns: ReturnKind) -> Self {
        let signature = MethodSignature::new(name, arity, returns);
        match self.methods.iter_mut().find(|m| m.name == signature.name) {
            Some(existing) => *existing = signature,
            None => self.methods.push(signature),
        }
        self
    }

    /// Look up a declared method.
    pub fn signature(&self, method: &str) -> Result<&MethodSignature> {
        self.methods
            .iter()
            .find(|m| m.name == method)
            .ok_or_else(|| Error::UnknownMethod {
                capability: self.name.clone(),
                method: method.to_string(),
            })
    }

    pub fn has_method(&self, method: &str) -> bool {
        self.methods.iter().any(|m| m.name == method)
    }
}
