//! Argument matchers
//!
//! A [`Matcher`] decides whether one argument is acceptable. A
//! [`MethodMatcher`] holds one matcher per argument position.
//!
//! Positions given as plain values match by deep equality. Explicit matchers
//! ([`any`], [`arg_that`], the typed wildcards, captors) override equality for
//! their position only.

use crate::value::Value;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Broad kind of a JSON argument, used by the typed wildcards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
    Integer,
    Float,
    Text,
    Bool,
    Null,
}

impl ArgKind {
    fn admits(&self, value: &Value) -> bool {
        match self {
            ArgKind::Integer => value.is_i64() || value.is_u64(),
            ArgKind::Float => value.is_number(),
            ArgKind::Text => value.is_string(),
            ArgKind::Bool => value.is_boolean(),
            ArgKind::Null => value.is_null(),
        }
    }

    fn helper_name(&self) -> &'static str {
        match self {
            ArgKind::Integer => "any_int()",
            ArgKind::Float => "any_float()",
            ArgKind::Text => "any_text()",
            ArgKind::Bool => "any_bool()",
            ArgKind::Null => "is_null()",
        }
    }
}

/// User-supplied predicate over one argument.
#[derive(Clone)]
pub struct Predicate {
    description: String,
    test: Rc<dyn Fn(&Value) -> bool>,
}

impl Predicate {
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Records arguments of verified invocations for later assertions.
///
/// Used as a matcher it accepts anything. Values are captured only when a
/// `verify` that includes the captor succeeds, one per counted invocation,
/// in call order.
#[derive(Clone, Default)]
pub struct ArgumentCaptor {
    values: Rc<RefCell<Vec<Value>>>,
}

impl ArgumentCaptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Matcher that captures into this captor.
    pub fn capture(&self) -> Matcher {
        Matcher::Capture(self.clone())
    }

    /// The most recently captured value.
    pub fn value(&self) -> Option<Value> {
        self.values.borrow().last().cloned()
    }

    /// The most recently captured value, deserialized into `T`.
    pub fn value_as<T: DeserializeOwned>(&self) -> Option<T> {
        self.value().and_then(|v| serde_json::from_value(v).ok())
    }

    pub fn all_values(&self) -> Vec<Value> {
        self.values.borrow().clone()
    }

    pub fn record(&self, value: Value) {
        self.values.borrow_mut().push(value);
    }

    fn same_as(&self, other: &ArgumentCaptor) -> bool {
        Rc::ptr_eq(&self.values, &other.values)
    }
}

impl fmt::Debug for ArgumentCaptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentCaptor")
            .field("captured", &self.values.borrow().len())
            .finish()
    }
}

/// Rule deciding whether a single argument is acceptable.
#[derive(Clone)]
pub enum Matcher {
    /// Deep equality with a literal value
    Eq(Value),
    /// Accepts any argument
    Any,
    /// Accepts any argument of a given kind
    Kind(ArgKind),
    /// Accepts arguments satisfying a predicate
    Predicate(Predicate),
    /// Accepts any argument and captures it on successful verification
    Capture(ArgumentCaptor),
}

impl Matcher {
    pub fn accepts(&self, arg: &Value) -> bool {
        match self {
            Matcher::Eq(expected) => expected == arg,
            Matcher::Any | Matcher::Capture(_) => true,
            Matcher::Kind(kind) => kind.admits(arg),
            Matcher::Predicate(p) => (p.test)(arg),
        }
    }

    /// Pointwise identity, used to decide whether re-stubbing replaces an entry.
    ///
    /// Closures cannot be compared, so predicates and captors are identical
    /// only to clones of themselves.
    pub fn same_as(&self, other: &Matcher) -> bool {
        match (self, other) {
            (Matcher::Eq(a), Matcher::Eq(b)) => a == b,
            (Matcher::Any, Matcher::Any) => true,
            (Matcher::Kind(a), Matcher::Kind(b)) => a == b,
            (Matcher::Predicate(a), Matcher::Predicate(b)) => Rc::ptr_eq(&a.test, &b.test),
            (Matcher::Capture(a), Matcher::Capture(b)) => a.same_as(b),
            _ => false,
        }
    }

    pub fn as_captor(&self) -> Option<&ArgumentCaptor> {
        match self {
            Matcher::Capture(captor) => Some(captor),
            _ => None,
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Eq(v) => write!(f, "{}", v),
            Matcher::Any => f.write_str("any()"),
            Matcher::Kind(kind) => f.write_str(kind.helper_name()),
            Matcher::Predicate(p) => write!(f, "arg_that({})", p.description),
            Matcher::Capture(_) => f.write_str("<captor>"),
        }
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Matcher({})", self)
    }
}

macro_rules! literal_matcher_from {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Matcher {
                fn from(value: $ty) -> Self {
                    Matcher::Eq(Value::from(value))
                }
            }
        )+
    };
}

literal_matcher_from!(Value, bool, i32, i64, u32, u64, usize, f64, String, &str);

/// Accepts any argument.
pub fn any() -> Matcher {
    Matcher::Any
}

/// Literal deep-equality matcher.
pub fn eq(value: impl Into<Value>) -> Matcher {
    Matcher::Eq(value.into())
}

/// Accepts arguments for which `predicate` returns true.
pub fn arg_that<F>(description: impl Into<String>, predicate: F) -> Matcher
where
    F: Fn(&Value) -> bool + 'static,
{
    Matcher::Predicate(Predicate {
        description: description.into(),
        test: Rc::new(predicate),
    })
}

/// Accepts any integer argument.
pub fn any_int() -> Matcher {
    Matcher::Kind(ArgKind::Integer)
}

/// Accepts any numeric argument.
pub fn any_float() -> Matcher {
    Matcher::Kind(ArgKind::Float)
}

/// Accepts any string argument.
pub fn any_text() -> Matcher {
    Matcher::Kind(ArgKind::Text)
}

/// Accepts any boolean argument.
pub fn any_bool() -> Matcher {
    Matcher::Kind(ArgKind::Bool)
}

/// Accepts only null.
pub fn is_null() -> Matcher {
    Matcher::Kind(ArgKind::Null)
}

/// Ordered per-position matchers for one method call.
#[derive(Clone, Debug, Default)]
pub struct MethodMatcher {
    matchers: Vec<Matcher>,
}

impl MethodMatcher {
    pub fn new(matchers: impl IntoIterator<Item = Matcher>) -> Self {
        Self {
            matchers: matchers.into_iter().collect(),
        }
    }

    /// Literal matcher for every argument.
    pub fn exact(args: &[Value]) -> Self {
        Self::new(args.iter().cloned().map(Matcher::Eq))
    }

    /// Wildcard for each of `arity` positions.
    pub fn any_args(arity: usize) -> Self {
        Self::new(std::iter::repeat(Matcher::Any).take(arity))
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    pub fn matchers(&self) -> &[Matcher] {
        &self.matchers
    }

    /// Structurally identical: same length and pointwise-identical positions.
    pub fn same_as(&self, other: &MethodMatcher) -> bool {
        self.matchers.len() == other.matchers.len()
            && self
                .matchers
                .iter()
                .zip(&other.matchers)
                .all(|(a, b)| a.same_as(b))
    }

    pub fn has_captors(&self) -> bool {
        self.matchers.iter().any(|m| m.as_captor().is_some())
    }
}

impl fmt::Display for MethodMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.matchers.iter().map(|m| m.to_string()).collect();
        f.write_str(&rendered.join(", "))
    }
}

impl From<Vec<Matcher>> for MethodMatcher {
    fn from(matchers: Vec<Matcher>) -> Self {
        Self { matchers }
    }
}

/// Build a `Vec<Matcher>` from literals and explicit matchers.
///
/// ```
/// use understudy_core::{matchers, any};
/// let m = matchers![1, any(), "text"];
/// assert_eq!(m.len(), 3);
/// ```
#[macro_export]
macro_rules! matchers {
    () => {
        ::std::vec::Vec::<$crate::Matcher>::new()
    };
    ($($m:expr),+ $(,)?) => {
        ::std::vec![$($crate::Matcher::from($m)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_literal_equality_is_deep() {
        let m = Matcher::from(json!({"id": 1, "name": "jack"}));
        assert!(m.accepts(&json!({"name": "jack", "id": 1})));
        assert!(!m.accepts(&json!({"id": 1, "name": "jill"})));
    }

    #[test]
    fn test_typed_wildcards() {
        assert!(any_int().accepts(&json!(999)));
        assert!(!any_int().accepts(&json!(1.5)));
        assert!(any_float().accepts(&json!(1.5)));
        assert!(any_float().accepts(&json!(2)));
        assert!(any_text().accepts(&json!("x")));
        assert!(any_bool().accepts(&json!(false)));
        assert!(is_null().accepts(&Value::Null));
        assert!(!is_null().accepts(&json!(0)));
    }

    #[test]
    fn test_predicate() {
        let one_or_two = arg_that("1 or 2", |v| v == &json!(1) || v == &json!(2));
        assert!(one_or_two.accepts(&json!(1)));
        assert!(one_or_two.accepts(&json!(2)));
        assert!(!one_or_two.accepts(&json!(3)));
        assert_eq!(one_or_two.to_string(), "arg_that(1 or 2)");
    }

    #[test]
    fn test_same_as() {
        assert!(Matcher::from(3).same_as(&eq(3)));
        assert!(!Matcher::from(3).same_as(&eq(4)));
        assert!(any().same_as(&any()));
        assert!(!any().same_as(&any_int()));

        let p = arg_that("always", |_| true);
        assert!(p.same_as(&p.clone()));
        assert!(!p.same_as(&arg_that("always", |_| true)));

        let captor = ArgumentCaptor::new();
        assert!(captor.capture().same_as(&captor.capture()));
        assert!(!captor.capture().same_as(&ArgumentCaptor::new().capture()));
    }

    #[test]
    fn test_method_matcher_identity() {
        let a = MethodMatcher::new(matchers![0]);
        let b = MethodMatcher::exact(&[json!(0)]);
        assert!(a.same_as(&b));
        assert!(!a.same_as(&MethodMatcher::new(matchers![3])));
        assert!(!a.same_as(&MethodMatcher::any_args(1)));
        assert!(MethodMatcher::new(matchers![]).same_as(&MethodMatcher::any_args(0)));
    }

    #[test]
    fn test_method_matcher_display() {
        let m = MethodMatcher::new(matchers![1, any(), "x"]);
        assert_eq!(m.to_string(), "1, any(), \"x\"");
    }

    #[test]
    fn test_captor_records() {
        let captor = ArgumentCaptor::new();
        assert!(captor.value().is_none());
        captor.record(json!(1));
        captor.record(json!({"id": 2}));
        assert_eq!(captor.value(), Some(json!({"id": 2})));
        assert_eq!(captor.all_values().len(), 2);
        assert!(captor.capture().accepts(&json!("anything")));
        assert!(MethodMatcher::new(vec![captor.capture()]).has_captors());
    }
}
