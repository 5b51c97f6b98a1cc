//! Stub registry
//!
//! Holds, per method, an ordered list of [`StubEntry`] values. Each entry
//! pairs a [`MethodMatcher`] with a queue of [`Action`]s.
//!
//! Rules:
//! - Registering a matcher pointwise-identical to an existing entry's matcher
//!   replaces that entry's queue; any other matcher appends a new entry.
//! - The first entry (in registration order) whose matcher accepts a call wins.
//! - A queue's last action is sticky: it is replayed on every later match.

use crate::matching;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use understudy_core::{Fault, MethodMatcher, Value};
use understudy_ports::AnswerRef;

/// One configured response.
#[derive(Clone)]
pub enum Action {
    Return(Value),
    Throw(Fault),
    /// Run a callback with the invocation and yield its result
    Invoke(AnswerRef),
    /// Delegate to the mock's real target
    CallReal,
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Return(v) => f.debug_tuple("Return").field(v).finish(),
            Action::Throw(fault) => f.debug_tuple("Throw").field(fault).finish(),
            Action::Invoke(_) => f.write_str("Invoke(<answer>)"),
            Action::CallReal => f.write_str("CallReal"),
        }
    }
}

/// A matcher with its action chain.
#[derive(Debug)]
pub struct StubEntry {
    matcher: MethodMatcher,
    actions: VecDeque<Action>,
}

impl StubEntry {
    fn new(matcher: MethodMatcher, actions: Vec<Action>) -> Self {
        Self {
            matcher,
            actions: actions.into(),
        }
    }

    pub fn matcher(&self) -> &MethodMatcher {
        &self.matcher
    }

    /// Actions not yet consumed, sticky tail included.
    pub fn remaining(&self) -> usize {
        self.actions.len()
    }

    /// Pop the next action, or peek it when it is the last one.
    fn next_action(&mut self) -> Option<Action> {
        if self.actions.len() > 1 {
            self.actions.pop_front()
        } else {
            self.actions.front().cloned()
        }
    }
}

/// Result of [`StubRegistry::stub`]: where the entry landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// A new entry was appended at this index
    Appended(usize),
    /// The queue of the existing entry at this index was replaced
    Replaced(usize),
}

impl Registration {
    pub fn index(&self) -> usize {
        match *self {
            Registration::Appended(i) | Registration::Replaced(i) => i,
        }
    }
}

/// Stub entries for one mock, keyed by method name.
#[derive(Debug, Default)]
pub struct StubRegistry {
    entries: HashMap<String, Vec<StubEntry>>,
}

impl StubRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `actions` for calls to `method` accepted by `matcher`.
    pub fn stub(&mut self, method: &str, matcher: MethodMatcher, actions: Vec<Action>) -> Registration {
        let entries = self.entries.entry(method.to_string()).or_default();
        match entries.iter().position(|e| e.matcher.same_as(&matcher)) {
            Some(index) => {
                entries[index].actions = actions.into();
                Registration::Replaced(index)
            }
            None => {
                entries.push(StubEntry::new(matcher, actions));
                Registration::Appended(entries.len() - 1)
            }
        }
    }

    /// Extend the chain of an existing entry. Returns false if it no longer exists.
    pub fn append_action(&mut self, method: &str, index: usize, action: Action) -> bool {
        match self.entries.get_mut(method).and_then(|e| e.get_mut(index)) {
            Some(entry) => {
                entry.actions.push_back(action);
                true
            }
            None => false,
        }
    }

    /// Pick the action for a call, advancing the selected entry's cursor.
    pub fn select(&mut self, method: &str, args: &[Value]) -> Option<Action> {
        let (index, _) = self
            .candidates(method)
            .into_iter()
            .find(|(_, matcher)| matching::matches(matcher, args))?;
        self.take_action(method, index)
    }

    /// Matchers of the entries for `method` that still hold actions, in
    /// registration order, paired with their entry index.
    ///
    /// Lets a caller evaluate argument predicates without holding a borrow
    /// of the registry.
    pub fn candidates(&self, method: &str) -> Vec<(usize, MethodMatcher)> {
        self.entries(method)
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.actions.is_empty())
            .map(|(i, e)| (i, e.matcher.clone()))
            .collect()
    }

    /// Next action of the entry at `index`. None if the entry is gone.
    pub fn take_action(&mut self, method: &str, index: usize) -> Option<Action> {
        self.entries
            .get_mut(method)?
            .get_mut(index)
            .and_then(StubEntry::next_action)
    }

    pub fn entries(&self, method: &str) -> &[StubEntry] {
        self.entries.get(method).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of entries across all methods.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use understudy_core::{any_int, args, matchers};

    fn returned(action: Option<Action>) -> Option<Value> {
        match action {
            Some(Action::Return(v)) => Some(v),
            _ => None,
        }
    }

    #[test]
    fn test_identical_matcher_replaces() {
        let mut registry = StubRegistry::new();
        let first = registry.stub("get", MethodMatcher::new(matchers![0]), vec![Action::Return(json!(0))]);
        let second = registry.stub("get", MethodMatcher::new(matchers![0]), vec![Action::Return(json!(2))]);

        assert_eq!(first, Registration::Appended(0));
        assert_eq!(second, Registration::Replaced(0));
        assert_eq!(registry.len(), 1);
        assert_eq!(returned(registry.select("get", &args![0])), Some(json!(2)));
        assert_eq!(returned(registry.select("get", &args![0])), Some(json!(2)));
    }

    #[test]
    fn test_different_matcher_appends() {
        let mut registry = StubRegistry::new();
        registry.stub("compare_to", MethodMatcher::new(matchers!["test"]), vec![Action::Return(json!(1))]);
        let reg = registry.stub("compare_to", MethodMatcher::new(matchers!["foo"]), vec![Action::Return(json!(2))]);

        assert_eq!(reg, Registration::Appended(1));
        assert_eq!(returned(registry.select("compare_to", &args!["test"])), Some(json!(1)));
        assert_eq!(returned(registry.select("compare_to", &args!["foo"])), Some(json!(2)));
        assert!(registry.select("compare_to", &args!["Not stub"]).is_none());
    }

    #[test]
    fn test_first_registered_match_wins() {
        let mut registry = StubRegistry::new();
        registry.stub("get", MethodMatcher::new(vec![any_int()]), vec![Action::Return(json!("any"))]);
        registry.stub("get", MethodMatcher::new(matchers![3]), vec![Action::Return(json!("three"))]);
        assert_eq!(returned(registry.select("get", &args![3])), Some(json!("any")));
    }

    #[test]
    fn test_candidates_then_take_action() {
        let mut registry = StubRegistry::new();
        registry.stub("get", MethodMatcher::new(matchers![1]), vec![Action::Return(json!("one"))]);
        registry.stub("get", MethodMatcher::new(matchers![2]), vec![Action::Return(json!("two"))]);

        let candidates = registry.candidates("get");
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[1].0, 1);
        assert_eq!(returned(registry.take_action("get", 1)), Some(json!("two")));

        registry.clear();
        assert!(registry.take_action("get", 1).is_none());
        assert!(registry.candidates("get").is_empty());
    }

    #[test]
    fn test_chain_consumes_in_order_with_sticky_tail() {
        let mut registry = StubRegistry::new();
        let reg = registry.stub("get", MethodMatcher::new(matchers![3]), vec![Action::Return(json!(3))]);
        assert!(registry.append_action("get", reg.index(), Action::Return(json!(4))));
        assert!(registry.append_action("get", reg.index(), Action::Throw(Fault::of_kind("RuntimeException"))));

        assert_eq!(returned(registry.select("get", &args![3])), Some(json!(3)));
        assert_eq!(returned(registry.select("get", &args![3])), Some(json!(4)));
        for _ in 0..3 {
            assert!(matches!(
                registry.select("get", &args![3]),
                Some(Action::Throw(ref f)) if f.is_kind("RuntimeException")
            ));
        }
        assert_eq!(registry.entries("get")[0].remaining(), 1);
    }

    #[test]
    fn test_append_to_missing_entry() {
        let mut registry = StubRegistry::new();
        assert!(!registry.append_action("get", 0, Action::CallReal));
    }

    #[test]
    fn test_empty_queue_does_not_match() {
        let mut registry = StubRegistry::new();
        registry.stub("size", MethodMatcher::new(matchers![]), Vec::new());
        assert!(registry.select("size", &args![]).is_none());
    }

    #[test]
    fn test_clear() {
        let mut registry = StubRegistry::new();
        registry.stub("size", MethodMatcher::new(matchers![]), vec![Action::Return(json!(10))]);
        assert!(!registry.is_empty());
        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.select("size", &args![]).is_none());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(128))]

            /// The i-th call yields the i-th action, then the last one forever
            #[test]
            fn proptest_chain_replays_last_action(
                values in prop::collection::vec(any::<i64>(), 1..8),
                calls in 1usize..20,
            ) {
                let mut registry = StubRegistry::new();
                let actions = values.iter().map(|v| Action::Return(json!(v))).collect();
                registry.stub("get", MethodMatcher::new(matchers![1]), actions);

                for i in 0..calls {
                    let expected = values[i.min(values.len() - 1)];
                    prop_assert_eq!(returned(registry.select("get", &args![1])), Some(json!(expected)));
                }
            }

            /// Re-stubbing the same matcher never grows the registry
            #[test]
            fn proptest_restub_keeps_one_entry(restubs in 1usize..10) {
                let mut registry = StubRegistry::new();
                for n in 0..restubs {
                    registry.stub("size", MethodMatcher::new(matchers![]), vec![Action::Return(json!(n))]);
                }
                prop_assert_eq!(registry.len(), 1);
                prop_assert_eq!(returned(registry.select("size", &args![])), Some(json!(restubs - 1)));
            }
        }
    }
}
