//! Call recording
//!
//! Every call made to a mock is appended to that mock's [`CallRecorder`]
//! before anything else happens. Sequence numbers come from a
//! [`SequenceCounter`] shared by all mocks of a session, which makes them the
//! ordering key for cross-mock verification.

use std::cell::Cell;
use std::rc::Rc;
use understudy_core::{Invocation, MockId, ReturnKind, Sequence, Value};

/// Monotonic sequence source, one per session.
#[derive(Debug, Default)]
pub struct SequenceCounter {
    last: Cell<u64>,
}

impl SequenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next sequence number; the first is 1.
    pub fn next(&self) -> Sequence {
        let next = self.last.get() + 1;
        self.last.set(next);
        Sequence(next)
    }

    /// Last number handed out (0 if none yet).
    pub fn current(&self) -> Sequence {
        Sequence(self.last.get())
    }
}

/// Append-only log of one mock's invocations.
#[derive(Debug)]
pub struct CallRecorder {
    mock: MockId,
    mock_name: String,
    log: Vec<Rc<Invocation>>,
}

impl CallRecorder {
    pub fn new(mock: MockId, mock_name: impl Into<String>) -> Self {
        Self {
            mock,
            mock_name: mock_name.into(),
            log: Vec::new(),
        }
    }

    /// Record a call under the next global sequence number. Never fails.
    pub fn record(
        &mut self,
        counter: &SequenceCounter,
        method: &str,
        args: Vec<Value>,
        returns: ReturnKind,
    ) -> Rc<Invocation> {
        let invocation = Rc::new(Invocation::new(
            self.mock,
            self.mock_name.clone(),
            method,
            args,
            returns,
            counter.next(),
        ));
        self.log.push(Rc::clone(&invocation));
        invocation
    }

    /// This mock's invocations in call order.
    pub fn log(&self) -> &[Rc<Invocation>] {
        &self.log
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn clear(&mut self) {
        self.log.clear();
    }
}

/// Merge several mocks' logs into one, ordered by sequence number.
pub fn merge_logs<'a, I>(logs: I) -> Vec<Rc<Invocation>>
where
    I: IntoIterator<Item = &'a [Rc<Invocation>]>,
{
    let mut merged: Vec<Rc<Invocation>> = logs.into_iter().flatten().cloned().collect();
    merged.sort_by_key(|inv| inv.sequence);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use understudy_core::args;

    #[test]
    fn test_sequence_starts_at_one_and_increases() {
        let counter = SequenceCounter::new();
        assert_eq!(counter.current(), Sequence(0));
        assert_eq!(counter.next(), Sequence(1));
        assert_eq!(counter.next(), Sequence(2));
        assert_eq!(counter.current(), Sequence(2));
    }

    #[test]
    fn test_record_appends_in_order() {
        let counter = SequenceCounter::new();
        let mut recorder = CallRecorder::new(MockId(1), "list");
        recorder.record(&counter, "add", args![1], ReturnKind::Bool);
        recorder.record(&counter, "add", args![2], ReturnKind::Bool);

        let log = recorder.log();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].to_string(), "list.add(1)");
        assert!(log[0].sequence < log[1].sequence);
    }

    #[test]
    fn test_counter_is_shared_across_recorders() {
        let counter = SequenceCounter::new();
        let mut first = CallRecorder::new(MockId(1), "list");
        let mut second = CallRecorder::new(MockId(2), "list2");

        first.record(&counter, "add", args![1], ReturnKind::Bool);
        second.record(&counter, "add", args!["hello"], ReturnKind::Bool);
        first.record(&counter, "add", args![2], ReturnKind::Bool);
        second.record(&counter, "add", args!["world"], ReturnKind::Bool);

        let merged = merge_logs([first.log(), second.log()]);
        let rendered: Vec<String> = merged.iter().map(|i| i.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "list.add(1)",
                "list2.add(\"hello\")",
                "list.add(2)",
                "list2.add(\"world\")"
            ]
        );
    }

    #[test]
    fn test_clear_keeps_counter_running() {
        let counter = SequenceCounter::new();
        let mut recorder = CallRecorder::new(MockId(1), "list");
        recorder.record(&counter, "size", args![], ReturnKind::Integer);
        recorder.clear();
        assert!(recorder.is_empty());

        let inv = recorder.record(&counter, "size", args![], ReturnKind::Integer);
        assert_eq!(inv.sequence, Sequence(2));
    }
}
