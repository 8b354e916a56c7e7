//! Transition history tracking.
//!
//! Records each fired transition so host-side tests and diagnostics can
//! inspect the path a machine took. The hardware has no wall clock; the
//! timestamp here is host time, captured when the transition fired.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of a single fired transition.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionRecord<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// Host time when the transition fired
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of fired transitions.
///
/// The `record` method returns a new history with the transition appended,
/// keeping the type usable as an immutable value in snapshots.
///
/// # Example
///
/// ```rust
/// use pollfsm::core::{State, StateHistory, TransitionRecord};
/// use serde::{Deserialize, Serialize};
/// use chrono::Utc;
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum WorkState {
///     Start,
///     End,
/// }
///
/// impl State for WorkState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Start => "Start",
///             Self::End => "End",
///         }
///     }
/// }
///
/// let history = StateHistory::new();
/// let history = history.record(TransitionRecord {
///     from: WorkState::Start,
///     to: WorkState::End,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec![&WorkState::Start, &WorkState::End]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<TransitionRecord<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create an empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Return a new history with the transition appended.
    pub fn record(&self, transition: TransitionRecord<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// All recorded transitions, oldest first.
    pub fn transitions(&self) -> &[TransitionRecord<S>] {
        &self.transitions
    }

    /// The sequence of states visited, starting from the first record's
    /// origin. Empty when nothing has fired yet.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for t in &self.transitions {
            path.push(&t.to);
        }
        path
    }

    /// Number of recorded transitions.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Drop all records. Long-running poll loops that only care about the
    /// current state can clear periodically to cap memory.
    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        A,
        B,
        C,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::A => "A",
                Self::B => "B",
                Self::C => "C",
            }
        }
    }

    fn record(from: TestState, to: TestState) -> TransitionRecord<TestState> {
        TransitionRecord {
            from,
            to,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<TestState> = StateHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
        assert!(history.get_path().is_empty());
    }

    #[test]
    fn record_preserves_order() {
        let history = StateHistory::new()
            .record(record(TestState::A, TestState::B))
            .record(record(TestState::B, TestState::C));

        assert_eq!(history.len(), 2);
        let path = history.get_path();
        assert_eq!(path, vec![&TestState::A, &TestState::B, &TestState::C]);
    }

    #[test]
    fn record_does_not_mutate_original() {
        let original = StateHistory::new();
        let _updated = original.record(record(TestState::A, TestState::B));
        assert!(original.is_empty());
    }

    #[test]
    fn self_transition_appears_in_path() {
        // The USART rx entry is a self-transition; it must still show up.
        let history = StateHistory::new().record(record(TestState::A, TestState::A));
        assert_eq!(history.get_path(), vec![&TestState::A, &TestState::A]);
    }

    #[test]
    fn clear_drops_records() {
        let mut history = StateHistory::new().record(record(TestState::A, TestState::B));
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn history_round_trips_through_json() {
        let history = StateHistory::new().record(record(TestState::A, TestState::B));
        let json = serde_json::to_string(&history).unwrap();
        let restored: StateHistory<TestState> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.len(), 1);
        assert_eq!(restored.transitions()[0].to, TestState::B);
    }
}
