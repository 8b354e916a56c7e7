//! State machine that interprets a transition table.

use crate::core::{State, StateHistory, TransitionRecord};
use crate::engine::transition::Transition;
use chrono::Utc;
use log::trace;

/// Table-driven state machine.
///
/// Holds the current state, the bound transition table, and a history of
/// fired transitions. The machine carries no domain data of its own; guards
/// and actions operate on a caller-supplied context passed to each `fire`.
///
/// Within one instance, transitions are strictly sequential: at most one
/// fires per `fire` call, so no two transitions of the same instance are
/// ever in flight simultaneously.
pub struct StateMachine<S: State, C> {
    current: S,
    transitions: Vec<Transition<S, C>>,
    history: StateHistory<S>,
}

impl<S: State, C> StateMachine<S, C> {
    /// Create a machine in the given initial state with an empty table.
    ///
    /// Callers normally go through `StateMachineBuilder`, which also applies
    /// the convention that the initial state defaults to the first table
    /// entry's origin.
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            transitions: Vec::new(),
            history: StateHistory::new(),
        }
    }

    /// Append a transition to the table. Order of addition is scan order.
    pub fn add_transition(&mut self, transition: Transition<S, C>) {
        self.transitions.push(transition);
    }

    /// Current state (pure).
    pub fn current_state(&self) -> &S {
        &self.current
    }

    /// History of fired transitions (pure).
    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    /// Drop accumulated history records.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Force the current state and history, used when restoring a snapshot.
    pub(crate) fn restore_parts(&mut self, current: S, history: StateHistory<S>) {
        self.current = current;
        self.history = history;
    }

    /// Evaluate the table once against the context.
    ///
    /// Scans in table order. The first entry whose origin equals the current
    /// state and whose guard passes fires: its action (if any) runs with
    /// mutable access to the context, then the current state becomes the
    /// entry's destination. Scanning stops there even if a later entry for
    /// the same origin would also match.
    ///
    /// Returns the new state when a transition fired, `None` when no entry
    /// matched (the machine is unchanged; calling again with the same
    /// observable inputs is a no-op).
    pub fn fire(&mut self, ctx: &mut C) -> Option<S> {
        let index = self
            .transitions
            .iter()
            .position(|t| t.can_fire(&self.current, ctx))?;

        let entry = &self.transitions[index];
        let from = self.current.clone();
        let to = entry.to.clone();

        if let Some(action) = &entry.action {
            action(ctx);
        }

        trace!("fire: {} -> {}", from.name(), to.name());

        self.history = self.history.record(TransitionRecord {
            from,
            to: to.clone(),
            timestamp: Utc::now(),
        });
        self.current = to.clone();

        Some(to)
    }
}
