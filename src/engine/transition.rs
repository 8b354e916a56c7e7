//! Transition table entries.

use crate::core::{Guard, State};
use std::sync::Arc;

/// Type alias for transition actions.
///
/// Actions run exactly once when their transition fires. They may mutate the
/// machine context and perform external side effects such as hardware writes
/// through the context's port handles.
pub type Action<C> = Arc<dyn Fn(&mut C) + Send + Sync>;

/// One entry of a transition table: origin state, optional guard,
/// destination state, optional action.
///
/// Tables are ordered and order is significant: when several entries share
/// an origin state, the first one whose guard passes wins and scanning
/// stops, even if a later entry would also match.
pub struct Transition<S: State, C> {
    pub from: S,
    pub to: S,
    pub guard: Option<Guard<C>>,
    pub action: Option<Action<C>>,
}

impl<S: State, C> Transition<S, C> {
    /// Check whether this entry can fire from the current state.
    ///
    /// Pure with respect to the context: state match plus guard evaluation,
    /// no side effects. An absent guard always passes.
    pub fn can_fire(&self, current: &S, ctx: &C) -> bool {
        if *current != self.from {
            return false;
        }

        self.guard.as_ref().is_none_or(|g| g.check(ctx))
    }
}
