//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::State;
use crate::engine::{StateMachine, Transition};

/// Builder for constructing state machines with a fluent API.
///
/// The initial state may be set explicitly; when it is not, the machine
/// starts in the origin state of the first table entry, matching the
/// convention of table-driven firmware FSMs.
pub struct StateMachineBuilder<S: State, C> {
    initial: Option<S>,
    transitions: Vec<Transition<S, C>>,
}

impl<S: State, C> StateMachineBuilder<S, C> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            transitions: Vec::new(),
        }
    }

    /// Set the initial state explicitly (optional).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<S, C>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<S, C>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once, preserving order.
    pub fn transitions(mut self, transitions: Vec<Transition<S, C>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Build the state machine.
    ///
    /// Fails with `BuildError::NoTransitions` on an empty table; a machine
    /// that can never fire is a table construction mistake.
    pub fn build(self) -> Result<StateMachine<S, C>, BuildError> {
        let first_from = self
            .transitions
            .first()
            .map(|t| t.from.clone())
            .ok_or(BuildError::NoTransitions)?;

        let initial = self.initial.unwrap_or(first_from);

        let mut machine = StateMachine::new(initial);
        for transition in self.transitions {
            machine.add_transition(transition);
        }

        Ok(machine)
    }
}

impl<S: State, C> Default for StateMachineBuilder<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Idle,
        Busy,
        Done,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::Busy => "Busy",
                Self::Done => "Done",
            }
        }
    }

    struct Ctx;

    #[test]
    fn builder_requires_transitions() {
        let result = StateMachineBuilder::<TestState, Ctx>::new().build();

        assert!(matches!(result, Err(BuildError::NoTransitions)));
    }

    #[test]
    fn initial_defaults_to_first_entry_origin() {
        let machine = StateMachineBuilder::<TestState, Ctx>::new()
            .transition(
                TransitionBuilder::new()
                    .from(TestState::Busy)
                    .to(TestState::Done),
            )
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(machine.current_state(), &TestState::Busy);
    }

    #[test]
    fn explicit_initial_overrides_default() {
        let machine = StateMachineBuilder::<TestState, Ctx>::new()
            .initial(TestState::Idle)
            .transition(
                TransitionBuilder::new()
                    .from(TestState::Busy)
                    .to(TestState::Done),
            )
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(machine.current_state(), &TestState::Idle);
    }

    #[test]
    fn build_runs_no_guard_or_action() {
        // Binding the table must not evaluate anything.
        let machine = StateMachineBuilder::<TestState, Ctx>::new()
            .transition(
                TransitionBuilder::new()
                    .from(TestState::Idle)
                    .to(TestState::Busy)
                    .when(|_: &Ctx| panic!("guard ran during build"))
                    .run(|_: &mut Ctx| panic!("action ran during build")),
            )
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(machine.current_state(), &TestState::Idle);
        assert!(machine.history().is_empty());
    }

    #[test]
    fn transitions_helper_preserves_order() {
        let table = vec![
            TransitionBuilder::<TestState, Ctx>::new()
                .from(TestState::Idle)
                .to(TestState::Busy)
                .build()
                .unwrap(),
            TransitionBuilder::<TestState, Ctx>::new()
                .from(TestState::Busy)
                .to(TestState::Done)
                .build()
                .unwrap(),
        ];

        let mut machine = StateMachineBuilder::new().transitions(table).build().unwrap();

        let mut ctx = Ctx;
        assert_eq!(machine.fire(&mut ctx), Some(TestState::Busy));
        assert_eq!(machine.fire(&mut ctx), Some(TestState::Done));
    }
}
