//! Builder API for ergonomic state machine construction.
//!
//! This module provides fluent builders and macros for declaring transition
//! tables with minimal boilerplate while keeping table order explicit.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
pub use transition::TransitionBuilder;

use crate::core::State;
use crate::engine::Transition;

/// Create a guarded transition without an action.
///
/// Shorthand for the wait-state rows of debounce-style tables, where the
/// transition only advances once a condition holds and nothing else happens.
///
/// # Example
///
/// ```
/// use pollfsm::builder::guarded;
/// use pollfsm::state_enum;
///
/// state_enum! {
///     enum DoorState {
///         Shut,
///         Ajar,
///     }
/// }
///
/// struct Ctx {
///     handle_turned: bool,
/// }
///
/// let t = guarded(DoorState::Shut, DoorState::Ajar, |ctx: &Ctx| ctx.handle_turned);
/// assert!(t.can_fire(&DoorState::Shut, &Ctx { handle_turned: true }));
/// ```
pub fn guarded<S, C, F>(from: S, to: S, guard: F) -> Transition<S, C>
where
    S: State,
    F: Fn(&C) -> bool + Send + Sync + 'static,
{
    TransitionBuilder::new()
        .from(from)
        .to(to)
        .when(guard)
        .build()
        .expect("from and to are both set")
}
