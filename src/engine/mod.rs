//! The transition-table interpreter.
//!
//! A `StateMachine` binds an ordered table of `Transition`s to a current
//! state. Each call to `fire` scans the table once and fires at most one
//! transition: the first entry whose origin matches the current state and
//! whose guard passes. The engine owns no domain knowledge; buttons and
//! serial links are built on top of it.

mod machine;
mod transition;

pub use machine::StateMachine;
pub use transition::{Action, Transition};
