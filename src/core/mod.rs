//! Core state machine types.
//!
//! This module contains the pieces the interpreter is built from:
//! - State definitions via the `State` trait
//! - Guard predicates for transition control
//! - History tracking of fired transitions
//!
//! Guards here are pure with respect to transition selection: they may read
//! volatile hardware-exposed flags through the machine context, but never
//! mutate it.

mod guard;
mod history;
mod state;

pub use guard::Guard;
pub use history::{StateHistory, TransitionRecord};
pub use state::State;
