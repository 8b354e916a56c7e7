//! Build errors for state machine and transition builders.

use thiserror::Error;

/// Errors that can occur when building state machines and transitions.
///
/// These are integration-time programming errors (a malformed table), not
/// runtime-recoverable conditions; construction happens once at system start.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("No transitions defined. Add at least one transition")]
    NoTransitions,

    #[error("Transition origin state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition destination state not specified. Call .to(state)")]
    MissingToState,
}
