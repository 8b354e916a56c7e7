//! Pollfsm: table-driven state machines for cooperative firmware loops
//!
//! Pollfsm implements the poll-and-interrupt execution model common to
//! microcontroller super-loops: a scheduler calls each machine's `fire`
//! once per loop iteration, interrupt handlers asynchronously update
//! hardware-side flags and staging buffers, and guards observe those flags
//! on the next poll. At most one transition fires per call, selected by
//! first-match-wins scan over an ordered transition table.
//!
//! # Core Concepts
//!
//! - **State**: type-safe state representation via the `State` trait
//! - **Guards**: side-effect-free predicates that gate transitions
//! - **Actions**: side-effecting routines run exactly once per fired transition
//! - **Ports**: capability traits standing in for the hardware layer
//!
//! # Example
//!
//! ```rust
//! use pollfsm::builder::{StateMachineBuilder, TransitionBuilder};
//! use pollfsm::state_enum;
//!
//! state_enum! {
//!     enum LampState {
//!         Off,
//!         On,
//!     }
//! }
//!
//! struct LampCtx {
//!     switch_closed: bool,
//! }
//!
//! let mut machine = StateMachineBuilder::new()
//!     .transition(
//!         TransitionBuilder::new()
//!             .from(LampState::Off)
//!             .to(LampState::On)
//!             .when(|ctx: &LampCtx| ctx.switch_closed),
//!     )
//!     .unwrap()
//!     .transition(
//!         TransitionBuilder::new()
//!             .from(LampState::On)
//!             .to(LampState::Off)
//!             .when(|ctx: &LampCtx| !ctx.switch_closed),
//!     )
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! // Initial state defaults to the first entry's origin.
//! assert_eq!(machine.current_state(), &LampState::Off);
//!
//! let mut ctx = LampCtx { switch_closed: true };
//! machine.fire(&mut ctx);
//! assert_eq!(machine.current_state(), &LampState::On);
//! ```

pub mod builder;
pub mod button;
pub mod core;
pub mod engine;
pub mod port;
pub mod snapshot;
pub mod usart;

// Re-export commonly used types
pub use crate::core::{Guard, State, StateHistory, TransitionRecord};
pub use button::{Button, ButtonState};
pub use engine::{StateMachine, Transition};
pub use usart::{Usart, UsartError, UsartState};
