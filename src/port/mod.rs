//! Hardware capability layer.
//!
//! The FSMs never touch registers. Everything they need from the hardware
//! (raw signal reads, monotonic time, byte staging, interrupt masking) comes
//! through the traits in this module. A target port implements them over the
//! real peripheral; the `sim` module implements them over plain memory so
//! the interrupt/poll protocol can be exercised on the host.
//!
//! Shared-resource policy: each staging buffer, index, and completion flag
//! has exactly one writer at a time. The interrupt side owns capture state
//! during an active transfer; the poll side takes over only after observing
//! the completion flag. Port implementations must preserve memory visibility
//! across that handoff (volatile access, barriers, or atomics).

mod button;
mod clock;
mod serial;
pub mod sim;

pub use button::ButtonPort;
pub use clock::Clock;
pub use serial::{SerialPort, EMPTY_BYTE, LINE_END, RX_CAPACITY, TX_CAPACITY};
