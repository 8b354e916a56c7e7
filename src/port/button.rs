//! Raw button signal access.

/// Raw digital input for one button channel.
///
/// Returns the unfiltered signal level; debouncing happens in the FSM layer.
/// The read may change between calls (it is effectively volatile), which is
/// exactly what the debounce wait states exist to absorb.
pub trait ButtonPort {
    fn is_pressed(&self) -> bool;
}
