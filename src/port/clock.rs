//! Monotonic millisecond clock.

/// Source of monotonic milliseconds since an arbitrary epoch.
///
/// Timeout guards compare with strict `>` against instants derived from this
/// clock. The counter is 64 bits wide, so wraparound is unreachable in
/// practice; ports backed by narrower hardware counters must widen before
/// exposing the value here.
pub trait Clock {
    fn now_ms(&self) -> u64;
}
