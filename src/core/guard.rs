//! Guard predicates for controlling state transitions.
//!
//! Guards are boolean functions over the machine context that determine
//! whether a transition can fire. They must be side-effect-free with respect
//! to transition selection: reading a volatile hardware flag through the
//! context is fine, mutating the context is not.

/// Predicate gating a transition.
///
/// Guards are evaluated during the table scan in `fire`. For a fixed current
/// state and fixed observable inputs they must return the same answer every
/// time, so that transition selection stays deterministic.
///
/// # Example
///
/// ```rust
/// use pollfsm::core::Guard;
///
/// struct Ctx {
///     ready: bool,
/// }
///
/// let when_ready = Guard::new(|ctx: &Ctx| ctx.ready);
///
/// assert!(when_ready.check(&Ctx { ready: true }));
/// assert!(!when_ready.check(&Ctx { ready: false }));
/// ```
pub struct Guard<C> {
    predicate: Box<dyn Fn(&C) -> bool + Send + Sync>,
}

impl<C> Guard<C> {
    /// Create a guard from a predicate function.
    ///
    /// The predicate takes the machine context by shared reference, so it
    /// cannot mutate FSM-private data. It may read hardware-exposed flags
    /// that change between calls (completion flags, raw signals, the clock).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Check whether the guard currently allows its transition.
    pub fn check(&self, ctx: &C) -> bool {
        (self.predicate)(ctx)
    }
}
