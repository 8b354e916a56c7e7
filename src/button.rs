//! Debounced push-button FSM.
//!
//! The debounce filter inserts a mandatory wait state after every observed
//! edge. The wait only advances once the debounce window has strictly
//! elapsed, and the raw signal is not re-sampled while waiting, so any edge
//! bouncing inside the window is invisible to the consumer.

use crate::builder::{guarded, StateMachineBuilder, TransitionBuilder};
use crate::core::StateHistory;
use crate::engine::StateMachine;
use crate::port::{ButtonPort, Clock};
use crate::snapshot::Snapshot;
use crate::state_enum;

state_enum! {
    /// Debounce states. The machine cycles indefinitely; none is terminal.
    pub enum ButtonState {
        /// Stable released (initial)
        Released,
        /// Press edge seen, debounce window running
        PressedWait,
        /// Stable pressed
        Pressed,
        /// Release edge seen, debounce window running
        ReleasedWait,
    }
}

/// FSM-private data plus the port handles guards and actions read through.
struct ButtonCtx<P, K> {
    port: P,
    clock: K,
    /// Debounce window in milliseconds, immutable after construction.
    debounce_ms: u64,
    /// Instant the current wait state expires; compared with strict `>`.
    next_timeout: u64,
    /// Clock reading at the last press edge.
    pressed_at: u64,
    /// Last measured press duration, written only by the release transition.
    duration: u64,
}

/// Debounced button reader.
///
/// Call [`fire`](Button::fire) once per super-loop iteration; everything
/// else is a pure accessor over the instance's private data.
///
/// # Example
///
/// ```rust
/// use pollfsm::button::{Button, ButtonState};
/// use pollfsm::port::sim::{SimButton, SimClock};
///
/// let signal = SimButton::new();
/// let clock = SimClock::new();
/// let mut button = Button::new(signal.clone(), clock.clone(), 150, 0);
///
/// signal.press();
/// button.fire();
/// assert_eq!(button.state(), &ButtonState::PressedWait);
///
/// clock.advance(151);
/// button.fire();
/// assert_eq!(button.state(), &ButtonState::Pressed);
/// ```
pub struct Button<P: ButtonPort, K: Clock> {
    machine: StateMachine<ButtonState, ButtonCtx<P, K>>,
    ctx: ButtonCtx<P, K>,
    channel: u32,
}

impl<P: ButtonPort + 'static, K: Clock + 'static> Button<P, K> {
    /// Construct a button instance bound to its port and clock.
    ///
    /// `debounce_ms` is the minimum stable duration required before a
    /// signal-edge observation is trusted. `channel` identifies the hardware
    /// channel for diagnostics only.
    pub fn new(port: P, clock: K, debounce_ms: u64, channel: u32) -> Self {
        // Table order matters: evaluated top to bottom, first match wins.
        let table = vec![
            TransitionBuilder::new()
                .from(ButtonState::Released)
                .to(ButtonState::PressedWait)
                .when(|ctx: &ButtonCtx<P, K>| ctx.port.is_pressed())
                .run(|ctx: &mut ButtonCtx<P, K>| {
                    let now = ctx.clock.now_ms();
                    ctx.pressed_at = now;
                    ctx.next_timeout = now + ctx.debounce_ms;
                })
                .build()
                .expect("press entry is well formed"),
            guarded(
                ButtonState::PressedWait,
                ButtonState::Pressed,
                |ctx: &ButtonCtx<P, K>| ctx.clock.now_ms() > ctx.next_timeout,
            ),
            TransitionBuilder::new()
                .from(ButtonState::Pressed)
                .to(ButtonState::ReleasedWait)
                .when(|ctx: &ButtonCtx<P, K>| !ctx.port.is_pressed())
                .run(|ctx: &mut ButtonCtx<P, K>| {
                    let now = ctx.clock.now_ms();
                    ctx.duration = now - ctx.pressed_at;
                    ctx.next_timeout = now + ctx.debounce_ms;
                })
                .build()
                .expect("release entry is well formed"),
            guarded(
                ButtonState::ReleasedWait,
                ButtonState::Released,
                |ctx: &ButtonCtx<P, K>| ctx.clock.now_ms() > ctx.next_timeout,
            ),
        ];

        let machine = StateMachineBuilder::new()
            .transitions(table)
            .build()
            .expect("button transition table is non-empty");

        Self {
            machine,
            ctx: ButtonCtx {
                port,
                clock,
                debounce_ms,
                next_timeout: 0,
                pressed_at: 0,
                duration: 0,
            },
            channel,
        }
    }

    /// Evaluate the transition table once. At most one transition fires.
    pub fn fire(&mut self) -> Option<ButtonState> {
        self.machine.fire(&mut self.ctx)
    }

    /// Last measured press length in milliseconds.
    pub fn get_duration(&self) -> u64 {
        self.ctx.duration
    }

    /// Zero the measured duration, marking it consumed so a stale value is
    /// not read twice.
    pub fn reset_duration(&mut self) {
        self.ctx.duration = 0;
    }

    /// True whenever the machine is anywhere but stable released.
    pub fn is_active(&self) -> bool {
        self.machine.current_state() != &ButtonState::Released
    }

    /// Current debounce state.
    pub fn state(&self) -> &ButtonState {
        self.machine.current_state()
    }

    /// Hardware channel identifier.
    pub fn channel(&self) -> u32 {
        self.channel
    }

    /// History of fired transitions.
    pub fn history(&self) -> &StateHistory<ButtonState> {
        self.machine.history()
    }

    /// Serializable diagnostic snapshot of the underlying machine.
    pub fn snapshot(&self) -> Snapshot<ButtonState> {
        self.machine.snapshot()
    }
}
