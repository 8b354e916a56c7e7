//! Simulated port implementations for host-side testing.
//!
//! These stand in for the interrupt-driven hardware layer. Tests play the
//! interrupt handler's role by calling `isr_rx_byte` / `isr_tx` between
//! polls, and the shared state is wrapped in atomics or a mutex so the
//! single-writer handoff of the real system keeps its memory-visibility
//! guarantees on the host.

use crate::port::{
    ButtonPort, Clock, SerialPort, EMPTY_BYTE, LINE_END, RX_CAPACITY, TX_CAPACITY,
};
use log::debug;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Manually advanced millisecond clock.
///
/// Clones share the same counter, so a test can hold one handle and hand
/// another to the FSM under test.
#[derive(Clone, Default)]
pub struct SimClock {
    now: Arc<AtomicU64>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward.
    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }

    /// Jump to an absolute instant.
    pub fn set(&self, ms: u64) {
        self.now.store(ms, Ordering::SeqCst);
    }
}

impl Clock for SimClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Manually driven raw button signal. Clones share the same level.
#[derive(Clone, Default)]
pub struct SimButton {
    pressed: Arc<AtomicBool>,
}

impl SimButton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&self) {
        self.pressed.store(true, Ordering::SeqCst);
    }

    pub fn release(&self) {
        self.pressed.store(false, Ordering::SeqCst);
    }

    pub fn set_pressed(&self, pressed: bool) {
        self.pressed.store(pressed, Ordering::SeqCst);
    }
}

impl ButtonPort for SimButton {
    fn is_pressed(&self) -> bool {
        self.pressed.load(Ordering::SeqCst)
    }
}

/// Interrupt-side state of one simulated USART channel.
struct SerialHw {
    capture: [u8; RX_CAPACITY],
    capture_idx: usize,
    read_complete: bool,
    staging: [u8; TX_CAPACITY],
    staging_idx: usize,
    write_complete: bool,
    rx_enabled: bool,
    tx_enabled: bool,
    tx_register_ready: bool,
    /// Every byte pushed through the transmit data register, in order.
    wire: Vec<u8>,
    /// Capture index wraps observed since construction.
    overflow_count: u32,
}

impl SerialHw {
    fn new() -> Self {
        Self {
            capture: [EMPTY_BYTE; RX_CAPACITY],
            capture_idx: 0,
            read_complete: false,
            staging: [EMPTY_BYTE; TX_CAPACITY],
            staging_idx: 0,
            write_complete: false,
            rx_enabled: false,
            tx_enabled: false,
            tx_register_ready: true,
            wire: Vec::new(),
            overflow_count: 0,
        }
    }

    /// One transmit interrupt's worth of work: emit or skip the byte at the
    /// staging index. Completion is reached at the terminator or at the last
    /// slot, whichever comes first; empty-sentinel bytes are skipped without
    /// transmitting and without stopping.
    fn step_tx(&mut self) {
        let idx = self.staging_idx;
        let byte = self.staging[idx];

        if idx == TX_CAPACITY - 1 || byte == LINE_END {
            self.wire.push(byte);
            self.tx_enabled = false;
            self.staging_idx = 0;
            self.write_complete = true;
        } else if byte == EMPTY_BYTE {
            self.staging_idx += 1;
        } else {
            self.wire.push(byte);
            self.staging_idx += 1;
        }
    }
}

/// Simulated USART channel.
///
/// Clones share the same staging state: the test keeps one handle to drive
/// the "interrupts", the FSM owns another as its port.
#[derive(Clone)]
pub struct SimSerial {
    hw: Arc<Mutex<SerialHw>>,
}

impl Default for SimSerial {
    fn default() -> Self {
        Self::new()
    }
}

impl SimSerial {
    pub fn new() -> Self {
        Self {
            hw: Arc::new(Mutex::new(SerialHw::new())),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SerialHw> {
        // A poisoned lock means a test panicked mid-update; the state is
        // still the best available answer.
        self.hw.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Receive interrupt: capture one byte.
    ///
    /// A terminator ends capture, sets the completion flag without storing
    /// the terminator, and resets the index. On index overflow the index
    /// wraps to zero and capture continues overwriting from the start; no
    /// error is raised, but the wrap is counted.
    pub fn isr_rx_byte(&self, byte: u8) {
        let mut hw = self.lock();
        if !hw.rx_enabled {
            return;
        }

        if byte == LINE_END {
            hw.read_complete = true;
            hw.capture_idx = 0;
            return;
        }

        if hw.capture_idx >= RX_CAPACITY {
            hw.capture_idx = 0;
            hw.overflow_count += 1;
            debug!("rx capture overflow, wrapping to start");
        }
        let idx = hw.capture_idx;
        hw.capture[idx] = byte;
        hw.capture_idx = idx + 1;
    }

    /// Transmit interrupt: send one staged byte, if the interrupt is enabled.
    pub fn isr_tx(&self) {
        let mut hw = self.lock();
        if !hw.tx_enabled {
            return;
        }
        hw.step_tx();
    }

    /// Run transmit interrupts until the channel masks itself off, the way
    /// the hardware would between two polls.
    pub fn pump_tx(&self) {
        for _ in 0..=TX_CAPACITY {
            if !self.lock().tx_enabled {
                return;
            }
            self.isr_tx();
        }
    }

    /// Everything transmitted so far, in order.
    pub fn sent(&self) -> Vec<u8> {
        self.lock().wire.clone()
    }

    /// Number of capture-index wraps observed.
    pub fn overflow_count(&self) -> u32 {
        self.lock().overflow_count
    }

    /// Force the transmit-ready flag, to exercise the bounded ready-wait.
    pub fn set_tx_register_ready(&self, ready: bool) {
        self.lock().tx_register_ready = ready;
    }

    pub fn rx_interrupt_enabled(&self) -> bool {
        self.lock().rx_enabled
    }

    pub fn tx_interrupt_enabled(&self) -> bool {
        self.lock().tx_enabled
    }
}

impl SerialPort for SimSerial {
    fn rx_done(&self) -> bool {
        self.lock().read_complete
    }

    fn tx_done(&self) -> bool {
        self.lock().write_complete
    }

    fn tx_register_ready(&self) -> bool {
        self.lock().tx_register_ready
    }

    fn copy_capture(&self, out: &mut [u8; RX_CAPACITY]) {
        *out = self.lock().capture;
    }

    fn reset_capture(&mut self) {
        let mut hw = self.lock();
        hw.capture = [EMPTY_BYTE; RX_CAPACITY];
        hw.read_complete = false;
    }

    fn reset_staging(&mut self) {
        let mut hw = self.lock();
        hw.staging = [EMPTY_BYTE; TX_CAPACITY];
        hw.write_complete = false;
    }

    fn stage_for_transmit(&mut self, data: &[u8; TX_CAPACITY]) {
        self.lock().staging = *data;
    }

    fn write_first_byte(&mut self) {
        // Poll-context push of the first byte; the tx interrupt is not
        // necessarily enabled yet.
        self.lock().step_tx();
    }

    fn enable_rx_interrupt(&mut self) {
        self.lock().rx_enabled = true;
    }

    fn disable_rx_interrupt(&mut self) {
        self.lock().rx_enabled = false;
    }

    fn enable_tx_interrupt(&mut self) {
        self.lock().tx_enabled = true;
    }

    fn disable_tx_interrupt(&mut self) {
        self.lock().tx_enabled = false;
    }
}
