//! Serial (USART) hardware access.

/// Capacity of the input line buffer, in bytes.
pub const RX_CAPACITY: usize = 10;

/// Capacity of the output line buffer, in bytes.
pub const TX_CAPACITY: usize = 100;

/// Sentinel marking an unused buffer slot. The output buffer's first byte
/// equals this value if and only if no transmission is pending or in flight.
pub const EMPTY_BYTE: u8 = 0x00;

/// Line terminator. Ends capture on receive (not stored) and ends staging
/// playback on transmit (transmitted).
pub const LINE_END: u8 = 0x0A;

/// Byte-level access to one USART channel.
///
/// The port owns the interrupt-fed staging state: a capture buffer filled
/// one byte per rx interrupt and a staging buffer drained one byte per tx
/// interrupt. The FSM only ever copies whole lines across this boundary
/// after observing a completion flag.
///
/// Completion flags (`rx_done`, `tx_done`) and the transmit-ready flag are
/// read-only here; the interrupt side is their writer.
pub trait SerialPort {
    /// A full line has been captured and awaits pickup.
    fn rx_done(&self) -> bool;

    /// The staged line has been fully transmitted.
    fn tx_done(&self) -> bool;

    /// The hardware transmit data register can accept a byte.
    fn tx_register_ready(&self) -> bool;

    /// Copy the captured line into `out`. Slots past the line's end hold
    /// whatever the last reset left there, so callers reset capture state
    /// immediately after copying.
    fn copy_capture(&self, out: &mut [u8; RX_CAPACITY]);

    /// Clear the capture buffer to the empty sentinel and drop `rx_done`.
    fn reset_capture(&mut self);

    /// Clear the staging buffer to the empty sentinel and drop `tx_done`.
    fn reset_staging(&mut self);

    /// Load a full output line into the transmit staging buffer.
    fn stage_for_transmit(&mut self, data: &[u8; TX_CAPACITY]);

    /// Push the first staged byte into the transmit data register from poll
    /// context; the tx interrupt sends the rest.
    fn write_first_byte(&mut self);

    fn enable_rx_interrupt(&mut self);
    fn disable_rx_interrupt(&mut self);
    fn enable_tx_interrupt(&mut self);
    fn disable_tx_interrupt(&mut self);
}
