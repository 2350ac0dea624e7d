//! Serializing the pixel buffer onto the WS2812 chain.
//!
//! WS2812 LEDs expect each pixel as three bytes in **green, red, blue** order,
//! most significant bit first. [`LedTransport::flush`] emits exactly
//! `3 × 25 = 75` bytes per call, one blocking [`LedWire::write_byte`] per byte, then
//! one [`LedWire::latch`].

use smart_leds::RGB8;

use crate::Result;
use crate::led_panel::PixelBuffer;

/// Bytes per LED on the wire.
pub const BYTES_PER_LED: usize = 3;

/// Bytes in one flush of the whole panel.
pub const FRAME_BYTES: usize = PixelBuffer::LEN * BYTES_PER_LED;

/// A blocking byte sink that clocks bytes out to the LED chain.
///
/// On the board this is a PIO state machine's TX FIFO: `write_byte` spins while
/// the FIFO is full, then pushes. There is no failure path; a busy peripheral
/// only delays the call.
pub trait LedWire {
    /// Hand one byte to the peripheral, blocking until it is accepted.
    fn write_byte(&mut self, byte: u8);

    /// Hold the line low long enough for the chain to latch the frame.
    ///
    /// Called once at the end of every flush. The default does nothing.
    fn latch(&mut self) {}
}

impl<T: LedWire + ?Sized> LedWire for &mut T {
    fn write_byte(&mut self, byte: u8) {
        (**self).write_byte(byte);
    }

    fn latch(&mut self) {
        (**self).latch();
    }
}

/// The wire bytes of one pixel: green, red, blue.
#[must_use]
pub const fn grb_bytes(color: RGB8) -> [u8; BYTES_PER_LED] {
    [color.g, color.r, color.b]
}

/// The full byte stream a flush of `buffer` sends, in buffer order.
#[must_use]
pub fn encode_grb(buffer: &PixelBuffer) -> [u8; FRAME_BYTES] {
    let mut bytes = [0u8; FRAME_BYTES];
    for (chunk, color) in bytes.chunks_exact_mut(BYTES_PER_LED).zip(buffer.iter()) {
        chunk.copy_from_slice(&grb_bytes(*color));
    }
    bytes
}

/// Streams a [`PixelBuffer`] to an [`LedWire`].
pub struct LedTransport<W> {
    wire: W,
}

impl<W: LedWire> LedTransport<W> {
    /// Wrap a wire.
    pub const fn new(wire: W) -> Self {
        Self { wire }
    }

    /// Send every pixel of `buffer`, in buffer order, as G, R, B bytes.
    ///
    /// Blocks until all [`FRAME_BYTES`] bytes are accepted.
    pub fn flush(&mut self, buffer: &PixelBuffer) {
        for color in buffer.iter() {
            for byte in grb_bytes(*color) {
                self.wire.write_byte(byte);
            }
        }
        self.wire.latch();
        trace!("LedTransport: flushed {} bytes", FRAME_BYTES);
    }

    /// Release the wire.
    pub fn into_wire(self) -> W {
        self.wire
    }
}

// ============================================================================
// Execution unit claim
// ============================================================================

/// Which PIO block runs the LED program.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(not(feature = "host"), derive(defmt::Format))]
pub enum ExecutionUnit {
    /// The preferred block (PIO0).
    Primary,
    /// The fallback block (PIO1), used only when the primary is taken.
    Secondary,
}

/// Pick the PIO block for the LED wire: the primary if free, else the secondary.
///
/// Called once at startup; the choice is never revisited.
///
/// # Errors
///
/// Returns [`Error::NoFreeExecutionUnit`](crate::Error::NoFreeExecutionUnit) if
/// neither block is available.
pub fn claim_execution_unit(primary_free: bool, secondary_free: bool) -> Result<ExecutionUnit> {
    if primary_free {
        info!("LedTransport: claimed primary PIO block");
        Ok(ExecutionUnit::Primary)
    } else if secondary_free {
        warn!("LedTransport: primary PIO block taken, falling back to secondary");
        Ok(ExecutionUnit::Secondary)
    } else {
        Err(crate::Error::NoFreeExecutionUnit)
    }
}
