//! The 5×5 LED panel: frames, the serpentine pixel buffer, and the panel device.
//!
//! Draw in `(row, column)` space with [`Frame2d`] or [`PixelBuffer::set_cell`]; the
//! buffer stores pixels in chain order so [`LedPanel::flush`] can stream them out
//! directly.
//!
//! # Example
//!
//! ```rust
//! use keypad_panel::led_panel::{Frame, PixelBuffer, colors, serpentine_index};
//!
//! const CROSS: Frame = Frame::from_mask(
//!     [0b00100, 0b00100, 0b11111, 0b00100, 0b00100],
//!     colors::RED,
//! );
//!
//! let mut buffer = PixelBuffer::new();
//! buffer.load_frame(&CROSS);
//! assert_eq!(buffer[serpentine_index(2, 0)], colors::RED);
//! assert_eq!(buffer[serpentine_index(0, 0)], colors::BLACK);
//! ```

/// Predefined RGB color constants from the `smart_leds` crate.
#[doc(inline)]
pub use smart_leds::colors;

/// RGB color type used by frames and the pixel buffer.
pub use smart_leds::RGB8;

/// 8-bit-per-channel RGB color from `embedded_graphics`.
#[doc(inline)]
pub use embedded_graphics::pixelcolor::Rgb888;

use core::convert::Infallible;
use core::ops::{Deref, DerefMut, Index, IndexMut};

use embedded_graphics::{draw_target::DrawTarget, prelude::*};

use crate::led_transport::{LedTransport, LedWire};

/// Panel width in LEDs.
pub const PANEL_WIDTH: usize = 5;

/// Panel height in LEDs.
pub const PANEL_HEIGHT: usize = 5;

/// Number of LEDs on the chain.
pub const PANEL_LEN: usize = PANEL_WIDTH * PANEL_HEIGHT;

// ============================================================================
// Serpentine addressing
// ============================================================================

/// Chain index of the panel cell at `(row, column)`.
///
/// The chain starts at the bottom-right of the panel and snakes back and forth,
/// so cell `(0, 0)` is the last LED. Even rows run left to right, odd rows right
/// to left:
///
/// ```text
///        col 0  1  2  3  4
/// row 0:    24 23 22 21 20
/// row 1:    15 16 17 18 19
/// row 2:    14 13 12 11 10
/// row 3:     5  6  7  8  9
/// row 4:     4  3  2  1  0
/// ```
///
/// # Panics
///
/// Panics if `row` or `column` is outside the 5×5 panel.
#[must_use]
pub const fn serpentine_index(row: usize, column: usize) -> usize {
    assert!(row < PANEL_HEIGHT, "row must be within the panel");
    assert!(column < PANEL_WIDTH, "column must be within the panel");
    let column_in_chain = if row % 2 == 0 {
        column
    } else {
        PANEL_WIDTH - 1 - column
    };
    PANEL_LEN - 1 - (row * PANEL_WIDTH + column_in_chain)
}

/// Panel cell `(row, column)` of a chain index. Inverse of [`serpentine_index`].
///
/// # Panics
///
/// Panics if `index` is not on the chain.
#[must_use]
pub const fn serpentine_cell(index: usize) -> (usize, usize) {
    assert!(index < PANEL_LEN, "index must be within the chain");
    let reversed = PANEL_LEN - 1 - index;
    let row = reversed / PANEL_WIDTH;
    let column_in_chain = reversed % PANEL_WIDTH;
    let column = if row % 2 == 0 {
        column_in_chain
    } else {
        PANEL_WIDTH - 1 - column_in_chain
    };
    (row, column)
}

// ============================================================================
// Brightness
// ============================================================================

/// Scale every channel of `color` to `percent` of its value (truncating).
///
/// # Panics
///
/// Panics if `percent` is above 100.
#[must_use]
pub const fn scale(color: RGB8, percent: u8) -> RGB8 {
    assert!(percent <= 100, "percent must be at most 100");
    RGB8::new(
        scale_channel(color.r, percent),
        scale_channel(color.g, percent),
        scale_channel(color.b, percent),
    )
}

const fn scale_channel(value: u8, percent: u8) -> u8 {
    // (255 * 100) / 100 fits in u8 after division.
    ((value as u16 * percent as u16) / 100) as u8
}

// ============================================================================
// Frame2d
// ============================================================================

/// A 2D array of RGB pixels addressed as `[row][column]`.
///
/// Frames are the authoring unit for canned animations. Build them in `const`
/// context with [`Frame2d::filled`], [`Frame2d::from_mask`] and
/// [`Frame2d::with_mask`], or draw on them with `embedded-graphics`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Frame2d<const W: usize, const H: usize>(pub [[RGB8; W]; H]);

/// A frame the size of the panel.
pub type Frame = Frame2d<PANEL_WIDTH, PANEL_HEIGHT>;

impl<const W: usize, const H: usize> Frame2d<W, H> {
    /// Frame2d width in pixels (columns).
    pub const WIDTH: usize = W;
    /// Frame2d height in pixels (rows).
    pub const HEIGHT: usize = H;
    /// Total number of pixels (WIDTH × HEIGHT).
    pub const LEN: usize = W * H;
    /// Frame dimensions as a [`Size`].
    ///
    /// For [`embedded-graphics`](https://docs.rs/embedded-graphics) drawing operation.
    pub const SIZE: Size = Size::new(W as u32, H as u32);

    /// Create a new blank (all black) frame.
    #[must_use]
    pub const fn new() -> Self {
        Self([[RGB8::new(0, 0, 0); W]; H])
    }

    /// Create a frame filled with a single color.
    #[must_use]
    pub const fn filled(color: RGB8) -> Self {
        Self([[color; W]; H])
    }

    /// Create a frame from one bit mask per row; set bits are lit with `color`.
    ///
    /// The most significant of the `W` low bits is column 0, so masks read like
    /// the panel: `0b10000` lights the leftmost LED of a 5-wide row.
    #[must_use]
    pub const fn from_mask(mask: [u8; H], color: RGB8) -> Self {
        Self::new().with_mask(mask, color)
    }

    /// Return a copy with the bits of `mask` painted in `color` over this frame.
    #[must_use]
    pub const fn with_mask(self, mask: [u8; H], color: RGB8) -> Self {
        assert!(W <= 8, "bit masks cover at most 8 columns");
        let mut pixels = self.0;
        let mut row = 0;
        while row < H {
            let mut column = 0;
            while column < W {
                let bit = W - 1 - column;
                if (mask[row] >> bit) & 1 == 1 {
                    pixels[row][column] = color;
                }
                column += 1;
            }
            row += 1;
        }
        Self(pixels)
    }
}

impl<const W: usize, const H: usize> Deref for Frame2d<W, H> {
    type Target = [[RGB8; W]; H];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const W: usize, const H: usize> DerefMut for Frame2d<W, H> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<const W: usize, const H: usize> Index<(usize, usize)> for Frame2d<W, H> {
    type Output = RGB8;

    fn index(&self, (row, column): (usize, usize)) -> &Self::Output {
        assert!(row < H, "row must be within height");
        assert!(column < W, "column must be within width");
        &self.0[row][column]
    }
}

impl<const W: usize, const H: usize> IndexMut<(usize, usize)> for Frame2d<W, H> {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut Self::Output {
        assert!(row < H, "row must be within height");
        assert!(column < W, "column must be within width");
        &mut self.0[row][column]
    }
}

impl<const W: usize, const H: usize> From<[[RGB8; W]; H]> for Frame2d<W, H> {
    fn from(array: [[RGB8; W]; H]) -> Self {
        Self(array)
    }
}

impl<const W: usize, const H: usize> Default for Frame2d<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> OriginDimensions for Frame2d<W, H> {
    fn size(&self) -> Size {
        Self::SIZE
    }
}

impl<const W: usize, const H: usize> DrawTarget for Frame2d<W, H> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            let (Ok(column), Ok(row)) = (usize::try_from(coord.x), usize::try_from(coord.y))
            else {
                continue;
            };
            if let Some(pixel) = self.0.get_mut(row).and_then(|cells| cells.get_mut(column)) {
                *pixel = RGB8::new(color.r(), color.g(), color.b());
            }
        }
        Ok(())
    }
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// The 25 panel colors in chain order (index 0 is the first LED on the wire).
///
/// Index with a chain index, or go through [`set_cell`](Self::set_cell) /
/// [`load_frame`](Self::load_frame) to write in panel coordinates.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PixelBuffer([RGB8; PANEL_LEN]);

impl PixelBuffer {
    /// Number of LEDs in the buffer.
    pub const LEN: usize = PANEL_LEN;

    /// Create an all-black buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self([RGB8::new(0, 0, 0); PANEL_LEN])
    }

    /// Set the LED at chain `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 25 or more. Indices come from [`serpentine_index`],
    /// so an out-of-range value is a bug in the caller.
    pub fn set_pixel(&mut self, index: usize, color: RGB8) {
        assert!(index < PANEL_LEN, "pixel index must be within 0..=24");
        self[index] = color;
    }

    /// Set the LED at panel cell `(row, column)`.
    ///
    /// # Panics
    ///
    /// Panics if the cell is outside the panel.
    pub fn set_cell(&mut self, row: usize, column: usize, color: RGB8) {
        self.set_pixel(serpentine_index(row, column), color);
    }

    /// Color of the LED at panel cell `(row, column)`.
    ///
    /// # Panics
    ///
    /// Panics if the cell is outside the panel.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> RGB8 {
        self[serpentine_index(row, column)]
    }

    /// Turn every LED off.
    pub fn clear(&mut self) {
        self.fill(colors::BLACK);
    }

    /// Set every LED to `color`.
    pub fn fill(&mut self, color: RGB8) {
        self.0 = [color; PANEL_LEN];
    }

    /// Copy `frame` into the buffer through the serpentine mapping.
    pub fn load_frame(&mut self, frame: &Frame) {
        for (row, cells) in frame.iter().enumerate() {
            for (column, color) in cells.iter().enumerate() {
                self.set_cell(row, column, *color);
            }
        }
    }

    /// The buffer as a panel-coordinate frame.
    #[must_use]
    pub fn to_frame(&self) -> Frame {
        let mut frame = Frame::new();
        for (index, color) in self.0.iter().enumerate() {
            let (row, column) = serpentine_cell(index);
            frame[(row, column)] = *color;
        }
        frame
    }
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for PixelBuffer {
    type Target = [RGB8; PANEL_LEN];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PixelBuffer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<&Frame> for PixelBuffer {
    fn from(frame: &Frame) -> Self {
        let mut buffer = Self::new();
        buffer.load_frame(frame);
        buffer
    }
}

// ============================================================================
// LedPanel Virtual Device
// ============================================================================

/// The rendering path: a [`PixelBuffer`] and the [`LedTransport`] that flushes it.
///
/// Writes only change the buffer; nothing reaches the LEDs until
/// [`flush`](Self::flush).
pub struct LedPanel<W> {
    buffer: PixelBuffer,
    transport: LedTransport<W>,
}

impl<W: LedWire> LedPanel<W> {
    /// Create a panel with an all-black buffer. Nothing is sent yet.
    pub const fn new(wire: W) -> Self {
        Self {
            buffer: PixelBuffer::new(),
            transport: LedTransport::new(wire),
        }
    }

    /// The pixel buffer as it will be sent on the next flush.
    pub const fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Mutable access to the pixel buffer.
    pub const fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }

    /// See [`PixelBuffer::set_pixel`].
    pub fn set_pixel(&mut self, index: usize, color: RGB8) {
        self.buffer.set_pixel(index, color);
    }

    /// See [`PixelBuffer::clear`].
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// See [`PixelBuffer::fill`].
    pub fn fill(&mut self, color: RGB8) {
        self.buffer.fill(color);
    }

    /// Send the buffer to the LED chain. Blocks until every byte is accepted.
    pub fn flush(&mut self) {
        self.transport.flush(&self.buffer);
    }

    /// Load `frame` and flush it.
    pub fn show_frame(&mut self, frame: &Frame) {
        self.buffer.load_frame(frame);
        self.flush();
    }

    /// Release the wire.
    pub fn into_wire(self) -> W {
        self.transport.into_wire()
    }
}
