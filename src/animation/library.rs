//! The canned animations bound to the digit keys.
//!
//! Frames are drawn as 5-bit row masks (`0b10000` is the leftmost column).

use embassy_time::Duration;
use smart_leds::colors;

use super::{Animation, PlaybackMode};
use crate::led_panel::Frame;

const fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

// ============================================================================
// Heartbeat
// ============================================================================

const HEART_SMALL: Frame = Frame::from_mask(
    [0b00000, 0b01010, 0b01110, 0b00100, 0b00000],
    colors::RED,
);
const HEART_BIG: Frame = Frame::from_mask(
    [0b01010, 0b11111, 0b11111, 0b01110, 0b00100],
    colors::RED,
);

/// A red heart beating twice.
pub static HEARTBEAT: Animation = Animation {
    name: "heartbeat",
    mode: PlaybackMode::Overwrite,
    steps: &[
        (HEART_SMALL, ms(300)),
        (HEART_BIG, ms(200)),
        (HEART_SMALL, ms(150)),
        (HEART_BIG, ms(200)),
        (HEART_SMALL, ms(600)),
    ],
};

// ============================================================================
// Arrow
// ============================================================================

/// A green chevron crossing the panel left to right.
pub static ARROW: Animation = Animation {
    name: "arrow",
    mode: PlaybackMode::ClearBetween,
    steps: &[
        (
            Frame::from_mask([0b00000, 0b00000, 0b10000, 0b00000, 0b00000], colors::GREEN),
            ms(150),
        ),
        (
            Frame::from_mask([0b00000, 0b10000, 0b01000, 0b10000, 0b00000], colors::GREEN),
            ms(150),
        ),
        (
            Frame::from_mask([0b10000, 0b01000, 0b00100, 0b01000, 0b10000], colors::GREEN),
            ms(150),
        ),
        (
            Frame::from_mask([0b01000, 0b00100, 0b00010, 0b00100, 0b01000], colors::GREEN),
            ms(150),
        ),
        (
            Frame::from_mask([0b00100, 0b00010, 0b00001, 0b00010, 0b00100], colors::GREEN),
            ms(150),
        ),
    ],
};

// ============================================================================
// Spiral
// ============================================================================

const SPIRAL_TOP: Frame = Frame::from_mask(
    [0b11111, 0b00000, 0b00000, 0b00000, 0b00000],
    colors::BLUE,
);
const SPIRAL_RIGHT: Frame = SPIRAL_TOP.with_mask(
    [0b00000, 0b00001, 0b00001, 0b00001, 0b00001],
    colors::BLUE,
);
const SPIRAL_BOTTOM: Frame = SPIRAL_RIGHT.with_mask(
    [0b00000, 0b00000, 0b00000, 0b00000, 0b11110],
    colors::BLUE,
);
const SPIRAL_LEFT: Frame = SPIRAL_BOTTOM.with_mask(
    [0b00000, 0b10000, 0b10000, 0b10000, 0b00000],
    colors::BLUE,
);
const SPIRAL_INNER: Frame = SPIRAL_LEFT.with_mask(
    [0b00000, 0b01110, 0b01010, 0b01110, 0b00000],
    colors::PURPLE,
);
const SPIRAL_CENTER: Frame = SPIRAL_INNER.with_mask(
    [0b00000, 0b00000, 0b00100, 0b00000, 0b00000],
    colors::WHITE,
);

/// The panel filling in a clockwise spiral from the top-left corner.
pub static SPIRAL: Animation = Animation {
    name: "spiral",
    mode: PlaybackMode::Overwrite,
    steps: &[
        (SPIRAL_TOP, ms(200)),
        (SPIRAL_RIGHT, ms(200)),
        (SPIRAL_BOTTOM, ms(200)),
        (SPIRAL_LEFT, ms(200)),
        (SPIRAL_INNER, ms(250)),
        (SPIRAL_CENTER, ms(500)),
    ],
};

// ============================================================================
// Square
// ============================================================================

const SQUARE_DOT: Frame = Frame::from_mask(
    [0b00000, 0b00000, 0b00100, 0b00000, 0b00000],
    colors::CYAN,
);
const SQUARE_MIDDLE: Frame = Frame::from_mask(
    [0b00000, 0b01110, 0b01010, 0b01110, 0b00000],
    colors::CYAN,
);
const SQUARE_EDGE: Frame = Frame::from_mask(
    [0b11111, 0b10001, 0b10001, 0b10001, 0b11111],
    colors::CYAN,
);

/// A cyan square growing out of the center and shrinking back.
pub static SQUARE: Animation = Animation {
    name: "square",
    mode: PlaybackMode::ClearBetween,
    steps: &[
        (SQUARE_DOT, ms(200)),
        (SQUARE_MIDDLE, ms(200)),
        (SQUARE_EDGE, ms(300)),
        (SQUARE_MIDDLE, ms(200)),
        (SQUARE_DOT, ms(200)),
    ],
};

// ============================================================================
// Smiley
// ============================================================================

const SMILEY_OPEN: Frame = Frame::from_mask(
    [0b00000, 0b01010, 0b00000, 0b10001, 0b01110],
    colors::YELLOW,
);
const SMILEY_WINK: Frame = Frame::from_mask(
    [0b00000, 0b11010, 0b00000, 0b10001, 0b01110],
    colors::YELLOW,
);

/// A yellow smiley that winks.
pub static SMILEY: Animation = Animation {
    name: "smiley",
    mode: PlaybackMode::Overwrite,
    steps: &[
        (SMILEY_OPEN, ms(600)),
        (SMILEY_WINK, ms(300)),
        (SMILEY_OPEN, ms(600)),
    ],
};

// ============================================================================
// Checker
// ============================================================================

const CHECKER_EVEN: Frame = Frame::from_mask(
    [0b10101, 0b01010, 0b10101, 0b01010, 0b10101],
    colors::MAGENTA,
)
.with_mask(
    [0b01010, 0b10101, 0b01010, 0b10101, 0b01010],
    colors::ORANGE,
);
const CHECKER_ODD: Frame = Frame::from_mask(
    [0b10101, 0b01010, 0b10101, 0b01010, 0b10101],
    colors::ORANGE,
)
.with_mask(
    [0b01010, 0b10101, 0b01010, 0b10101, 0b01010],
    colors::MAGENTA,
);

/// A magenta and orange checkerboard swapping colors.
pub static CHECKER: Animation = Animation {
    name: "checker",
    mode: PlaybackMode::Overwrite,
    steps: &[
        (CHECKER_EVEN, ms(250)),
        (CHECKER_ODD, ms(250)),
        (CHECKER_EVEN, ms(250)),
        (CHECKER_ODD, ms(250)),
    ],
};

// ============================================================================
// Rain
// ============================================================================

/// Blue drops falling one row per frame.
pub static RAIN: Animation = Animation {
    name: "rain",
    mode: PlaybackMode::ClearBetween,
    steps: &[
        (
            Frame::from_mask([0b10001, 0b00000, 0b00100, 0b00000, 0b01000], colors::BLUE),
            ms(120),
        ),
        (
            Frame::from_mask([0b01000, 0b10001, 0b00000, 0b00100, 0b00000], colors::BLUE),
            ms(120),
        ),
        (
            Frame::from_mask([0b00000, 0b01000, 0b10001, 0b00000, 0b00100], colors::BLUE),
            ms(120),
        ),
        (
            Frame::from_mask([0b00100, 0b00000, 0b01000, 0b10001, 0b00000], colors::BLUE),
            ms(120),
        ),
        (
            Frame::from_mask([0b00000, 0b00100, 0b00000, 0b01000, 0b10001], colors::BLUE),
            ms(120),
        ),
    ],
};

// ============================================================================
// Countdown
// ============================================================================

/// 3, 2, 1 in white, then a green flash.
pub static COUNTDOWN: Animation = Animation {
    name: "countdown",
    mode: PlaybackMode::ClearBetween,
    steps: &[
        (
            Frame::from_mask([0b11110, 0b00001, 0b01110, 0b00001, 0b11110], colors::WHITE),
            ms(1000),
        ),
        (
            Frame::from_mask([0b11110, 0b00001, 0b01110, 0b10000, 0b11111], colors::WHITE),
            ms(1000),
        ),
        (
            Frame::from_mask([0b00100, 0b01100, 0b00100, 0b00100, 0b01110], colors::WHITE),
            ms(1000),
        ),
        (Frame::filled(colors::GREEN), ms(500)),
    ],
};

/// Every canned animation, in digit-key order (`1` first).
pub static ALL: [&Animation; 8] = [
    &HEARTBEAT, &ARROW, &SPIRAL, &SQUARE, &SMILEY, &CHECKER, &RAIN, &COUNTDOWN,
];
