//! Board wiring and timing, passed explicitly to each component at construction.
//!
//! The same firmware runs on several hand-wired boards that differ only in which
//! GPIO numbers the keypad, LED chain, and buzzer use. Each wiring is a
//! [`BoardConfig`] constant; nothing here is mutated after startup.

use embassy_time::Duration;

/// Number of keypad rows.
pub const KEYPAD_ROWS: usize = 4;

/// Number of keypad columns.
pub const KEYPAD_COLUMNS: usize = 4;

/// Number of user GPIOs on the RP2040 (and the RP2350A package).
const GPIO_COUNT: u8 = 30;

/// Default pause between keypad scans.
pub const SCAN_INTERVAL_DEFAULT: Duration = Duration::from_millis(100);

/// PWM output channel of a slice. Even GPIOs are on A, odd GPIOs on B.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(not(feature = "host"), derive(defmt::Format))]
pub enum PwmChannel {
    /// Channel A (even GPIO).
    A,
    /// Channel B (odd GPIO).
    B,
}

/// Pin assignment and timing for one board variant.
///
/// Construct with [`BoardConfig::new`], which rejects (at compile time, for
/// `const` configs) pins beyond the chip and pins used twice.
///
/// ```rust
/// use keypad_panel::config::{BoardConfig, PwmChannel};
///
/// const MY_BOARD: BoardConfig =
///     BoardConfig::new("bench", [8, 7, 6, 5], [4, 3, 2, 1], 9, 21);
///
/// assert_eq!(MY_BOARD.buzzer_slice(), 2);
/// assert_eq!(MY_BOARD.buzzer_channel(), PwmChannel::B);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BoardConfig {
    /// Short name used in log output.
    pub name: &'static str,
    /// Keypad row outputs, top row first. Driven low one at a time.
    pub row_pins: [u8; KEYPAD_ROWS],
    /// Keypad column inputs, left column first. Pulled up, read active-low.
    pub column_pins: [u8; KEYPAD_COLUMNS],
    /// Data line of the WS2812 chain.
    pub led_pin: u8,
    /// PWM output to the piezo buzzer.
    pub buzzer_pin: u8,
    /// Pause between keypad scans in the control loop.
    pub scan_interval: Duration,
}

impl BoardConfig {
    /// Keypad on GPIO 1–8, LED chain on GPIO 9, buzzer on GPIO 21.
    pub const LOW_BANK: Self = Self::new("low-bank", [8, 7, 6, 5], [4, 3, 2, 1], 9, 21);

    /// Keypad on GPIO 4, 8, 9 and 16–20, LED chain on GPIO 7, buzzer on GPIO 10.
    pub const HIGH_BANK: Self = Self::new("high-bank", [16, 17, 18, 19], [20, 4, 9, 8], 7, 10);

    /// Create a board configuration with the default scan interval.
    ///
    /// # Panics
    ///
    /// Panics if a pin number is not a user GPIO or if any pin is assigned twice.
    #[must_use]
    pub const fn new(
        name: &'static str,
        row_pins: [u8; KEYPAD_ROWS],
        column_pins: [u8; KEYPAD_COLUMNS],
        led_pin: u8,
        buzzer_pin: u8,
    ) -> Self {
        let config = Self {
            name,
            row_pins,
            column_pins,
            led_pin,
            buzzer_pin,
            scan_interval: SCAN_INTERVAL_DEFAULT,
        };
        config.assert_valid();
        config
    }

    /// Return a copy with a different pause between keypad scans.
    #[must_use]
    pub const fn with_scan_interval(self, scan_interval: Duration) -> Self {
        Self {
            scan_interval,
            ..self
        }
    }

    /// All ten pins in a fixed order: rows, columns, LED, buzzer.
    #[must_use]
    pub const fn pins(&self) -> [u8; 10] {
        let [r0, r1, r2, r3] = self.row_pins;
        let [c0, c1, c2, c3] = self.column_pins;
        [r0, r1, r2, r3, c0, c1, c2, c3, self.led_pin, self.buzzer_pin]
    }

    /// PWM slice that drives the buzzer pin (`slice = (pin / 2) % 8`).
    #[must_use]
    pub const fn buzzer_slice(&self) -> u8 {
        (self.buzzer_pin / 2) % 8
    }

    /// PWM channel that drives the buzzer pin.
    #[must_use]
    pub const fn buzzer_channel(&self) -> PwmChannel {
        if self.buzzer_pin % 2 == 0 {
            PwmChannel::A
        } else {
            PwmChannel::B
        }
    }

    const fn assert_valid(&self) {
        let pins = self.pins();
        let mut i = 0;
        while i < pins.len() {
            assert!(pins[i] < GPIO_COUNT, "pin must be a user GPIO (0..=29)");
            let mut j = i + 1;
            while j < pins.len() {
                assert!(pins[i] != pins[j], "each pin may be assigned only once");
                j += 1;
            }
            i += 1;
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::LOW_BANK
    }
}
