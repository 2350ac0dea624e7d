//! Bindings from the hardware seams to `embassy-rp` peripherals.
//!
//! Every binding checks the GPIO it is handed against a [`BoardConfig`], so
//! wiring a keypad row to the wrong pin is an error at startup rather than a
//! dead key.

use embassy_rp::Peri;
use embassy_rp::gpio::{AnyPin, Input, Level, Output, Pin, Pull};

use crate::config::{BoardConfig, KEYPAD_COLUMNS, KEYPAD_ROWS};
use crate::keypad::KeyMatrix;
use crate::{Error, Result};

mod pio_irqs;
pub mod pwm_tone;
pub mod ws2812_pio;

pub use pwm_tone::PwmTone;
pub use ws2812_pio::{LedWireUnit, PioLedWire};

/// Build the keypad from its row and column pins.
///
/// Rows become push-pull outputs starting high. Columns become inputs with
/// pull-ups.
///
/// # Errors
///
/// Returns [`Error::PinMismatch`] if a pin is not the one `config` names for its
/// position.
///
/// # Example
///
/// ```rust,ignore
/// let keypad = board::keypad(
///     [p.PIN_8.into(), p.PIN_7.into(), p.PIN_6.into(), p.PIN_5.into()],
///     [p.PIN_4.into(), p.PIN_3.into(), p.PIN_2.into(), p.PIN_1.into()],
///     &BoardConfig::LOW_BANK,
/// )?;
/// ```
pub fn keypad<'d>(
    rows: [Peri<'d, AnyPin>; KEYPAD_ROWS],
    columns: [Peri<'d, AnyPin>; KEYPAD_COLUMNS],
    config: &BoardConfig,
) -> Result<KeyMatrix<Output<'d>, Input<'d>>> {
    for (pin, expected) in rows.iter().zip(config.row_pins) {
        check_pin("keypad row", expected, pin.pin())?;
    }
    for (pin, expected) in columns.iter().zip(config.column_pins) {
        check_pin("keypad column", expected, pin.pin())?;
    }

    let rows = rows.map(|pin| Output::new(pin, Level::High));
    let columns = columns.map(|pin| Input::new(pin, Pull::Up));
    info!("Board {}: keypad ready", config.name);
    KeyMatrix::new(rows, columns)
}

/// Fail with [`Error::PinMismatch`] unless `actual` is `expected`.
pub(crate) const fn check_pin(role: &'static str, expected: u8, actual: u8) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::PinMismatch {
            role,
            expected,
            actual,
        })
    }
}

/// Reboot into the USB mass-storage bootloader so new firmware can be copied on.
#[cfg(feature = "pico1")]
pub fn reboot_to_bootloader() -> ! {
    info!("Board: rebooting to USB bootloader");
    embassy_rp::rom_data::reset_to_usb_boot(0, 0);
    loop {
        core::hint::spin_loop();
    }
}

/// Reset the chip. The RP2350 boot ROM enters the USB bootloader when BOOTSEL
/// is held during the reset.
#[cfg(feature = "pico2")]
pub fn reboot_to_bootloader() -> ! {
    info!("Board: resetting");
    cortex_m::peripheral::SCB::sys_reset()
}
