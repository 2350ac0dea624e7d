use derive_more::{Display, Error, From};
use embedded_hal::digital::ErrorKind;

/// Crate-wide result type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors raised while bringing up or driving the board.
///
/// Caller precondition violations (pixel index out of range, a zero tone
/// frequency) are not represented here; they panic.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// A keypad row or column pin reported an error.
    #[display("GPIO error: {_0:?}")]
    #[from]
    Gpio(#[error(not(source))] ErrorKind),

    /// Neither PIO block could be claimed for the LED wire.
    #[display("no free PIO block for the LED wire")]
    NoFreeExecutionUnit,

    /// A board binding received a pin that disagrees with its `BoardConfig`.
    #[display("{role} pin mismatch: config says GPIO{expected}, got GPIO{actual}")]
    PinMismatch {
        /// Which pin (for example `"row"` or `"buzzer"`).
        role: &'static str,
        /// Pin number recorded in the configuration.
        expected: u8,
        /// Pin number actually handed to the binding.
        actual: u8,
    },
}
