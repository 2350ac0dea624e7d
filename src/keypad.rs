//! A device abstraction for a 4×4 matrix keypad with release debouncing.
//!
//! See [`KeyMatrix`] for the scan algorithm and its blocking behavior.

use core::fmt;

use embedded_hal::digital::{Error as _, InputPin, OutputPin};

use crate::Result;
use crate::config::{KEYPAD_COLUMNS, KEYPAD_ROWS};

// ============================================================================
// Key - The sixteen symbols
// ============================================================================

/// One key of the 4×4 keypad, named by the symbol printed on it.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(not(feature = "host"), derive(defmt::Format))]
pub enum Key {
    /// `0`
    Digit0,
    /// `1`
    Digit1,
    /// `2`
    Digit2,
    /// `3`
    Digit3,
    /// `4`
    Digit4,
    /// `5`
    Digit5,
    /// `6`
    Digit6,
    /// `7`
    Digit7,
    /// `8`
    Digit8,
    /// `9`
    Digit9,
    /// `A`
    A,
    /// `B`
    B,
    /// `C`
    C,
    /// `D`
    D,
    /// `*`
    Star,
    /// `#`
    Hash,
}

impl Key {
    /// The symbol printed on the key.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Digit0 => '0',
            Self::Digit1 => '1',
            Self::Digit2 => '2',
            Self::Digit3 => '3',
            Self::Digit4 => '4',
            Self::Digit5 => '5',
            Self::Digit6 => '6',
            Self::Digit7 => '7',
            Self::Digit8 => '8',
            Self::Digit9 => '9',
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::Star => '*',
            Self::Hash => '#',
        }
    }

    /// Look up a key by its printed symbol.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        Some(match symbol {
            '0' => Self::Digit0,
            '1' => Self::Digit1,
            '2' => Self::Digit2,
            '3' => Self::Digit3,
            '4' => Self::Digit4,
            '5' => Self::Digit5,
            '6' => Self::Digit6,
            '7' => Self::Digit7,
            '8' => Self::Digit8,
            '9' => Self::Digit9,
            'A' => Self::A,
            'B' => Self::B,
            'C' => Self::C,
            'D' => Self::D,
            '*' => Self::Star,
            '#' => Self::Hash,
            _ => return None,
        })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Which key sits at each `(row, column)` of the matrix.
pub type KeyLayout = [[Key; KEYPAD_COLUMNS]; KEYPAD_ROWS];

/// Telephone-style layout: digits on the left, `A`–`D` down the right column.
///
/// ```text
/// 1 2 3 A
/// 4 5 6 B
/// 7 8 9 C
/// * 0 # D
/// ```
pub const KEY_LAYOUT_DEFAULT: KeyLayout = [
    [Key::Digit1, Key::Digit2, Key::Digit3, Key::A],
    [Key::Digit4, Key::Digit5, Key::Digit6, Key::B],
    [Key::Digit7, Key::Digit8, Key::Digit9, Key::C],
    [Key::Star, Key::Digit0, Key::Hash, Key::D],
];

// ============================================================================
// KeyMatrix Virtual Device
// ============================================================================

/// A 4×4 matrix keypad scanned by driving rows low and reading columns.
///
/// # Hardware Requirements
///
/// Rows are push-pull outputs, idle high. Columns are inputs with pull-ups, so a
/// column reads low only while a key joins it to the row currently driven low.
///
/// # Blocking
///
/// [`scan`](Self::scan) returns once per completed press-release cycle. When it
/// finds a pressed key it busy-waits, re-reading that column, until the key reads
/// released. There is no timeout: a stuck or held key blocks the caller forever.
///
/// # Example
///
/// ```rust,ignore
/// let mut keypad = KeyMatrix::new(rows, columns)?;
/// loop {
///     if let Some(key) = keypad.scan()? {
///         // handle key
///     }
/// }
/// ```
pub struct KeyMatrix<R, C> {
    rows: [R; KEYPAD_ROWS],
    columns: [C; KEYPAD_COLUMNS],
    layout: KeyLayout,
}

impl<R, C> KeyMatrix<R, C>
where
    R: OutputPin,
    C: InputPin,
{
    /// Creates a keypad with [`KEY_LAYOUT_DEFAULT`] and drives every row high.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Gpio`](crate::Error::Gpio) if a row pin cannot be set.
    pub fn new(rows: [R; KEYPAD_ROWS], columns: [C; KEYPAD_COLUMNS]) -> Result<Self> {
        Self::with_layout(rows, columns, KEY_LAYOUT_DEFAULT)
    }

    /// Creates a keypad with a custom symbol layout and drives every row high.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Gpio`](crate::Error::Gpio) if a row pin cannot be set.
    pub fn with_layout(
        mut rows: [R; KEYPAD_ROWS],
        columns: [C; KEYPAD_COLUMNS],
        layout: KeyLayout,
    ) -> Result<Self> {
        for row in &mut rows {
            row.set_high().map_err(|err| err.kind())?;
        }
        Ok(Self {
            rows,
            columns,
            layout,
        })
    }

    /// Scans every row once and reports a completed key press, if any.
    ///
    /// Each row is driven low in turn and all columns are read. On the first
    /// column reading low, the scan waits for that column to read high again
    /// (release), restores the row to high, and returns the key. A key that is
    /// never released makes this call never return.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Gpio`](crate::Error::Gpio) if a pin reports an error.
    pub fn scan(&mut self) -> Result<Option<Key>> {
        let Self {
            rows,
            columns,
            layout,
        } = self;

        for ((row_index, row), row_keys) in rows.iter_mut().enumerate().zip(layout.iter()) {
            row.set_low().map_err(|err| err.kind())?;

            let pressed = find_low_column(columns)?;
            if let Some((column_index, column)) = pressed {
                wait_for_release(column)?;
                row.set_high().map_err(|err| err.kind())?;
                let key = row_keys.get(column_index).copied();
                if let Some(key) = key {
                    debug!(
                        "KeyMatrix: {} released at row {} column {}",
                        key,
                        row_index,
                        column_index
                    );
                }
                return Ok(key);
            }

            row.set_high().map_err(|err| err.kind())?;
        }
        Ok(None)
    }

    /// Release the pins.
    pub fn into_parts(self) -> ([R; KEYPAD_ROWS], [C; KEYPAD_COLUMNS]) {
        (self.rows, self.columns)
    }
}

fn find_low_column<C: InputPin>(columns: &mut [C]) -> Result<Option<(usize, &mut C)>> {
    for (column_index, column) in columns.iter_mut().enumerate() {
        if column.is_low().map_err(|err| err.kind())? {
            return Ok(Some((column_index, column)));
        }
    }
    Ok(None)
}

// Debounce by waiting out the press. No timeout.
fn wait_for_release<C: InputPin>(column: &mut C) -> Result<()> {
    while column.is_low().map_err(|err| err.kind())? {}
    Ok(())
}
