//! Recording stand-ins for the hardware seams, shared by the host tests.
#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::convert::Infallible;
use std::sync::{Arc, Mutex, MutexGuard};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use keypad_panel::config::KEYPAD_ROWS;
use keypad_panel::keypad::KeyMatrix;
use keypad_panel::led_panel::LedPanel;
use keypad_panel::led_transport::LedWire;
use keypad_panel::tone::{PwmSettings, Tone, ToneOutput};

/// Source clock used by every test tone.
pub const CLOCK_HZ: u32 = 125_000_000;

/// Something a device did, in the order it happened.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Event {
    /// One complete flush: every byte written before the latch.
    Flush(Vec<u8>),
    ToneStart(PwmSettings),
    ToneStop,
    SleepNs(u64),
}

/// A shared, ordered log of [`Event`]s.
#[derive(Clone, Default)]
pub struct Timeline(Arc<Mutex<Vec<Event>>>);

impl Timeline {
    pub fn push(&self, event: Event) {
        self.lock().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.lock().clone()
    }

    pub fn flushes(&self) -> Vec<Vec<u8>> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                Event::Flush(bytes) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn slept_ms(&self) -> u64 {
        self.lock()
            .iter()
            .map(|event| match event {
                Event::SleepNs(ns) => *ns,
                _ => 0,
            })
            .sum::<u64>()
            / 1_000_000
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Event>> {
        self.0.lock().expect("timeline lock poisoned")
    }
}

// ============================================================================
// LED wire, tone output, delay
// ============================================================================

pub struct RecordingWire {
    timeline: Timeline,
    pending: Vec<u8>,
}

impl RecordingWire {
    pub fn new(timeline: &Timeline) -> Self {
        Self {
            timeline: timeline.clone(),
            pending: Vec::new(),
        }
    }
}

impl LedWire for RecordingWire {
    fn write_byte(&mut self, byte: u8) {
        self.pending.push(byte);
    }

    fn latch(&mut self) {
        self.timeline
            .push(Event::Flush(std::mem::take(&mut self.pending)));
    }
}

pub struct RecordingTone {
    timeline: Timeline,
}

impl ToneOutput for RecordingTone {
    fn start(&mut self, settings: PwmSettings) {
        self.timeline.push(Event::ToneStart(settings));
    }

    fn stop(&mut self) {
        self.timeline.push(Event::ToneStop);
    }
}

pub struct RecordingDelay {
    timeline: Timeline,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.timeline.push(Event::SleepNs(u64::from(ns)));
    }

    fn delay_us(&mut self, us: u32) {
        self.timeline.push(Event::SleepNs(u64::from(us) * 1_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.timeline.push(Event::SleepNs(u64::from(ms) * 1_000_000));
    }
}

pub fn panel(timeline: &Timeline) -> LedPanel<RecordingWire> {
    LedPanel::new(RecordingWire::new(timeline))
}

pub fn tone(timeline: &Timeline) -> Tone<RecordingTone> {
    Tone::new(
        RecordingTone {
            timeline: timeline.clone(),
        },
        CLOCK_HZ,
    )
}

pub fn delay(timeline: &Timeline) -> RecordingDelay {
    RecordingDelay {
        timeline: timeline.clone(),
    }
}

// ============================================================================
// Keypad matrix
// ============================================================================

#[derive(Default)]
struct MatrixState {
    /// `true` while the row is driven low.
    row_low: [bool; KEYPAD_ROWS],
    /// The key held down, as `(row, column)`.
    pressed: Option<(usize, usize)>,
    /// Reads of the pressed column left before the key lets go; `None` holds forever.
    reads_until_release: Option<u32>,
    /// Scans started so far (each scan drives row 0 low first).
    scans: u32,
    /// The pressed key reads low only once more than this many scans have started.
    pressed_after_scans: u32,
    /// Every row transition, as `(row, driven_low)`.
    row_history: Vec<(usize, bool)>,
}

/// A simulated 4×4 keypad wired like the real one: rows drive, columns pull up.
#[derive(Clone, Default)]
pub struct Matrix(Arc<Mutex<MatrixState>>);

impl Matrix {
    /// Hold the key at `(row, column)` for `reads` column reads, then release it.
    pub fn press(&self, row: usize, column: usize, reads: u32) {
        let mut state = self.lock();
        state.pressed = Some((row, column));
        state.reads_until_release = Some(reads);
        state.pressed_after_scans = 0;
    }

    /// Like [`press`](Self::press), but the key goes down only after
    /// `idle_scans` more scans have found the keypad idle.
    pub fn press_after(&self, idle_scans: u32, row: usize, column: usize, reads: u32) {
        let mut state = self.lock();
        state.pressed = Some((row, column));
        state.reads_until_release = Some(reads);
        state.pressed_after_scans = state.scans + idle_scans;
    }

    pub fn scans(&self) -> u32 {
        self.lock().scans
    }

    /// Hold the key at `(row, column)` until [`release`](Self::release).
    pub fn hold(&self, row: usize, column: usize) {
        let mut state = self.lock();
        state.pressed = Some((row, column));
        state.reads_until_release = None;
        state.pressed_after_scans = 0;
    }

    pub fn release(&self) {
        self.lock().pressed = None;
    }

    pub fn is_pressed(&self) -> bool {
        self.lock().pressed.is_some()
    }

    pub fn rows_low(&self) -> [bool; KEYPAD_ROWS] {
        self.lock().row_low
    }

    pub fn row_history(&self) -> Vec<(usize, bool)> {
        self.lock().row_history.clone()
    }

    pub fn key_matrix(&self) -> KeyMatrix<RowPin, ColumnPin> {
        let rows = std::array::from_fn(|row| RowPin {
            row,
            matrix: self.clone(),
        });
        let columns = std::array::from_fn(|column| ColumnPin {
            column,
            matrix: self.clone(),
        });
        KeyMatrix::new(rows, columns).expect("simulated pins never fail")
    }

    fn lock(&self) -> MutexGuard<'_, MatrixState> {
        self.0.lock().expect("matrix lock poisoned")
    }
}

pub struct RowPin {
    row: usize,
    matrix: Matrix,
}

impl ErrorType for RowPin {
    type Error = Infallible;
}

impl OutputPin for RowPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        let mut state = self.matrix.lock();
        state.row_low[self.row] = true;
        state.row_history.push((self.row, true));
        if self.row == 0 {
            state.scans += 1;
        }
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        let mut state = self.matrix.lock();
        state.row_low[self.row] = false;
        state.row_history.push((self.row, false));
        Ok(())
    }
}

pub struct ColumnPin {
    column: usize,
    matrix: Matrix,
}

impl ErrorType for ColumnPin {
    type Error = Infallible;
}

impl InputPin for ColumnPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.is_low().map(|low| !low)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        let mut state = self.matrix.lock();
        let Some((row, column)) = state.pressed else {
            return Ok(false);
        };
        if column != self.column || !state.row_low[row] || state.scans <= state.pressed_after_scans
        {
            return Ok(false);
        }
        match state.reads_until_release {
            Some(0) => {
                state.pressed = None;
                Ok(false)
            }
            Some(reads) => {
                state.reads_until_release = Some(reads - 1);
                Ok(true)
            }
            None => {
                // Let a holding test thread get in to release the key.
                drop(state);
                std::thread::yield_now();
                Ok(true)
            }
        }
    }
}
