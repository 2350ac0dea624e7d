//! Playing a melody on the buzzer with a matching light cascade on the panel.
//!
//! For each note the buzzer plays for the note's duration while the panel shows
//! a vertical ripple: the center column opens from the middle row and closes
//! again along a triangular envelope, and each column further out repeats it one
//! [`TICK`] later. Audio and light are both timed from the same note duration,
//! so they start and end together.
//!
//! The canned melodies live in [`melodies`].

use embassy_time::Duration;
use embedded_graphics::prelude::{DrawTarget, Pixel, Point};
use embedded_hal::delay::DelayNs;
use smart_leds::RGB8;

use crate::led_panel::{Frame, LedPanel, PANEL_HEIGHT, PANEL_WIDTH, PixelBuffer, Rgb888};
use crate::led_transport::LedWire;
use crate::timing::block_for;
use crate::tone::{Tone, ToneOutput};

pub mod melodies;

/// Step of the light cascade. Each column lags its inner neighbor by one tick.
pub const TICK: Duration = Duration::from_millis(TICK_MS as u64);

const TICK_MS: u32 = 50;
const COLUMNS: i32 = PANEL_WIDTH as i32;
const CENTER_X: i32 = COLUMNS / 2;
const CENTER_Y: i32 = PANEL_HEIGHT as i32 / 2;
// Offsets past this would leave the panel.
const OFFSET_MAX: u32 = CENTER_Y as u32;

/// One note: a frequency, how long it sounds, and the silence after it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Note {
    /// Pitch in hertz. Never zero.
    pub frequency_hz: u32,
    /// How long the tone (and its light envelope) lasts.
    pub duration: Duration,
    /// Dark, silent pause after the note.
    pub rest: Duration,
}

impl Note {
    /// Create a note from millisecond durations.
    ///
    /// # Panics
    ///
    /// Panics (at compile time in `const` tables) if `frequency_hz` is zero.
    #[must_use]
    pub const fn new(frequency_hz: u32, duration_ms: u64, rest_ms: u64) -> Self {
        assert!(frequency_hz > 0, "note frequency must be positive");
        Self {
            frequency_hz,
            duration: Duration::from_millis(duration_ms),
            rest: Duration::from_millis(rest_ms),
        }
    }
}

/// A named, fixed sequence of notes.
#[derive(Clone, Copy, Debug)]
pub struct Melody {
    /// Name used in log output.
    pub name: &'static str,
    /// Notes in playing order.
    pub notes: &'static [Note],
}

impl Melody {
    /// Sum of every note duration and rest.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.notes
            .iter()
            .fold(Duration::from_ticks(0), |total, note| {
                total + note.duration + note.rest
            })
    }
}

/// Panel color of a note: `(255 - f mod 256, 0, f mod 256)`.
#[must_use]
pub const fn note_color(frequency_hz: u32) -> RGB8 {
    let low_byte = (frequency_hz % 256) as u8;
    RGB8::new(u8::MAX - low_byte, 0, low_byte)
}

/// Peak envelope offset of a note: `(f mod 5) + 1`, so 1..=5 rows.
#[must_use]
pub const fn note_amplitude(frequency_hz: u32) -> u32 {
    frequency_hz % 5 + 1
}

/// Triangular envelope: rises from 0 to `amplitude` over the first half of
/// `duration_ms`, then falls back to 0 at `duration_ms`.
///
/// ```rust
/// use keypad_panel::music::envelope_offset;
///
/// assert_eq!(envelope_offset(0, 400, 4), 0);
/// assert_eq!(envelope_offset(100, 400, 4), 2);
/// assert_eq!(envelope_offset(200, 400, 4), 4);
/// assert_eq!(envelope_offset(300, 400, 4), 2);
/// assert_eq!(envelope_offset(400, 400, 4), 0);
/// ```
#[must_use]
pub const fn envelope_offset(elapsed_ms: u32, duration_ms: u32, amplitude: u32) -> u32 {
    let half = duration_ms / 2;
    if half == 0 {
        return 0;
    }
    let elapsed_ms = if elapsed_ms > duration_ms {
        duration_ms
    } else {
        elapsed_ms
    };
    if elapsed_ms < half {
        elapsed_ms * amplitude / half
    } else {
        (duration_ms - elapsed_ms) * amplitude / half
    }
}

/// Draw one tick of the cascade into `buffer`.
///
/// The tick is drawn on a blank [`Frame`] that then replaces the whole buffer.
/// Each column at distance `d` from the center lights
/// the two rows `center ± offset`, where `offset` is the envelope at
/// `elapsed_ms - d × TICK`, clipped to the panel. Columns whose lag has not yet
/// elapsed stay dark.
pub fn render_cascade(
    buffer: &mut PixelBuffer,
    elapsed_ms: u32,
    duration_ms: u32,
    amplitude: u32,
    color: RGB8,
) {
    let pixel_color = Rgb888::new(color.r, color.g, color.b);
    let mut frame = Frame::new();
    for x in 0..COLUMNS {
        let distance = x.abs_diff(CENTER_X);
        let Some(lagged_ms) = elapsed_ms.checked_sub(TICK_MS.saturating_mul(distance)) else {
            continue;
        };
        let offset = envelope_offset(lagged_ms, duration_ms, amplitude).min(OFFSET_MAX);
        let offset = i32::try_from(offset).unwrap_or(CENTER_Y);
        let Ok(()) = frame.draw_iter([
            Pixel(Point::new(x, CENTER_Y.saturating_sub(offset)), pixel_color),
            Pixel(Point::new(x, CENTER_Y.saturating_add(offset)), pixel_color),
        ]);
    }
    buffer.load_frame(&frame);
}

/// Play every note of `melody` in order with its light cascade.
///
/// Blocks for the sum of every note's duration and rest (plus flush time).
pub fn play_melody<W, O, D>(
    panel: &mut LedPanel<W>,
    tone: &mut Tone<O>,
    delay: &mut D,
    melody: &Melody,
) where
    W: LedWire,
    O: ToneOutput,
    D: DelayNs,
{
    info!("Melody {}: {} notes", melody.name, melody.notes.len());
    for note in melody.notes {
        play_note(panel, tone, delay, note);
    }
    debug!("Melody {}: done", melody.name);
}

/// Play one note with its light cascade, then rest dark and silent.
///
/// The tone starts before the first tick. Ticks run at `0, 50, 100, …` ms while
/// below the note duration; each draws, flushes, and sleeps one [`TICK`], or
/// only what is left of the note on the last tick. Then the tone stops, the
/// panel is cleared and flushed, and the rest is slept.
pub fn play_note<W, O, D>(panel: &mut LedPanel<W>, tone: &mut Tone<O>, delay: &mut D, note: &Note)
where
    W: LedWire,
    O: ToneOutput,
    D: DelayNs,
{
    let duration_ms = u32::try_from(note.duration.as_millis()).unwrap_or(u32::MAX);
    let color = note_color(note.frequency_hz);
    let amplitude = note_amplitude(note.frequency_hz);
    trace!(
        "Note {}Hz for {}ms, amplitude {}",
        note.frequency_hz,
        duration_ms,
        amplitude
    );

    tone.start(note.frequency_hz);
    let mut elapsed_ms = 0;
    while elapsed_ms < duration_ms {
        render_cascade(
            panel.buffer_mut(),
            elapsed_ms,
            duration_ms,
            amplitude,
            color,
        );
        panel.flush();
        let step_ms = TICK_MS.min(duration_ms.saturating_sub(elapsed_ms));
        block_for(delay, Duration::from_millis(u64::from(step_ms)));
        elapsed_ms = elapsed_ms.saturating_add(TICK_MS);
    }
    tone.stop();

    panel.clear();
    panel.flush();
    block_for(delay, note.rest);
}
