//! Key → action dispatch and the control loop.
//!
//! [`Controller`] owns every device. It polls the keypad, runs the action bound
//! to the key to completion, and goes back to polling. Keys pressed while an
//! action runs are not seen.

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use smart_leds::{RGB8, colors};

use crate::Result;
use crate::animation::{self, Animation, library};
use crate::keypad::{Key, KeyMatrix};
use crate::led_panel::{LedPanel, scale};
use crate::led_transport::LedWire;
use crate::music::{self, Melody, melodies};
use crate::timing::block_for;
use crate::tone::{Tone, ToneOutput};

/// Full-brightness green (`smart_leds::colors::GREEN` is the half-intensity CSS green).
const LIME: RGB8 = RGB8::new(0, 255, 0);

/// What a key does.
#[derive(Clone, Copy, Debug)]
pub enum Action {
    /// Turn every LED off.
    Clear,
    /// Fill the panel with one color.
    Fill(RGB8),
    /// Fill the panel with a color scaled to a percentage of its brightness.
    FillScaled {
        /// Color at full brightness.
        color: RGB8,
        /// Brightness, 0..=100.
        percent: u8,
    },
    /// Play a canned animation once.
    Animate(&'static Animation),
    /// Play a melody with its light cascade.
    PlayMelody(&'static Melody),
    /// Hand control back to the caller so it can reboot into the USB bootloader.
    RebootToBootloader,
}

/// Result of dispatching one key.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(not(feature = "host"), derive(defmt::Format))]
pub enum Dispatched {
    /// The bound action ran to completion.
    Completed,
    /// No action is bound to the key; nothing happened.
    Unmapped,
    /// The key asks for a reboot; the caller performs it.
    RebootRequested,
}

/// A fixed table binding keys to actions. Keys not listed are unmapped.
#[derive(Clone, Copy, Debug)]
pub struct Keymap {
    bindings: &'static [(Key, Action)],
}

impl Keymap {
    /// Wrap a binding table. The first binding of a key wins.
    #[must_use]
    pub const fn new(bindings: &'static [(Key, Action)]) -> Self {
        Self { bindings }
    }

    /// The action bound to `key`, if any.
    #[must_use]
    pub fn action_for(&self, key: Key) -> Option<Action> {
        self.bindings
            .iter()
            .find(|(bound_key, _)| *bound_key == key)
            .map(|(_, action)| *action)
    }

    /// Every binding, in table order.
    #[must_use]
    pub const fn bindings(&self) -> &'static [(Key, Action)] {
        self.bindings
    }
}

/// The default bindings.
///
/// | key | action |
/// |-----|--------|
/// | `A` | clear |
/// | `B` | blue |
/// | `C` | red |
/// | `D` | green at 50% |
/// | `#` | white at 20% |
/// | `*` | reboot to USB bootloader |
/// | `0` | "Ode to Joy" with light cascade |
/// | `1`–`8` | [`library::ALL`] in order |
/// | `9` | unmapped |
pub static KEYMAP_DEFAULT: Keymap = Keymap::new(&DEFAULT_BINDINGS);

static DEFAULT_BINDINGS: [(Key, Action); 15] = [
    (Key::A, Action::Clear),
    (Key::B, Action::Fill(colors::BLUE)),
    (Key::C, Action::Fill(colors::RED)),
    (
        Key::D,
        Action::FillScaled {
            color: LIME,
            percent: 50,
        },
    ),
    (
        Key::Hash,
        Action::FillScaled {
            color: colors::WHITE,
            percent: 20,
        },
    ),
    (Key::Star, Action::RebootToBootloader),
    (Key::Digit0, Action::PlayMelody(&melodies::ODE_TO_JOY)),
    (Key::Digit1, Action::Animate(&library::HEARTBEAT)),
    (Key::Digit2, Action::Animate(&library::ARROW)),
    (Key::Digit3, Action::Animate(&library::SPIRAL)),
    (Key::Digit4, Action::Animate(&library::SQUARE)),
    (Key::Digit5, Action::Animate(&library::SMILEY)),
    (Key::Digit6, Action::Animate(&library::CHECKER)),
    (Key::Digit7, Action::Animate(&library::RAIN)),
    (Key::Digit8, Action::Animate(&library::COUNTDOWN)),
];

// ============================================================================
// Controller
// ============================================================================

/// Owns the keypad, panel, buzzer, and delay, and runs the poll/dispatch loop.
///
/// # Example
///
/// ```rust,ignore
/// let mut controller = Controller::new(keypad, panel, tone, Delay, &KEYMAP_DEFAULT)
///     .with_scan_interval(config.scan_interval);
/// controller.run_until_reboot()?;
/// board::reboot_to_bootloader();
/// ```
pub struct Controller<'k, R, C, W, O, D> {
    keypad: KeyMatrix<R, C>,
    panel: LedPanel<W>,
    tone: Tone<O>,
    delay: D,
    keymap: &'k Keymap,
    scan_interval: Duration,
}

impl<'k, R, C, W, O, D> Controller<'k, R, C, W, O, D>
where
    R: OutputPin,
    C: InputPin,
    W: LedWire,
    O: ToneOutput,
    D: DelayNs,
{
    /// Assemble a controller with the default 100 ms scan interval.
    pub const fn new(
        keypad: KeyMatrix<R, C>,
        panel: LedPanel<W>,
        tone: Tone<O>,
        delay: D,
        keymap: &'k Keymap,
    ) -> Self {
        Self {
            keypad,
            panel,
            tone,
            delay,
            keymap,
            scan_interval: crate::config::SCAN_INTERVAL_DEFAULT,
        }
    }

    /// Use a different pause between keypad scans.
    #[must_use]
    pub const fn with_scan_interval(mut self, scan_interval: Duration) -> Self {
        self.scan_interval = scan_interval;
        self
    }

    /// Run the action bound to `key` to completion.
    pub fn dispatch(&mut self, key: Key) -> Dispatched {
        let Some(action) = self.keymap.action_for(key) else {
            warn!("Dispatch: key {} is not mapped", key);
            return Dispatched::Unmapped;
        };
        info!("Dispatch: key {}", key);
        match action {
            Action::Clear => {
                self.panel.clear();
                self.panel.flush();
            }
            Action::Fill(color) => {
                self.panel.fill(color);
                self.panel.flush();
            }
            Action::FillScaled { color, percent } => {
                self.panel.fill(scale(color, percent));
                self.panel.flush();
            }
            Action::Animate(animation) => {
                animation::play(&mut self.panel, &mut self.delay, animation);
            }
            Action::PlayMelody(melody) => {
                music::play_melody(&mut self.panel, &mut self.tone, &mut self.delay, melody);
            }
            Action::RebootToBootloader => return Dispatched::RebootRequested,
        }
        Dispatched::Completed
    }

    /// Scan the keypad once and dispatch the key, if one was pressed.
    ///
    /// Blocks while a key is held and while its action runs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Gpio`](crate::Error::Gpio) if a keypad pin fails.
    pub fn poll(&mut self) -> Result<Option<Dispatched>> {
        let key = self.keypad.scan()?;
        Ok(key.map(|key| self.dispatch(key)))
    }

    /// Poll, then sleep the scan interval, until a key requests a reboot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Gpio`](crate::Error::Gpio) if a keypad pin fails.
    pub fn run_until_reboot(&mut self) -> Result<()> {
        info!("Controller: polling keypad");
        loop {
            if self.poll()? == Some(Dispatched::RebootRequested) {
                info!("Controller: reboot requested");
                self.tone.stop();
                return Ok(());
            }
            block_for(&mut self.delay, self.scan_interval);
        }
    }

    /// The LED panel, for inspection.
    pub const fn panel(&self) -> &LedPanel<W> {
        &self.panel
    }

    /// The buzzer, for inspection.
    pub const fn tone(&self) -> &Tone<O> {
        &self.tone
    }

    /// Take the devices back.
    pub fn into_parts(self) -> (KeyMatrix<R, C>, LedPanel<W>, Tone<O>, D) {
        (self.keypad, self.panel, self.tone, self.delay)
    }
}
