//! A device abstraction for a piezo buzzer driven by one PWM channel.
//!
//! [`Tone::start`] turns a frequency into a PWM clock divider, a wrap (period)
//! count, and a 50% compare level; [`Tone::stop`] drives the level to zero and
//! disables the slice.

/// Largest PWM counter wrap value (16-bit counter).
const WRAP_MAX: u64 = u16::MAX as u64;

/// Largest integer PWM clock divider.
const DIVIDER_MAX: u64 = u8::MAX as u64;

/// Divider, wrap, and compare level that produce one tone.
///
/// The PWM counter runs at `source_clock / divider` and counts `0..=wrap`, so the
/// output frequency is `source_clock / divider / (wrap + 1)`. `level` is half of
/// `wrap` for a square wave.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(not(feature = "host"), derive(defmt::Format))]
pub struct PwmSettings {
    /// Integer clock divider, 1..=255.
    pub divider: u8,
    /// Counter wrap value: `(source_clock / divider) / frequency - 1`.
    pub wrap: u16,
    /// Compare level: `wrap / 2`.
    pub level: u16,
}

impl PwmSettings {
    /// Compute the settings for `frequency_hz` from a `source_clock_hz` PWM clock.
    ///
    /// The divider is the smallest integer that keeps `wrap` within 16 bits.
    ///
    /// ```rust
    /// use keypad_panel::tone::PwmSettings;
    ///
    /// let settings = PwmSettings::for_frequency(125_000_000, 440);
    /// assert_eq!(settings.divider, 5);
    /// assert_eq!(settings.wrap, 56_817);
    /// assert_eq!(settings.level, 28_408);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `frequency_hz` is zero. Callers only pass frequencies from
    /// note tables, which are checked when the table is built.
    #[must_use]
    pub const fn for_frequency(source_clock_hz: u32, frequency_hz: u32) -> Self {
        assert!(frequency_hz > 0, "tone frequency must be positive");
        let source_clock_hz = source_clock_hz as u64;
        let frequency_hz = frequency_hz as u64;

        let counts_per_divider = frequency_hz * (WRAP_MAX + 1);
        let mut divider = source_clock_hz.div_ceil(counts_per_divider);
        if divider < 1 {
            divider = 1;
        } else if divider > DIVIDER_MAX {
            divider = DIVIDER_MAX;
        }

        let mut wrap = (source_clock_hz / divider / frequency_hz).saturating_sub(1);
        if wrap > WRAP_MAX {
            wrap = WRAP_MAX;
        }

        Self {
            divider: divider as u8,
            wrap: wrap as u16,
            level: (wrap / 2) as u16,
        }
    }
}

/// A PWM channel that can play and silence a square wave.
pub trait ToneOutput {
    /// Program divider, wrap, and compare level, and enable the output.
    fn start(&mut self, settings: PwmSettings);

    /// Drive the compare level to zero and disable the output.
    fn stop(&mut self);
}

impl<T: ToneOutput + ?Sized> ToneOutput for &mut T {
    fn start(&mut self, settings: PwmSettings) {
        (**self).start(settings);
    }

    fn stop(&mut self) {
        (**self).stop();
    }
}

// ============================================================================
// Tone Virtual Device
// ============================================================================

/// A buzzer that plays one frequency at a time.
///
/// # Example
///
/// ```rust,ignore
/// let mut tone = Tone::new(pwm_output, clk_sys_freq());
/// tone.start(440);
/// block_for(&mut delay, Duration::from_millis(500));
/// tone.stop();
/// ```
pub struct Tone<O> {
    output: O,
    source_clock_hz: u32,
    frequency_hz: Option<u32>,
}

impl<O: ToneOutput> Tone<O> {
    /// Wrap a PWM output whose counter is clocked at `source_clock_hz`.
    ///
    /// The output is left as it is; call [`stop`](Self::stop) to force silence.
    pub const fn new(output: O, source_clock_hz: u32) -> Self {
        Self {
            output,
            source_clock_hz,
            frequency_hz: None,
        }
    }

    /// Start a 50% square wave at `frequency_hz`.
    ///
    /// # Panics
    ///
    /// Panics if `frequency_hz` is zero.
    pub fn start(&mut self, frequency_hz: u32) {
        let settings = PwmSettings::for_frequency(self.source_clock_hz, frequency_hz);
        debug!(
            "Tone: {}Hz div={} wrap={} level={}",
            frequency_hz,
            settings.divider,
            settings.wrap,
            settings.level
        );
        self.output.start(settings);
        self.frequency_hz = Some(frequency_hz);
    }

    /// Silence the buzzer.
    pub fn stop(&mut self) {
        self.output.stop();
        self.frequency_hz = None;
    }

    /// The frequency currently playing, if any.
    #[must_use]
    pub const fn frequency_hz(&self) -> Option<u32> {
        self.frequency_hz
    }

    /// Release the PWM output.
    pub fn into_output(self) -> O {
        self.output
    }
}
