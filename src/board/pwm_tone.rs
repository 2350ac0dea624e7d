//! The buzzer on one channel of a PWM slice.

use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config, Pwm};

use crate::config::PwmChannel;
use crate::tone::{PwmSettings, Tone, ToneOutput};

/// A [`ToneOutput`] driving channel A or B of an `embassy-rp` PWM slice.
///
/// # Example
///
/// ```rust,ignore
/// let pwm = Pwm::new_output_b(p.PWM_SLICE2, p.PIN_21, Config::default());
/// let mut tone = PwmTone::new_output_b(pwm).into_tone();
/// tone.start(440);
/// ```
pub struct PwmTone<'d> {
    pwm: Pwm<'d>,
    cfg: Config, // Kept so the divider survives every reconfiguration.
    channel: PwmChannel,
}

impl<'d> PwmTone<'d> {
    /// Use the A output of `pwm`.
    pub fn new_output_a(pwm: Pwm<'d>) -> Self {
        Self::init(pwm, PwmChannel::A)
    }

    /// Use the B output of `pwm`.
    pub fn new_output_b(pwm: Pwm<'d>) -> Self {
        Self::init(pwm, PwmChannel::B)
    }

    fn init(mut pwm: Pwm<'d>, channel: PwmChannel) -> Self {
        let mut cfg = Config::default();
        cfg.phase_correct = false;
        cfg.enable = false;
        pwm.set_config(&cfg);
        debug!("PwmTone: channel {:?} silent", channel);
        Self { pwm, cfg, channel }
    }

    /// Wrap in a [`Tone`] clocked from `clk_sys`, the PWM source clock.
    pub fn into_tone(self) -> Tone<Self> {
        Tone::new(self, clk_sys_freq())
    }

    fn set_level(&mut self, level: u16) {
        match self.channel {
            PwmChannel::A => self.cfg.compare_a = level,
            PwmChannel::B => self.cfg.compare_b = level,
        }
    }
}

impl ToneOutput for PwmTone<'_> {
    fn start(&mut self, settings: PwmSettings) {
        self.cfg.divider = settings.divider.into();
        self.cfg.top = settings.wrap;
        self.set_level(settings.level);
        self.cfg.enable = true;
        self.pwm.set_config(&self.cfg);
    }

    fn stop(&mut self) {
        self.set_level(0);
        self.cfg.enable = false;
        self.pwm.set_config(&self.cfg);
    }
}
