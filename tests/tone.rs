#![cfg(feature = "host")]
#![allow(missing_docs)]
//! Host-level tests for tone PWM settings.

mod support;

use keypad_panel::tone::PwmSettings;
use support::{CLOCK_HZ, Event, Timeline};

#[test]
fn a4_at_125_mhz_matches_expected() {
    assert_eq!(
        PwmSettings::for_frequency(CLOCK_HZ, 440),
        PwmSettings {
            divider: 5,
            wrap: 56_817,
            level: 28_408,
        }
    );
}

#[test]
fn high_frequencies_need_no_divider() {
    let settings = PwmSettings::for_frequency(CLOCK_HZ, 10_000);
    assert_eq!(settings.divider, 1);
    assert_eq!(settings.wrap, 12_499);
    assert_eq!(settings.level, 6_249);
}

#[test]
fn every_audible_frequency_fits_the_counter() {
    for frequency_hz in (20..=20_000).step_by(7) {
        let settings = PwmSettings::for_frequency(CLOCK_HZ, frequency_hz);
        assert!(settings.divider >= 1);
        assert_eq!(settings.level, settings.wrap / 2);

        // Within 1% of the requested pitch.
        let period = u64::from(settings.divider) * (u64::from(settings.wrap) + 1);
        let actual_hz = u64::from(CLOCK_HZ) / period;
        let error = actual_hz.abs_diff(u64::from(frequency_hz));
        assert!(error * 100 <= u64::from(frequency_hz), "{frequency_hz}Hz -> {actual_hz}Hz");
    }
}

#[test]
#[should_panic(expected = "tone frequency must be positive")]
fn zero_frequency_panics() {
    let _ = PwmSettings::for_frequency(CLOCK_HZ, 0);
}

#[test]
fn start_programs_the_output_and_stop_silences_it() {
    let timeline = Timeline::default();
    let mut tone = support::tone(&timeline);
    assert_eq!(tone.frequency_hz(), None);

    tone.start(440);
    assert_eq!(tone.frequency_hz(), Some(440));
    tone.stop();
    assert_eq!(tone.frequency_hz(), None);

    assert_eq!(
        timeline.events(),
        vec![
            Event::ToneStart(PwmSettings::for_frequency(CLOCK_HZ, 440)),
            Event::ToneStop,
        ]
    );
}

#[test]
fn stop_while_silent_is_harmless() {
    let timeline = Timeline::default();
    let mut tone = support::tone(&timeline);
    tone.stop();
    tone.stop();
    assert_eq!(timeline.events(), vec![Event::ToneStop, Event::ToneStop]);
}
