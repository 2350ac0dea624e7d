#![cfg(feature = "host")]
#![allow(missing_docs)]
//! Host-level tests for board pin assignments.

use embassy_time::Duration;
use keypad_panel::config::{BoardConfig, PwmChannel, SCAN_INTERVAL_DEFAULT};

#[test]
fn low_bank_buzzer_is_slice_2_channel_b() {
    let config = BoardConfig::LOW_BANK;
    assert_eq!(config.buzzer_pin, 21);
    assert_eq!(config.buzzer_slice(), 2);
    assert_eq!(config.buzzer_channel(), PwmChannel::B);
    assert_eq!(config.led_pin, 9);
}

#[test]
fn high_bank_buzzer_is_slice_5_channel_a() {
    let config = BoardConfig::HIGH_BANK;
    assert_eq!(config.buzzer_pin, 10);
    assert_eq!(config.buzzer_slice(), 5);
    assert_eq!(config.buzzer_channel(), PwmChannel::A);
    assert_eq!(config.led_pin, 7);
}

#[test]
fn slices_wrap_every_16_pins() {
    let config = BoardConfig::new("wrap", [0, 1, 2, 3], [4, 5, 6, 7], 8, 28);
    assert_eq!(config.buzzer_slice(), 6);
    let config = BoardConfig::new("wrap", [0, 1, 2, 3], [4, 5, 6, 7], 8, 17);
    assert_eq!(config.buzzer_slice(), 0);
    assert_eq!(config.buzzer_channel(), PwmChannel::B);
}

#[test]
fn every_pin_is_distinct() {
    for config in [BoardConfig::LOW_BANK, BoardConfig::HIGH_BANK] {
        let mut pins = config.pins().to_vec();
        pins.sort_unstable();
        pins.dedup();
        assert_eq!(pins.len(), 10, "{}", config.name);
    }
}

#[test]
#[should_panic(expected = "each pin may be assigned only once")]
fn reused_pin_is_rejected() {
    let _ = BoardConfig::new("bad", [1, 2, 3, 4], [5, 6, 7, 8], 9, 1);
}

#[test]
#[should_panic(expected = "pin must be a user GPIO (0..=29)")]
fn pin_past_the_bank_is_rejected() {
    let _ = BoardConfig::new("bad", [1, 2, 3, 4], [5, 6, 7, 8], 9, 30);
}

#[test]
fn scan_interval_defaults_to_100_ms() {
    assert_eq!(BoardConfig::default(), BoardConfig::LOW_BANK);
    assert_eq!(BoardConfig::LOW_BANK.scan_interval, SCAN_INTERVAL_DEFAULT);
    assert_eq!(SCAN_INTERVAL_DEFAULT, Duration::from_millis(100));
    let slow = BoardConfig::HIGH_BANK.with_scan_interval(Duration::from_millis(150));
    assert_eq!(slow.scan_interval, Duration::from_millis(150));
    assert_eq!(slow.pins(), BoardConfig::HIGH_BANK.pins());
}
