#![cfg(feature = "host")]
#![allow(missing_docs)]
//! Host-level tests for key dispatch and the control loop.

mod support;

use embassy_time::Duration;
use keypad_panel::dispatch::{Action, Controller, Dispatched, KEYMAP_DEFAULT, Keymap};
use keypad_panel::keypad::{KEY_LAYOUT_DEFAULT, Key, KeyMatrix};
use keypad_panel::led_panel::{LedPanel, RGB8};
use keypad_panel::led_transport::FRAME_BYTES;
use keypad_panel::tone::Tone;
use support::{ColumnPin, Event, Matrix, RecordingDelay, RecordingTone, RecordingWire, Timeline};

type TestController<'k> =
    Controller<'k, support::RowPin, ColumnPin, RecordingWire, RecordingTone, RecordingDelay>;

fn controller<'k>(
    matrix: &Matrix,
    timeline: &Timeline,
    keymap: &'k Keymap,
) -> TestController<'k> {
    let keypad: KeyMatrix<_, _> = matrix.key_matrix();
    let panel: LedPanel<_> = support::panel(timeline);
    let tone: Tone<_> = support::tone(timeline);
    Controller::new(keypad, panel, tone, support::delay(timeline), keymap)
}

/// Where `key` sits on the default layout.
fn position(key: Key) -> (usize, usize) {
    KEY_LAYOUT_DEFAULT
        .iter()
        .enumerate()
        .find_map(|(row, keys)| {
            keys.iter()
                .position(|candidate| *candidate == key)
                .map(|column| (row, column))
        })
        .expect("every key is on the layout")
}

fn solid(color: RGB8) -> Vec<u8> {
    [color.g, color.r, color.b].repeat(FRAME_BYTES / 3)
}

#[test]
fn c_fills_red_with_one_flush() {
    let matrix = Matrix::default();
    let timeline = Timeline::default();
    let mut controller = controller(&matrix, &timeline, &KEYMAP_DEFAULT);

    let (row, column) = position(Key::C);
    matrix.press(row, column, 2);
    assert_eq!(controller.poll().ok(), Some(Some(Dispatched::Completed)));

    assert_eq!(timeline.events(), vec![Event::Flush(solid(RGB8::new(255, 0, 0)))]);
}

#[test]
fn fills_use_the_documented_colors() {
    let cases = [
        (Key::A, RGB8::new(0, 0, 0)),
        (Key::B, RGB8::new(0, 0, 255)),
        (Key::C, RGB8::new(255, 0, 0)),
        (Key::D, RGB8::new(0, 127, 0)),
        (Key::Hash, RGB8::new(51, 51, 51)),
    ];
    for (key, color) in cases {
        let matrix = Matrix::default();
        let timeline = Timeline::default();
        let mut controller = controller(&matrix, &timeline, &KEYMAP_DEFAULT);
        assert_eq!(controller.dispatch(key), Dispatched::Completed, "{key}");
        assert_eq!(timeline.flushes(), vec![solid(color)], "{key}");
        assert_eq!(timeline.slept_ms(), 0, "{key}");
    }
}

#[test]
fn unmapped_key_does_nothing() {
    let matrix = Matrix::default();
    let timeline = Timeline::default();
    let mut controller = controller(&matrix, &timeline, &KEYMAP_DEFAULT);
    assert_eq!(controller.dispatch(Key::Digit9), Dispatched::Unmapped);
    assert!(timeline.events().is_empty());
}

#[test]
fn star_requests_a_reboot() {
    let matrix = Matrix::default();
    let timeline = Timeline::default();
    let mut controller = controller(&matrix, &timeline, &KEYMAP_DEFAULT);
    assert_eq!(controller.dispatch(Key::Star), Dispatched::RebootRequested);
    assert!(timeline.flushes().is_empty());
}

#[test]
fn digits_play_animations_and_zero_plays_the_melody() {
    for (digit, name) in [
        (Key::Digit1, "heartbeat"),
        (Key::Digit2, "arrow"),
        (Key::Digit8, "countdown"),
    ] {
        match KEYMAP_DEFAULT.action_for(digit) {
            Some(Action::Animate(animation)) => assert_eq!(animation.name, name),
            other => panic!("{digit} bound to {other:?}"),
        }
    }
    assert!(matches!(
        KEYMAP_DEFAULT.action_for(Key::Digit0),
        Some(Action::PlayMelody(_))
    ));
    assert!(KEYMAP_DEFAULT.action_for(Key::Digit9).is_none());
    assert_eq!(KEYMAP_DEFAULT.bindings().len(), 15);
}

#[test]
fn animation_runs_to_completion_before_returning() {
    let matrix = Matrix::default();
    let timeline = Timeline::default();
    let mut controller = controller(&matrix, &timeline, &KEYMAP_DEFAULT);
    assert_eq!(controller.dispatch(Key::Digit2), Dispatched::Completed);
    assert_eq!(timeline.flushes().len(), 9);
    assert_eq!(timeline.slept_ms(), 750);
}

#[test]
fn idle_poll_dispatches_nothing() {
    let matrix = Matrix::default();
    let timeline = Timeline::default();
    let mut controller = controller(&matrix, &timeline, &KEYMAP_DEFAULT);
    assert_eq!(controller.poll().ok(), Some(None));
    assert!(timeline.events().is_empty());
}

#[test]
fn custom_keymap_replaces_the_default() {
    static ONLY_NINE: Keymap = Keymap::new(&[(Key::Digit9, Action::Clear)]);
    let matrix = Matrix::default();
    let timeline = Timeline::default();
    let mut controller = controller(&matrix, &timeline, &ONLY_NINE);
    assert_eq!(controller.dispatch(Key::Digit9), Dispatched::Completed);
    assert_eq!(controller.dispatch(Key::C), Dispatched::Unmapped);
}

#[test]
fn run_until_reboot_returns_on_star_and_silences_the_buzzer() {
    let matrix = Matrix::default();
    let timeline = Timeline::default();
    let mut controller = controller(&matrix, &timeline, &KEYMAP_DEFAULT)
        .with_scan_interval(Duration::from_millis(20));

    let (row, column) = position(Key::Star);
    matrix.press(row, column, 1);
    assert!(controller.run_until_reboot().is_ok());
    assert_eq!(timeline.events(), vec![Event::ToneStop]);

    let (_, _, tone, _) = controller.into_parts();
    assert_eq!(tone.frequency_hz(), None);
}

#[test]
fn run_until_reboot_sleeps_the_scan_interval_after_each_idle_scan() {
    let matrix = Matrix::default();
    let timeline = Timeline::default();
    let mut controller = controller(&matrix, &timeline, &KEYMAP_DEFAULT)
        .with_scan_interval(Duration::from_millis(20));

    let (row, column) = position(Key::Star);
    matrix.press_after(2, row, column, 1);
    assert!(controller.run_until_reboot().is_ok());

    assert_eq!(matrix.scans(), 3);
    assert_eq!(
        timeline.events(),
        vec![
            Event::SleepNs(20_000_000),
            Event::SleepNs(20_000_000),
            Event::ToneStop,
        ]
    );
}

#[test]
fn run_until_reboot_dispatches_keys_between_idle_scans() {
    let matrix = Matrix::default();
    let timeline = Timeline::default();
    let mut controller = controller(&matrix, &timeline, &KEYMAP_DEFAULT);

    let (row, column) = position(Key::C);
    matrix.press_after(1, row, column, 1);
    assert_eq!(controller.poll().ok(), Some(None));
    assert_eq!(controller.poll().ok(), Some(Some(Dispatched::Completed)));

    let (row, column) = position(Key::Star);
    matrix.press_after(1, row, column, 1);
    timeline.clear();
    assert!(controller.run_until_reboot().is_ok());
    assert_eq!(
        timeline.events(),
        vec![Event::SleepNs(100_000_000), Event::ToneStop]
    );
}
