//! Keypad-driven 5×5 LED panel and piezo tone firmware for the Pico 1 and Pico 2.
//!
//! A 4×4 matrix keypad selects one action at a time: a solid fill, a canned
//! animation, or a melody whose notes ripple across the panel while the buzzer
//! plays them. Every action owns the single control thread until it finishes.
//!
//! The engines are written against small hardware seams ([`embedded_hal`] pins and
//! delays, [`led_transport::LedWire`], [`tone::ToneOutput`]) so they run the same way
//! on the board and in host tests. The `board` module (firmware builds only) binds
//! those seams to `embassy-rp`.
//!
//! # Glossary
//!
//! - **Panel**: the 5×5 addressable-LED (WS2812) grid.
//! - **Serpentine addressing**: boustrophedon mapping from `(row, column)` to the
//!   order of LEDs on the chain. See [`led_panel::serpentine_index`].
//! - **Flush**: serializing the pixel buffer to the LED chain as G, R, B bytes.
//! - **Tick**: the 50 ms step of the music visualizer cascade.
//! - **Debounce**: waiting for a pressed key to read released before reporting it.
//! - **PIO ([Programmable I/O](https://medium.com/data-science/nine-pico-pio-wats-with-rust-part-1-9d062067dc25)):**
//!   Pico 1 has 2 blocks. The LED chain runs on one state machine of one block.
//! - **PWM Slices:** Both Pico 1 and 2 have 8 slices (& 16 channels). The buzzer uses
//!   one channel of one slice.
#![cfg_attr(not(feature = "host"), no_std)]

// Compile-time checks: exactly one board must be selected (unless testing with host feature)
#[cfg(all(not(any(feature = "pico1", feature = "pico2")), not(feature = "host")))]
compile_error!("Must enable exactly one board feature: 'pico1' or 'pico2'");

#[cfg(all(feature = "pico1", feature = "pico2"))]
compile_error!("Cannot enable both 'pico1' and 'pico2' features simultaneously");

#[macro_use]
mod fmt;

pub mod animation;
#[cfg(not(feature = "host"))]
pub mod board;
pub mod config;
pub mod dispatch;
mod error;
pub mod keypad;
pub mod led_panel;
pub mod led_transport;
pub mod music;
pub mod timing;
#[cfg(feature = "host")]
pub mod to_png;
pub mod tone;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
