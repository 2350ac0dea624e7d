//! Interrupt bindings for the two PIO blocks the LED wire may run on.
#![allow(unsafe_code, reason = "bind_interrupts! expands to interrupt vector entries")]

use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{PIO0, PIO1};
use embassy_rp::pio::InterruptHandler;

bind_interrupts!(pub(crate) struct Pio0Irqs {
    PIO0_IRQ_0 => InterruptHandler<PIO0>;
});

bind_interrupts!(pub(crate) struct Pio1Irqs {
    PIO1_IRQ_0 => InterruptHandler<PIO1>;
});
