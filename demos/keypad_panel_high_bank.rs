#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::{convert::Infallible, panic};

use embassy_executor::Spawner;
use embassy_rp::pwm::{Config, Pwm};
use embassy_time::{Delay, Duration};
use keypad_panel::{
    Result,
    board::{self, LedWireUnit, PwmTone},
    config::BoardConfig,
    dispatch::{Controller, KEYMAP_DEFAULT},
    led_panel::LedPanel,
};
use {defmt::info, defmt_rtt as _, panic_probe as _};

#[cfg(feature = "pico2")]
#[allow(unsafe_code, reason = "the boot ROM finds the image definition by section")]
#[unsafe(link_section = ".start_block")]
#[used]
pub static IMAGE_DEF: embassy_rp::block::ImageDef = embassy_rp::block::ImageDef::secure_exe();

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(_spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());
    // This board's keypad is slow to settle; scan less often.
    let config = BoardConfig::HIGH_BANK.with_scan_interval(Duration::from_millis(150));
    info!("Starting {} board", config.name);

    let keypad = board::keypad(
        [
            p.PIN_16.into(),
            p.PIN_17.into(),
            p.PIN_18.into(),
            p.PIN_19.into(),
        ],
        [p.PIN_20.into(), p.PIN_4.into(), p.PIN_9.into(), p.PIN_8.into()],
        &config,
    )?;
    // PIO0 is left free for other firmware on this board; the wire falls back to PIO1.
    let wire = LedWireUnit::claim(None, Some(p.PIO1), p.PIN_7, &config)?;
    let mut panel = LedPanel::new(wire);
    panel.clear();
    panel.flush();

    // GPIO 10 → slice (10/2) % 8 = 5, even pin → channel A
    let pwm = Pwm::new_output_a(p.PWM_SLICE5, p.PIN_10, Config::default());
    let tone = PwmTone::new_output_a(pwm).into_tone();

    let mut controller = Controller::new(keypad, panel, tone, Delay, &KEYMAP_DEFAULT)
        .with_scan_interval(config.scan_interval);
    controller.run_until_reboot()?;
    board::reboot_to_bootloader()
}
