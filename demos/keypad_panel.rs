#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::{convert::Infallible, panic};

use embassy_executor::Spawner;
use embassy_rp::pwm::{Config, Pwm};
use embassy_time::Delay;
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
    let config = BoardConfig::LOW_BANK;
    info!("Starting {} board", config.name);

    let keypad = board::keypad(
        [p.PIN_8.into(), p.PIN_7.into(), p.PIN_6.into(), p.PIN_5.into()],
        [p.PIN_4.into(), p.PIN_3.into(), p.PIN_2.into(), p.PIN_1.into()],
        &config,
    )?;
    let wire = LedWireUnit::claim(Some(p.PIO0), Some(p.PIO1), p.PIN_9, &config)?;
    let mut panel = LedPanel::new(wire);
    panel.clear();
    panel.flush();

    // GPIO 21 → slice (21/2) % 8 = 2, odd pin → channel B
    let pwm = Pwm::new_output_b(p.PWM_SLICE2, p.PIN_21, Config::default());
    let tone = PwmTone::new_output_b(pwm).into_tone();

    let mut controller = Controller::new(keypad, panel, tone, Delay, &KEYMAP_DEFAULT)
        .with_scan_interval(config.scan_interval);
    controller.run_until_reboot()?;
    board::reboot_to_bootloader()
}
