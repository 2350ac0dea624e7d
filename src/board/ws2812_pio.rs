//! The LED wire on a PIO state machine.
//!
//! The state machine runs the standard WS2812 bit program at 800 kHz: each bit
//! is 10 PIO cycles, high for 2 then high (1) or low (0) for 5, then low for 3.
//! Bytes are pushed left-aligned into the TX FIFO and autopulled 8 bits at a time.

use embassy_rp::Peri;
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::gpio::Pin as _;
use embassy_rp::peripherals::{PIO0, PIO1};
use embassy_rp::pio::{
    Common, Config, Direction, FifoJoin, Instance, Pio, PioPin, ShiftConfig, ShiftDirection,
    StateMachine,
};
use embassy_time::Duration;
use fixed::types::U24F8;

use super::check_pin;
use super::pio_irqs::{Pio0Irqs, Pio1Irqs};
use crate::Result;
use crate::config::BoardConfig;
use crate::led_transport::{ExecutionUnit, LedWire, claim_execution_unit};

const T1: u8 = 2;
const T2: u8 = 5;
const T3: u8 = 3;
const CYCLES_PER_BIT: u32 = (T1 + T2 + T3) as u32;
const BIT_RATE_KHZ: u32 = 800;

// Datasheet minimum is 50 µs low.
const LATCH: Duration = Duration::from_micros(60);

/// One PIO state machine clocking bytes out to the LED chain.
pub struct PioLedWire<'d, PIO: Instance, const SM: usize> {
    sm: StateMachine<'d, PIO, SM>,
}

impl<'d, PIO: Instance, const SM: usize> PioLedWire<'d, PIO, SM> {
    /// Load the WS2812 program into `common`, bind `pin`, and start `sm`.
    pub fn new(
        common: &mut Common<'d, PIO>,
        mut sm: StateMachine<'d, PIO, SM>,
        pin: Peri<'d, impl PioPin>,
    ) -> Self {
        let program = pio::pio_asm!(
            ".side_set 1",
            ".define public T1 2",
            ".define public T2 5",
            ".define public T3 3",
            ".wrap_target",
            "bitloop:",
            "    out x, 1        side 0 [T3 - 1]",
            "    jmp !x do_zero  side 1 [T1 - 1]",
            "do_one:",
            "    jmp bitloop     side 1 [T2 - 1]",
            "do_zero:",
            "    nop             side 0 [T2 - 1]",
            ".wrap"
        );
        let loaded = common.load_program(&program.program);
        let out_pin = common.make_pio_pin(pin);

        let mut cfg = Config::default();
        cfg.use_program(&loaded, &[&out_pin]);
        let clock_khz = U24F8::from_num(clk_sys_freq() / 1000);
        let bit_khz = U24F8::from_num(BIT_RATE_KHZ * CYCLES_PER_BIT);
        cfg.clock_divider = clock_khz.saturating_div(bit_khz);
        cfg.fifo_join = FifoJoin::TxOnly;
        cfg.shift_out = ShiftConfig {
            auto_fill: true,
            threshold: 8,
            direction: ShiftDirection::Left,
        };

        sm.set_config(&cfg);
        sm.set_pin_dirs(Direction::Out, &[&out_pin]);
        sm.set_enable(true);
        debug!(
            "PioLedWire: sm{} divider {}",
            SM,
            cfg.clock_divider.to_bits()
        );
        Self { sm }
    }
}

impl<PIO: Instance, const SM: usize> LedWire for PioLedWire<'_, PIO, SM> {
    fn write_byte(&mut self, byte: u8) {
        let word = u32::from(byte) << 24;
        while !self.sm.tx().try_push(word) {
            core::hint::spin_loop();
        }
    }

    fn latch(&mut self) {
        while !self.sm.tx().empty() {
            core::hint::spin_loop();
        }
        // The FIFO drains one word before its last bit leaves the pin.
        embassy_time::block_for(LATCH);
    }
}

/// The LED wire on whichever PIO block was free at startup.
pub enum LedWireUnit<'d> {
    /// Running on PIO0.
    Primary(PioLedWire<'d, PIO0, 0>),
    /// Running on PIO1.
    Secondary(PioLedWire<'d, PIO1, 0>),
}

impl<'d> LedWireUnit<'d> {
    /// Start the LED wire on PIO0 if it is handed over, else on PIO1.
    ///
    /// Pass `None` for a block another part of the firmware already owns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoFreeExecutionUnit`](crate::Error::NoFreeExecutionUnit)
    /// if both blocks are `None`, or
    /// [`Error::PinMismatch`](crate::Error::PinMismatch) if `pin` is not the
    /// configured LED pin.
    pub fn claim<P: PioPin>(
        pio0: Option<Peri<'d, PIO0>>,
        pio1: Option<Peri<'d, PIO1>>,
        pin: Peri<'d, P>,
        config: &BoardConfig,
    ) -> Result<Self> {
        check_pin("LED data", config.led_pin, pin.pin())?;
        let unit = claim_execution_unit(pio0.is_some(), pio1.is_some())?;
        Ok(match (unit, pio0, pio1) {
            (ExecutionUnit::Primary, Some(pio0), _) => {
                let Pio {
                    mut common, sm0, ..
                } = Pio::new(pio0, Pio0Irqs);
                Self::Primary(PioLedWire::new(&mut common, sm0, pin))
            }
            (_, _, Some(pio1)) => {
                let Pio {
                    mut common, sm0, ..
                } = Pio::new(pio1, Pio1Irqs);
                Self::Secondary(PioLedWire::new(&mut common, sm0, pin))
            }
            (_, _, None) => return Err(crate::Error::NoFreeExecutionUnit),
        })
    }

    /// Which block the wire runs on.
    #[must_use]
    pub const fn execution_unit(&self) -> ExecutionUnit {
        match self {
            Self::Primary(_) => ExecutionUnit::Primary,
            Self::Secondary(_) => ExecutionUnit::Secondary,
        }
    }
}

impl LedWire for LedWireUnit<'_> {
    fn write_byte(&mut self, byte: u8) {
        match self {
            Self::Primary(wire) => wire.write_byte(byte),
            Self::Secondary(wire) => wire.write_byte(byte),
        }
    }

    fn latch(&mut self) {
        match self {
            Self::Primary(wire) => wire.latch(),
            Self::Secondary(wire) => wire.latch(),
        }
    }
}
