//! The clock's WS2812 strip, driven by CPU-fed PIO from its own task.
//!
//! [`TixStrip`] is the control loop's [`PixelOutput`]. A commit only stores the frame in a
//! [`Signal`]; the strip task picks up the latest frame, scales it by the brightness and
//! clocks it out. Frames committed faster than the strip can take them are dropped, all but
//! the newest.

use core::marker::PhantomData;

use embassy_executor::Spawner;
use embassy_rp::Peri;
use embassy_rp::bind_interrupts;
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::program::{Assembler, JmpCondition, OutDestination, SetDestination, SideSet};
use embassy_rp::pio::{
    Common, Config, FifoJoin, Instance, LoadedProgram, Pio, PioPin, ShiftConfig, ShiftDirection,
    StateMachine,
};
use embassy_rp::pio_programs::ws2812::{Grb, RgbColorOrder};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};
use fixed::types::U24F8;

use crate::Result;
use crate::constants::LED_COUNT;
use crate::frame::{Frame, PixelOutput, Rgb};

/// Latest frame and the brightness to show it at.
pub type StripNotifier = Signal<CriticalSectionRawMutex, (Frame, u8)>;

const T1: u8 = 2;
const T2: u8 = 5;
const T3: u8 = 3;
const CYCLES_PER_BIT: u32 = (T1 + T2 + T3) as u32;
const RESET_DELAY_US: u64 = 55;

bind_interrupts!(struct Pio0Irqs {
    PIO0_IRQ_0 => embassy_rp::pio::InterruptHandler<PIO0>;
});

/// Handle to the strip task.
pub struct TixStrip {
    notifier: &'static StripNotifier,
    brightness: u8,
}

impl TixStrip {
    #[must_use]
    pub const fn notifier() -> StripNotifier {
        Signal::new()
    }

    /// Claims PIO0, loads the WS2812 program on state machine 0 and spawns the strip task.
    ///
    /// # Errors
    ///
    /// Returns an error if the task cannot be spawned.
    pub fn new(
        notifier: &'static StripNotifier,
        pio: Peri<'static, PIO0>,
        pin: Peri<'static, impl PioPin>,
        spawner: Spawner,
    ) -> Result<Self> {
        let Pio {
            mut common, sm0, ..
        } = Pio::new(pio, Pio0Irqs);
        let program = load_ws2812_program(&mut common);
        let driver = Ws2812::new(&mut common, sm0, pin, &program);
        let token = strip_task(notifier, driver, common)?;
        spawner.spawn(token);
        Ok(Self {
            notifier,
            brightness: u8::MAX,
        })
    }
}

impl PixelOutput for TixStrip {
    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    fn commit(&mut self, frame: &Frame) {
        self.notifier.signal((*frame, self.brightness));
    }
}

#[embassy_executor::task]
async fn strip_task(
    notifier: &'static StripNotifier,
    mut driver: Ws2812<'static, PIO0, 0>,
    // Dropping the common resources would free the loaded program.
    _common: Common<'static, PIO0>,
) -> ! {
    loop {
        let (frame, brightness) = notifier.wait().await;
        let mut pixels = *frame.pixels();
        for color in &mut pixels {
            *color = Rgb::new(
                scale_brightness(color.r, brightness),
                scale_brightness(color.g, brightness),
                scale_brightness(color.b, brightness),
            );
        }
        driver.write(&pixels).await;
    }
}

fn load_ws2812_program<'d, PIO: Instance>(common: &mut Common<'d, PIO>) -> LoadedProgram<'d, PIO> {
    let side_set = SideSet::new(false, 1, false);
    let mut assembler: Assembler<32> = Assembler::new_with_side_set(side_set);

    let mut wrap_target = assembler.label();
    let mut wrap_source = assembler.label();
    let mut do_zero = assembler.label();
    assembler.set_with_side_set(SetDestination::PINDIRS, 1, 0);
    assembler.bind(&mut wrap_target);
    assembler.out_with_delay_and_side_set(OutDestination::X, 1, T3 - 1, 0);
    assembler.jmp_with_delay_and_side_set(JmpCondition::XIsZero, &mut do_zero, T1 - 1, 1);
    assembler.jmp_with_delay_and_side_set(JmpCondition::Always, &mut wrap_target, T2 - 1, 1);
    assembler.bind(&mut do_zero);
    assembler.nop_with_delay_and_side_set(T2 - 1, 0);
    assembler.bind(&mut wrap_source);

    let program = assembler.assemble_with_wrap(wrap_source, wrap_target);
    common.load_program(&program)
}

/// CPU-fed WS2812 driver for one state machine; `ORDER` is the strip's byte order.
struct Ws2812<'d, P: Instance, const S: usize, ORDER: RgbColorOrder = Grb> {
    sm: StateMachine<'d, P, S>,
    _order: PhantomData<ORDER>,
}

impl<'d, P: Instance, const S: usize, ORDER: RgbColorOrder> Ws2812<'d, P, S, ORDER> {
    fn new(
        pio: &mut Common<'d, P>,
        mut sm: StateMachine<'d, P, S>,
        pin: Peri<'d, impl PioPin>,
        program: &LoadedProgram<'d, P>,
    ) -> Self {
        let mut cfg = Config::default();

        let out_pin = pio.make_pio_pin(pin);
        cfg.set_out_pins(&[&out_pin]);
        cfg.set_set_pins(&[&out_pin]);
        cfg.use_program(program, &[&out_pin]);

        // 800 kHz bit rate, CYCLES_PER_BIT PIO cycles per bit.
        let clock_freq = U24F8::from_num(clk_sys_freq() / 1000);
        let ws2812_freq = U24F8::from_num(800);
        let bit_freq = ws2812_freq * CYCLES_PER_BIT;
        cfg.clock_divider = clock_freq / bit_freq;

        cfg.fifo_join = FifoJoin::TxOnly;
        cfg.shift_out = ShiftConfig {
            auto_fill: true,
            threshold: 24,
            direction: ShiftDirection::Left,
        };

        sm.set_config(&cfg);
        sm.set_enable(true);
        Self {
            sm,
            _order: PhantomData,
        }
    }

    /// Pushes a full frame through the TX FIFO, then holds the line low to latch it.
    async fn write(&mut self, colors: &[Rgb; LED_COUNT]) {
        let tx = self.sm.tx();
        for color in colors {
            tx.wait_push(ORDER::pack(*color)).await;
        }
        Timer::after(Duration::from_micros(RESET_DELAY_US)).await;
    }
}

#[inline]
#[expect(
    clippy::arithmetic_side_effects,
    clippy::integer_division_remainder_used,
    clippy::cast_possible_truncation,
    reason = "The product of two bytes divided by 255 fits in a byte"
)]
fn scale_brightness(value: u8, brightness: u8) -> u8 {
    ((u16::from(value) * u16::from(brightness)) / 255) as u8
}
