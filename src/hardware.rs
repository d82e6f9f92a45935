//! Board wiring for the clock.

use embassy_rp::Peri;
use embassy_rp::clocks::RoscRng;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, Blocking, I2c};
use embassy_rp::peripherals::{FLASH, I2C0, PIN_2, PIO0};
use rand_core::RngCore;

/// The peripherals the firmware uses, configured for this board.
///
/// | signal      | pin  |
/// |-------------|------|
/// | strip data  | GP2  |
/// | RTC SDA     | GP4  |
/// | RTC SCL     | GP5  |
/// | Set button  | GP13 |
/// | Up button   | GP14 |
/// | Down button | GP15 |
pub struct Hardware {
    pub strip_pio: Peri<'static, PIO0>,
    pub strip_pin: Peri<'static, PIN_2>,
    pub rtc_i2c: I2c<'static, I2C0, Blocking>,
    pub set_button: Input<'static>,
    pub up_button: Input<'static>,
    pub down_button: Input<'static>,
    pub flash: Peri<'static, FLASH>,
    /// Seed for the digit shuffles, from the ring oscillator.
    pub seed: u64,
}

impl Default for Hardware {
    fn default() -> Self {
        let peripherals: embassy_rp::Peripherals =
            embassy_rp::init(embassy_rp::config::Config::default());

        let rtc_i2c = I2c::new_blocking(
            peripherals.I2C0,
            peripherals.PIN_5,
            peripherals.PIN_4,
            i2c::Config::default(),
        );

        // Buttons pull the pin to ground.
        let set_button = Input::new(peripherals.PIN_13, Pull::Up);
        let up_button = Input::new(peripherals.PIN_14, Pull::Up);
        let down_button = Input::new(peripherals.PIN_15, Pull::Up);

        Self {
            strip_pio: peripherals.PIO0,
            strip_pin: peripherals.PIN_2,
            rtc_i2c,
            set_button,
            up_button,
            down_button,
            flash: peripherals.FLASH,
            seed: RoscRng.next_u64(),
        }
    }
}
