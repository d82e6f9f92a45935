//! TIX-style LED clock: 27 WS2812 pixels, a DS3231 real-time clock and three buttons.
//!
//! Runs on a Raspberry Pi Pico (RP2040). Hold Set to set the time, hold Up to pick how often
//! the face reshuffles, hold Down to pick a color scheme.
#![no_std]
#![no_main]
#![allow(clippy::future_not_send, reason = "Single-threaded")]

use defmt::{error, info};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_time::{Instant, Timer};
use panic_probe as _;
use tix_clock::button::{Button, Buttons};
use tix_clock::constants::{LOOP_PERIOD, SPLASH_BLANK_DURATION, SPLASH_DURATION};
use tix_clock::controller::ClockController;
use tix_clock::ds3231::Ds3231;
use tix_clock::flash_store::FlashStore;
use tix_clock::hardware::Hardware;
use tix_clock::led_strip::{StripNotifier, TixStrip};
use tix_clock::{Never, Result};

#[embassy_executor::main]
pub async fn main(spawner: Spawner) -> ! {
    // If it returns, something went wrong.
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

#[expect(clippy::items_after_statements, reason = "Keeps related code together")]
async fn inner_main(spawner: Spawner) -> Result<Never> {
    info!("tix-clock starting");
    let hardware = Hardware::default();

    static STRIP_NOTIFIER: StripNotifier = TixStrip::notifier();
    let strip = TixStrip::new(
        &STRIP_NOTIFIER,
        hardware.strip_pio,
        hardware.strip_pin,
        spawner,
    )?;

    let mut set_button = Button::new(hardware.set_button);
    let mut up_button = Button::new(hardware.up_button);
    let mut down_button = Button::new(hardware.down_button);

    let mut controller = ClockController::new(
        Ds3231::new(hardware.rtc_i2c),
        strip,
        FlashStore::new(hardware.flash),
        hardware.seed,
        Instant::now(),
    );

    // A failed start has already lit the strip red.
    if let Err(err) = controller.start(Instant::now()) {
        error!("Real-time clock unusable, halting: {}", err);
        return core::future::pending().await;
    }

    controller.show_splash();
    Timer::after(SPLASH_DURATION).await;
    controller.blank();
    Timer::after(SPLASH_BLANK_DURATION).await;

    loop {
        let now = Instant::now();
        let buttons = Buttons {
            set: set_button.poll(now),
            up: up_button.poll(now),
            down: down_button.poll(now),
        };
        controller.poll(now, buttons);
        Timer::after(LOOP_PERIOD).await;
    }
}
