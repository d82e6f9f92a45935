//! Firmware library for a TIX-style LED clock.
//!
//! The clock face is 27 pixels split into four groups, one per digit; a digit's value is
//! the number of lit pixels in its group, and which pixels are lit is reshuffled on every
//! update. Three buttons drive a small menu for setting the time, the update interval,
//! the color scheme, the brightness and 12/24-hour mode.
//!
//! Everything above the hardware ([`controller`], [`menu`], [`digit_renderer`], …) is plain
//! `no_std` logic behind the [`time_source::TimeSource`], [`frame::PixelOutput`] and
//! [`settings_store::RecordStorage`] traits, and runs in host tests with the `host` feature.
#![no_std]

// Must come first so its macros are visible in every other module.
#[macro_use]
mod fmt;

pub mod button;
pub mod constants;
pub mod controller;
pub mod digit_group;
pub mod digit_renderer;
pub mod display;
pub mod ds3231;
mod error;
pub mod frame;
pub mod menu;
mod never;
pub mod settings;
pub mod settings_store;
pub mod time_of_day;
pub mod time_source;

#[cfg(any(feature = "pico1", feature = "pico2"))]
pub mod flash_store;
#[cfg(any(feature = "pico1", feature = "pico2"))]
pub mod hardware;
#[cfg(all(feature = "arm", any(feature = "pico1", feature = "pico2")))]
pub mod led_strip;

// Re-export commonly used items
pub use error::{Error, Result};
pub use never::Never;
