//! Click-counting button gestures.
//!
//! [`ClickButton`] is polled once per control-loop iteration with the raw pressed level.
//! It debounces, counts clicks that follow each other quickly, and reports a long click
//! when the button is held. Each gesture is reported on exactly one poll.

use embassy_time::{Duration, Instant};

use crate::constants::{BUTTON_DEBOUNCE_DELAY, LONG_PRESS_DURATION, MULTI_CLICK_WINDOW};

/// What one button did since the previous poll.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    #[default]
    None,
    /// Short click(s); the count is at least 1.
    Clicks(u8),
    /// Held for the long-press duration.
    LongClick,
}

impl Gesture {
    /// Converts a signed click count: positive is that many short clicks, negative a long
    /// click, zero nothing.
    #[must_use]
    pub const fn from_count(count: i8) -> Self {
        match count {
            0 => Self::None,
            count if count > 0 => Self::Clicks(count.unsigned_abs()),
            _ => Self::LongClick,
        }
    }

    #[must_use]
    pub const fn is_short(self) -> bool {
        matches!(self, Self::Clicks(_))
    }

    #[must_use]
    pub const fn is_long(self) -> bool {
        matches!(self, Self::LongClick)
    }
}

/// The three gestures sampled at the top of a control-loop iteration.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons {
    pub set: Gesture,
    pub up: Gesture,
    pub down: Gesture,
}

impl Buttons {
    /// No button did anything.
    pub const IDLE: Self = Self {
        set: Gesture::None,
        up: Gesture::None,
        down: Gesture::None,
    };
}

/// Polled gesture recognizer for one button.
#[derive(Clone, Copy, Debug)]
pub struct ClickButton {
    debounce: Duration,
    multi_click: Duration,
    long_click: Duration,
    last_level: bool,
    depressed: bool,
    last_bounce: Instant,
    click_count: u8,
}

impl Default for ClickButton {
    fn default() -> Self {
        Self::new()
    }
}

impl ClickButton {
    /// A released button with the standard timings.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_timings(BUTTON_DEBOUNCE_DELAY, MULTI_CLICK_WINDOW, LONG_PRESS_DURATION)
    }

    #[must_use]
    pub const fn with_timings(debounce: Duration, multi_click: Duration, long_click: Duration) -> Self {
        Self {
            debounce,
            multi_click,
            long_click,
            last_level: false,
            depressed: false,
            last_bounce: Instant::from_ticks(0),
            click_count: 0,
        }
    }

    /// Feeds one sample of the pressed level taken at `now`.
    ///
    /// A press counts once the level has been stable for longer than the debounce time.
    /// Clicks are reported after the button has stayed released for the multi-click window;
    /// a press held past the long-click time is reported as [`Gesture::LongClick`] while
    /// still held.
    pub fn update(&mut self, now: Instant, pressed: bool) -> Gesture {
        if pressed != self.last_level {
            self.last_bounce = now;
        }
        self.last_level = pressed;
        let stable_for = now.saturating_duration_since(self.last_bounce);

        if stable_for > self.debounce && pressed != self.depressed {
            self.depressed = pressed;
            if pressed {
                self.click_count = self.click_count.saturating_add(1);
            }
        }

        let gesture = if !self.depressed && stable_for > self.multi_click {
            Gesture::Clicks(core::mem::take(&mut self.click_count))
        } else if self.depressed && stable_for > self.long_click {
            if core::mem::take(&mut self.click_count) > 0 {
                Gesture::LongClick
            } else {
                Gesture::None
            }
        } else {
            Gesture::None
        };

        match gesture {
            Gesture::Clicks(0) => Gesture::None,
            gesture => {
                if gesture != Gesture::None {
                    debug!("Button gesture: {}", gesture);
                }
                gesture
            }
        }
    }
}

#[cfg(any(feature = "pico1", feature = "pico2"))]
pub use hardware::Button;

#[cfg(any(feature = "pico1", feature = "pico2"))]
mod hardware {
    use embassy_rp::gpio::Input;
    use embassy_time::Instant;

    use super::{ClickButton, Gesture};

    /// A push button wired between a pulled-up pin and ground.
    pub struct Button {
        input: Input<'static>,
        clicks: ClickButton,
    }

    impl Button {
        #[must_use]
        pub fn new(input: Input<'static>) -> Self {
            Self {
                input,
                clicks: ClickButton::new(),
            }
        }

        /// Samples the pin and returns the gesture completed by this sample, if any.
        pub fn poll(&mut self, now: Instant) -> Gesture {
            // Active low.
            let pressed = self.input.is_low();
            self.clicks.update(now, pressed)
        }
    }
}
