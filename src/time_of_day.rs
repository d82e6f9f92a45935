//! Wall-clock time of day as kept between real-time-clock resyncs.
//!
//! See [`TimeOfDay`] for the field invariants and the edit operations used by the menu.

/// Hours, minutes and seconds of a 24-hour day. Every field is always in range; the
/// constructor rejects anything else and every mutation wraps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
    second: u8,
}

/// The wall time at which the firmware was built, used to reseed a real-time clock that
/// lost its backup power.
pub const BUILD_TIME: TimeOfDay = match TimeOfDay::new(
    parse_u8(env!("TIX_BUILD_HOUR")),
    parse_u8(env!("TIX_BUILD_MINUTE")),
    parse_u8(env!("TIX_BUILD_SECOND")),
) {
    Some(time) => time,
    None => panic!("build time out of range"),
};

impl TimeOfDay {
    /// Midnight.
    pub const MIDNIGHT: Self = Self {
        hour: 0,
        minute: 0,
        second: 0,
    };

    /// Returns `None` unless `hour < 24`, `minute < 60` and `second < 60`.
    #[must_use]
    pub const fn new(hour: u8, minute: u8, second: u8) -> Option<Self> {
        if hour < 24 && minute < 60 && second < 60 {
            Some(Self {
                hour,
                minute,
                second,
            })
        } else {
            None
        }
    }

    #[must_use]
    pub const fn hour(self) -> u8 {
        self.hour
    }

    #[must_use]
    pub const fn minute(self) -> u8 {
        self.minute
    }

    #[must_use]
    pub const fn second(self) -> u8 {
        self.second
    }

    /// Moves forward one second, carrying into minutes and hours and wrapping at midnight.
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "Each field is below its limit before the increment"
    )]
    pub const fn advance_one_second(&mut self) {
        self.second += 1;
        if self.second > 59 {
            self.second = 0;
            self.minute += 1;
        }
        if self.minute > 59 {
            self.minute = 0;
            self.hour += 1;
        }
        if self.hour > 23 {
            self.hour = 0;
        }
    }

    /// The hour as shown on the face.
    ///
    /// In 12-hour mode hours 13..=23 show as 1..=11. In either mode midnight shows as 12
    /// so the hour digits are never both dark.
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "Subtraction only happens for hours above 12"
    )]
    #[must_use]
    pub const fn display_hour(self, military_time: bool) -> u8 {
        match self.hour {
            0 => 12,
            hour if hour > 12 && !military_time => hour - 12,
            hour => hour,
        }
    }

    /// Up on the hour screen.
    pub const fn increment_hour(&mut self) {
        self.hour = wrap_add(self.hour, 1, 24);
        self.second = 0;
    }

    /// Down on the hour screen.
    pub const fn decrement_hour(&mut self) {
        self.hour = wrap_add(self.hour, 23, 24);
        self.second = 0;
    }

    /// Up on the tens-of-minutes screen: +10 minutes, wrapping within the hour.
    pub const fn increment_minute_tens(&mut self) {
        self.minute = wrap_add(self.minute, 10, 60);
        self.second = 0;
    }

    /// Down on the tens-of-minutes screen: -10 minutes, wrapping within the hour.
    pub const fn decrement_minute_tens(&mut self) {
        self.minute = wrap_add(self.minute, 50, 60);
        self.second = 0;
    }

    /// Up on the ones-of-minutes screen. Wraps 9 back to 0 without touching the tens digit.
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "The decade plus a digit below 10 stays below 60"
    )]
    pub const fn increment_minute_ones(&mut self) {
        self.minute = tens(self.minute) * 10 + wrap_add(ones(self.minute), 1, 10);
        self.second = 0;
    }

    /// Down on the ones-of-minutes screen. Wraps 0 to 9 without touching the tens digit.
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "The decade plus a digit below 10 stays below 60"
    )]
    pub const fn decrement_minute_ones(&mut self) {
        self.minute = tens(self.minute) * 10 + wrap_add(ones(self.minute), 9, 10);
        self.second = 0;
    }

    /// The same time with the seconds dropped, as written back to the real-time clock.
    #[must_use]
    pub const fn with_zero_second(self) -> Self {
        Self { second: 0, ..self }
    }
}

/// Tens digit of a value below 100.
#[inline]
#[expect(
    clippy::integer_division_remainder_used,
    reason = "Division by a non-zero constant"
)]
#[must_use]
pub const fn tens(value: u8) -> u8 {
    value / 10
}

/// Ones digit of a value.
#[inline]
#[expect(
    clippy::integer_division_remainder_used,
    reason = "Division by a non-zero constant"
)]
#[must_use]
pub const fn ones(value: u8) -> u8 {
    value % 10
}

#[inline]
#[expect(
    clippy::arithmetic_side_effects,
    clippy::integer_division_remainder_used,
    reason = "Operands are below 60 and the modulus is non-zero"
)]
const fn wrap_add(value: u8, delta: u8, modulus: u8) -> u8 {
    (value + delta) % modulus
}

/// Parses a decimal build-script value at compile time.
#[expect(
    clippy::arithmetic_side_effects,
    clippy::indexing_slicing,
    reason = "Evaluated only in const context on build-script output"
)]
const fn parse_u8(text: &str) -> u8 {
    let bytes = text.as_bytes();
    assert!(!bytes.is_empty(), "empty number");
    let mut value: u8 = 0;
    let mut index = 0;
    while index < bytes.len() {
        let byte = bytes[index];
        assert!(byte.is_ascii_digit(), "not a decimal number");
        value = value * 10 + (byte - b'0');
        index += 1;
    }
    value
}
