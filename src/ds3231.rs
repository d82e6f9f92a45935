//! DS3231 real-time clock over I²C.
//!
//! Only the time-of-day registers are used. Writes always select 24-hour mode and pin the
//! date to 2014-01-01, since the clock face has no date.

use embedded_hal::i2c::{Error as _, ErrorKind, I2c, NoAcknowledgeSource};

use crate::time_of_day::TimeOfDay;
use crate::time_source::TimeSource;
use crate::{Error, Result};

/// Fixed bus address of the DS3231.
pub const DS3231_ADDRESS: u8 = 0x68;

pub mod registers {
    pub const SECONDS: u8 = 0x00;
    pub const MINUTES: u8 = 0x01;
    pub const HOURS: u8 = 0x02;
    pub const STATUS: u8 = 0x0F;
}

/// Status register bit set when the oscillator stopped.
const OSCILLATOR_STOP_FLAG: u8 = 1 << 7;
const HOURS_12_HOUR_MODE: u8 = 1 << 6;
const HOURS_PM: u8 = 1 << 5;

// Weekday, day, month, year written alongside the time: Wednesday 2014-01-01.
const FIXED_DATE: [u8; 4] = [0x04, 0x01, 0x01, 0x14];

/// DS3231 driver owning its bus.
pub struct Ds3231<I> {
    i2c: I,
}

impl<I: I2c> Ds3231<I> {
    #[must_use]
    pub const fn new(i2c: I) -> Self {
        Self { i2c }
    }

    /// Gives the bus back.
    pub fn release(self) -> I {
        self.i2c
    }

    fn read_registers(&mut self, start: u8, buffer: &mut [u8]) -> Result<()> {
        self.i2c
            .write_read(DS3231_ADDRESS, &[start], buffer)
            .map_err(map_bus_error)
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.i2c.write(DS3231_ADDRESS, bytes).map_err(map_bus_error)
    }

    fn read_status(&mut self) -> Result<u8> {
        let mut status = [0u8; 1];
        self.read_registers(registers::STATUS, &mut status)?;
        Ok(status[0])
    }
}

impl<I: I2c> TimeSource for Ds3231<I> {
    fn now(&mut self) -> Result<TimeOfDay> {
        let mut raw = [0u8; 3];
        self.read_registers(registers::SECONDS, &mut raw)?;
        let [seconds, minutes, hours] = raw;
        TimeOfDay::new(
            decode_hours(hours),
            bcd_to_dec(minutes & 0x7F),
            bcd_to_dec(seconds & 0x7F),
        )
        .ok_or(Error::RtcInvalidData)
    }

    fn set(&mut self, time: TimeOfDay) -> Result<()> {
        let [weekday, day, month, year] = FIXED_DATE;
        self.write_bytes(&[
            registers::SECONDS,
            dec_to_bcd(time.second()),
            dec_to_bcd(time.minute()),
            dec_to_bcd(time.hour()),
            weekday,
            day,
            month,
            year,
        ])?;

        let status = self.read_status()?;
        self.write_bytes(&[registers::STATUS, status & !OSCILLATOR_STOP_FLAG])?;
        info!(
            "DS3231 set to {}:{}:{}",
            time.hour(),
            time.minute(),
            time.second()
        );
        Ok(())
    }

    fn lost_power(&mut self) -> Result<bool> {
        Ok(self.read_status()? & OSCILLATOR_STOP_FLAG != 0)
    }
}

/// A device that does not acknowledge its address is absent; anything else, a data NACK
/// included, is a transfer failure.
fn map_bus_error<E: embedded_hal::i2c::Error>(error: E) -> Error {
    match error.kind() {
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address | NoAcknowledgeSource::Unknown) => {
            Error::RtcNotFound
        }
        _ => Error::Rtc,
    }
}

/// Hours register to 0..=23, accepting either 12- or 24-hour mode.
#[expect(
    clippy::arithmetic_side_effects,
    reason = "Decoded 12-hour values are at most 19, so adding 12 stays within u8"
)]
const fn decode_hours(raw: u8) -> u8 {
    if raw & HOURS_12_HOUR_MODE == 0 {
        return bcd_to_dec(raw & 0x3F);
    }
    let hour = bcd_to_dec(raw & 0x1F);
    match (hour, raw & HOURS_PM != 0) {
        (12, false) => 0,
        (12, true) => 12,
        (hour, false) => hour,
        (hour, true) => hour + 12,
    }
}

#[expect(
    clippy::arithmetic_side_effects,
    reason = "Each nibble is at most 15, so the result is at most 165"
)]
const fn bcd_to_dec(bcd: u8) -> u8 {
    (bcd >> 4) * 10 + (bcd & 0x0F)
}

#[expect(
    clippy::integer_division_remainder_used,
    reason = "Division by a non-zero constant"
)]
const fn dec_to_bcd(dec: u8) -> u8 {
    ((dec / 10) << 4) | (dec % 10)
}
