//! The battery-backed clock the firmware resyncs from.

use crate::Result;
use crate::time_of_day::TimeOfDay;

/// A polled source of wall time that can also be set.
pub trait TimeSource {
    /// Current time of day.
    ///
    /// # Errors
    ///
    /// Returns an error if the device cannot be read or returns out-of-range fields.
    fn now(&mut self) -> Result<TimeOfDay>;

    /// Sets the device's time of day.
    ///
    /// # Errors
    ///
    /// Returns an error if the device cannot be written.
    fn set(&mut self, time: TimeOfDay) -> Result<()>;

    /// Whether the device stopped keeping time (for example, its backup battery ran out)
    /// since it was last set.
    ///
    /// # Errors
    ///
    /// Returns an error if the device does not respond.
    fn lost_power(&mut self) -> Result<bool>;
}
