use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
#[derive(Debug, Display, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // `#[error(not(source))]` below tells `derive_more` that `embassy_executor::SpawnError` does
    // not implement Rust's `core::error::Error` trait.
    #[cfg(all(feature = "arm", any(feature = "pico1", feature = "pico2")))]
    #[display("{_0:?}")]
    TaskSpawn(#[error(not(source))] embassy_executor::SpawnError),

    #[display("Real-time clock did not answer on the I2C bus")]
    RtcNotFound,

    #[display("Real-time clock I2C transfer failed")]
    Rtc,

    #[display("Real-time clock returned an out-of-range time")]
    RtcInvalidData,

    #[display("Settings record is corrupted")]
    StorageCorrupted,

    #[display("Format error")]
    FormatError,

    #[cfg(any(feature = "pico1", feature = "pico2"))]
    #[display("Flash operation failed: {_0:?}")]
    Flash(#[error(not(source))] embassy_rp::flash::Error),
}

#[cfg(all(feature = "arm", any(feature = "pico1", feature = "pico2")))]
impl From<embassy_executor::SpawnError> for Error {
    fn from(err: embassy_executor::SpawnError) -> Self {
        Self::TaskSpawn(err)
    }
}

#[cfg(any(feature = "pico1", feature = "pico2"))]
impl From<embassy_rp::flash::Error> for Error {
    fn from(err: embassy_rp::flash::Error) -> Self {
        Self::Flash(err)
    }
}
