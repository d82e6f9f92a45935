//! Settings record storage in the last erase block of the RP2040/RP2350 internal flash.

use embassy_rp::Peri;
use embassy_rp::flash::{Blocking, ERASE_SIZE, Flash};
use embassy_rp::peripherals::FLASH;

use crate::settings_store::{RECORD_SIZE, RecordStorage};
use crate::{Error, Result};

// Internal flash size for Raspberry Pi Pico 2 (4 MB).
#[cfg(feature = "pico2")]
pub const INTERNAL_FLASH_SIZE: usize = 4 * 1024 * 1024;

// Internal flash size for Raspberry Pi Pico 1 (2 MB).
#[cfg(all(not(feature = "pico2"), feature = "pico1"))]
pub const INTERNAL_FLASH_SIZE: usize = 2 * 1024 * 1024;

const _: () = assert!(RECORD_SIZE <= ERASE_SIZE);

/// The settings region: the first [`RECORD_SIZE`] bytes of the last flash erase block.
pub struct FlashStore {
    flash: Flash<'static, FLASH, Blocking, INTERNAL_FLASH_SIZE>,
}

impl FlashStore {
    #[must_use]
    pub fn new(peripheral: Peri<'static, FLASH>) -> Self {
        Self {
            flash: Flash::new_blocking(peripheral),
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::arithmetic_side_effects,
        reason = "Flash capacity is a few MiB and always larger than one erase block"
    )]
    fn offset(&self) -> u32 {
        (self.flash.capacity() - ERASE_SIZE) as u32
    }
}

impl RecordStorage for FlashStore {
    fn read_record(&mut self) -> Result<[u8; RECORD_SIZE]> {
        let mut buffer = [0u8; RECORD_SIZE];
        self.flash
            .blocking_read(self.offset(), &mut buffer)
            .map_err(Error::Flash)?;
        Ok(buffer)
    }

    /// Erases the block and writes the record; the rest of the block stays erased.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::arithmetic_side_effects,
        reason = "ERASE_SIZE is 4 KiB and the block lies inside the flash"
    )]
    fn write_record(&mut self, bytes: &[u8; RECORD_SIZE]) -> Result<()> {
        let offset = self.offset();
        self.flash
            .blocking_erase(offset, offset + ERASE_SIZE as u32)
            .map_err(Error::Flash)?;
        self.flash
            .blocking_write(offset, bytes)
            .map_err(Error::Flash)?;

        if self.read_record()? != *bytes {
            error!("Flash: read-back mismatch at {=u32:#x}", offset);
            return Err(Error::StorageCorrupted);
        }
        info!("Flash: saved settings record at {=u32:#x}", offset);
        Ok(())
    }
}
